//! The persisted generation profile at ~/.config/jcal/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{JcalError, JcalResult};
use crate::locale::Language;
use crate::window::YEARS_PLACEHOLDER;

static DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_header() -> String {
    format!("Jahreskalender {YEARS_PLACEHOLDER}")
}

fn is_default_header(header: &String) -> bool {
    *header == default_header()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn is_default_timeout(secs: &u64) -> bool {
    *secs == DEFAULT_TIMEOUT_SECS
}

fn is_default_language(language: &Language) -> bool {
    *language == Language::default()
}

/// Values remembered between runs. Every key is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JcalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,

    #[serde(default = "default_header", skip_serializing_if = "is_default_header")]
    pub header: String,

    #[serde(default, skip_serializing_if = "is_default_language")]
    pub language: Language,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_timeout_secs", skip_serializing_if = "is_default_timeout")]
    pub timeout_secs: u64,
}

impl Default for JcalConfig {
    fn default() -> Self {
        JcalConfig {
            url: None,
            start_year: None,
            start_month: None,
            header: default_header(),
            language: Language::default(),
            output_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl JcalConfig {
    pub fn config_path() -> JcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| JcalError::Config("Could not determine config directory".into()))?
            .join("jcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the profile, creating a commented-out one on first run.
    pub fn load() -> JcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Read `path` (if present) with `JCAL_*` environment overrides on top.
    pub fn load_from(path: &Path) -> JcalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("JCAL"))
            .build()
            .map_err(|e| JcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| JcalError::Config(e.to_string()))
    }

    pub fn save(&self) -> JcalResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> JcalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| JcalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                JcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| JcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> JcalResult<()> {
        let contents = format!(
            "\
# jcal configuration

# iCalendar feed to render (webcal:// is accepted):
# url = \"https://example.com/calendar.ics\"

# First month of the 12-month window (defaults to the current month):
# start_year = 2024
# start_month = 8

# Page header; {YEARS_PLACEHOLDER} becomes \"2024\" or \"2024/25\":
# header = \"{}\"

# Month and weekday names (de or en):
# language = \"de\"

# Where generated documents are written:
# output_dir = \"~/Documents\"

# Feed download timeout in seconds:
# timeout_secs = {DEFAULT_TIMEOUT_SECS}
",
            default_header()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                JcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| JcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `output_dir` with `~` expanded.
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|dir| {
            PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned())
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
