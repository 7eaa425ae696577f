use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use jcal_core::{
    CalendarWindow, JcalConfig, Language, RenderOptions, YearAgenda, build_document,
    default_file_name, load_events, persist_document,
};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use super::create_spinner;

pub struct GenerateArgs {
    pub url: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub header: Option<String>,
    pub language: Option<Language>,
    pub output: Option<PathBuf>,
    pub open: bool,
    pub save: bool,
}

/// Flags merged over the saved profile.
#[derive(Debug, PartialEq)]
struct Settings {
    url: String,
    window: CalendarWindow,
    header_template: String,
    language: Language,
    destination: PathBuf,
    timeout: Duration,
}

impl Settings {
    fn resolve(args: &GenerateArgs, profile: &JcalConfig, today: NaiveDate) -> Result<Self> {
        let url = args
            .url
            .clone()
            .or_else(|| profile.url.clone())
            .filter(|url| !url.trim().is_empty())
            .context("No feed URL given.\n\nPass one with:\n  jcal generate --url <URL>")?;

        let month = args
            .month
            .or(profile.start_month)
            .unwrap_or_else(|| today.month());
        let year = args
            .year
            .or(profile.start_year)
            .unwrap_or_else(|| today.year());
        let window = CalendarWindow::new(month, year)?;

        let destination = match &args.output {
            Some(path) => path.clone(),
            None => profile
                .output_dir()
                .unwrap_or_default()
                .join(default_file_name(window)),
        };

        Ok(Settings {
            url: url.trim().to_string(),
            window,
            header_template: args.header.clone().unwrap_or_else(|| profile.header.clone()),
            language: args.language.unwrap_or(profile.language),
            destination,
            timeout: profile.timeout(),
        })
    }

    /// Copy the effective values back into the profile.
    fn remember(&self, profile: &mut JcalConfig) {
        profile.url = Some(self.url.clone());
        profile.start_year = Some(self.window.start_year());
        profile.start_month = Some(self.window.start_month());
        profile.header = self.header_template.clone();
        profile.language = self.language;
    }
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let mut profile = JcalConfig::load()?;
    let now = Local::now().naive_local();
    let settings = Settings::resolve(&args, &profile, now.date())?;

    let spinner = create_spinner(format!("Fetching {}", settings.url.dimmed()));
    let events = load_events(&settings.url, settings.timeout).await;
    spinner.finish_and_clear();
    let events = events?;
    info!(count = events.len(), "events loaded");

    let agenda = YearAgenda::build(settings.window, events);
    let options = RenderOptions {
        header: settings.window.header_text(&settings.header_template),
        feed_url: settings.url.clone(),
        generated_at: now,
        language: settings.language,
    };

    let bytes = build_document(&agenda, &options)?;
    persist_document(&bytes, &settings.destination)?;

    println!(
        "{} {}",
        "Saved".green(),
        settings.destination.display().bold()
    );

    if args.save {
        settings.remember(&mut profile);
        if let Err(e) = profile.save() {
            warn!(error = %e, "could not update profile");
        }
    }

    if args.open {
        open::that(&settings.destination)
            .with_context(|| format!("Could not open {}", settings.destination.display()))?;
    }

    Ok(())
}
