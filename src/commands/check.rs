use anyhow::{Context, Result};
use jcal_core::{JcalConfig, fetch_feed, validate_feed};
use owo_colors::OwoColorize;

use super::create_spinner;

pub async fn run(url: Option<String>) -> Result<()> {
    let profile = JcalConfig::load()?;
    let url = url
        .or(profile.url.clone())
        .context("No feed URL given.\n\nPass one with:\n  jcal check --url <URL>")?;

    let spinner = create_spinner(format!("Checking {}", url.dimmed()));
    let result = fetch_feed(&url, profile.timeout())
        .await
        .and_then(|bytes| validate_feed(&bytes));
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{} {}", "✓".green(), "Connection OK".bold());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red(), e.to_string().red());
            anyhow::bail!("Feed check failed")
        }
    }
}
