use anyhow::Result;
use jcal_core::JcalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = JcalConfig::config_path()?;
    let profile = JcalConfig::load()?;

    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!(
        "  Output:     {}",
        profile
            .output_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "current directory".to_string())
    );

    println!();
    println!("{}", "Profile".bold());
    println!("  Feed:       {}", profile.url.clone().unwrap_or_else(unset));
    println!(
        "  Start:      {}",
        match (profile.start_month, profile.start_year) {
            (Some(m), Some(y)) => format!("{m}/{y}"),
            _ => unset(),
        }
    );
    println!("  Header:     {}", profile.header);
    println!("  Language:   {}", profile.language);
    println!("  Timeout:    {}s", profile.timeout_secs);

    Ok(())
}
