//! Month and weekday names for the printed calendar.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::JcalError;

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Monday first, as in Weekday::num_days_from_monday
const WEEKDAYS_DE: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];
const WEEKDAYS_EN: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Language of the printed labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    /// Full month name, `month` in 1..=12.
    pub fn month_name(self, month: u32) -> &'static str {
        let table = match self {
            Language::De => &MONTHS_DE,
            Language::En => &MONTHS_EN,
        };
        table[(month.clamp(1, 12) - 1) as usize]
    }

    pub fn weekday_abbrev(self, weekday: Weekday) -> &'static str {
        let table = match self {
            Language::De => &WEEKDAYS_DE,
            Language::En => &WEEKDAYS_EN,
        };
        table[weekday.num_days_from_monday() as usize]
    }

    /// "März 24"
    pub fn month_heading(self, month: u32, year: i32) -> String {
        format!("{} {:02}", self.month_name(month), year.rem_euclid(100))
    }

    pub fn legend_title(self) -> &'static str {
        match self {
            Language::De => "Legende:",
            Language::En => "Legend:",
        }
    }

    pub fn half_year_label(self, page: usize) -> String {
        match self {
            Language::De => format!("{page}. Halbjahr"),
            Language::En => format!("Half-year {page}"),
        }
    }

    pub fn feed_label(self, url: &str) -> String {
        let url: String = url.chars().take(100).collect();
        match self {
            Language::De => format!("Kalenderfeed: {url}"),
            Language::En => format!("Calendar feed: {url}"),
        }
    }

    pub fn created_label(self, at: NaiveDateTime) -> String {
        match self {
            Language::De => format!("erstellt am: {}", at.format("%d.%m.%Y - %H:%M:%S")),
            Language::En => format!("created: {}", at.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::De => write!(f, "de"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = JcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" => Ok(Language::De),
            "en" => Ok(Language::En),
            other => Err(JcalError::Config(format!(
                "unknown language '{other}' (expected 'de' or 'en')"
            ))),
        }
    }
}
