//! ICS feed parsing using the icalendar crate's parser.

use chrono::{NaiveDate, NaiveDateTime};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, Property, read_calendar, unfold},
};
use tracing::debug;

use crate::error::{JcalError, JcalResult};

const MISSING_SUMMARY: &str = "(ohne Titel)";

/// A DTSTART/DTEND value as it appears in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcsTime {
    /// `VALUE=DATE`, no time of day
    Date(NaiveDate),
    /// Wall-clock date-time (UTC and TZID values keep their literal clock time)
    DateTime(NaiveDateTime),
}

impl IcsTime {
    pub fn is_date_only(&self) -> bool {
        matches!(self, IcsTime::Date(_))
    }

    /// The value as a date-time; dates start at midnight.
    pub fn to_naive(&self) -> NaiveDateTime {
        match self {
            IcsTime::Date(d) => d.and_time(chrono::NaiveTime::MIN),
            IcsTime::DateTime(dt) => *dt,
        }
    }
}

impl From<DatePerhapsTime> for IcsTime {
    fn from(dpt: DatePerhapsTime) -> Self {
        match dpt {
            DatePerhapsTime::Date(d) => IcsTime::Date(d),
            DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
                CalendarDateTime::Utc(dt) => IcsTime::DateTime(dt.naive_utc()),
                CalendarDateTime::Floating(naive) => IcsTime::DateTime(naive),
                CalendarDateTime::WithTimezone { date_time, .. } => IcsTime::DateTime(date_time),
            },
        }
    }
}

/// One VEVENT with the fields the year calendar needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub summary: String,
    pub start: IcsTime,
    pub end: Option<IcsTime>,
    /// Raw CATEGORIES values, one per property occurrence
    pub categories: Vec<String>,
}

/// Parse a whole feed into its VEVENT components, including nested ones.
pub fn parse_calendar(bytes: &[u8]) -> JcalResult<Vec<RawEvent>> {
    let content = String::from_utf8_lossy(bytes);
    let unfolded = unfold(&content);
    let calendar = read_calendar(&unfolded).map_err(|e| JcalError::Parse(e.to_string()))?;

    let mut vevents = Vec::new();
    for component in &calendar.components {
        collect_vevents(component, &mut vevents);
    }

    let events = vevents
        .into_iter()
        .map(parse_vevent)
        .collect::<JcalResult<Vec<_>>>()?;

    debug!(count = events.len(), "parsed VEVENT components");
    Ok(events)
}

fn collect_vevents<'a, 'b>(component: &'b Component<'a>, out: &mut Vec<&'b Component<'a>>) {
    if component.name == "VEVENT" {
        out.push(component);
    }
    for child in &component.components {
        collect_vevents(child, out);
    }
}

fn parse_vevent(vevent: &Component) -> JcalResult<RawEvent> {
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_else(|| MISSING_SUMMARY.to_string());

    let start = vevent
        .find_prop("DTSTART")
        .ok_or_else(|| JcalError::Parse(format!("event '{summary}' has no DTSTART")))
        .and_then(|p| parse_time(p, &summary))?;

    let end = vevent
        .find_prop("DTEND")
        .map(|p| parse_time(p, &summary))
        .transpose()?;

    let categories = vevent
        .properties
        .iter()
        .filter(|p| p.name == "CATEGORIES")
        .map(|p| unescape_text(p.val.as_ref()))
        .collect();

    Ok(RawEvent {
        summary,
        start,
        end,
        categories,
    })
}

fn parse_time(prop: &Property, summary: &str) -> JcalResult<IcsTime> {
    DatePerhapsTime::try_from(prop)
        .map(IcsTime::from)
        .map_err(|_| {
            JcalError::Parse(format!(
                "event '{summary}' has an invalid {} value '{}'",
                prop.name.as_ref(),
                prop.val.as_ref()
            ))
        })
}

/// Undo RFC 5545 TEXT escaping.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
