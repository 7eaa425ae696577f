//! Classified calendar events.
//!
//! A [`RawEvent`] from the feed becomes an [`Event`] with a normalized
//! start/end, a duration class and the category flags that decide how the
//! year calendar treats it.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};

use crate::error::{JcalError, JcalResult};
use crate::ics::RawEvent;

/// Categories that mark public holidays.
pub const HOLIDAY_CATEGORIES: &[&str] = &["Holiday", "Holidays", "Feiertag", "Feiertage"];

/// Categories that mark school vacation periods.
pub const VACATION_CATEGORIES: &[&str] = &["Vacation", "Ferien"];

/// Duration class of an event.
///
/// The declaration order is the listing order on a shared day: multi-day
/// entries always come before single-day and timed ones, regardless of
/// clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// All-day event lasting more than one day
    MultiDayLoose,
    /// All-day event on a single day
    AllDaySingle,
    /// Timed event lasting at least a day
    TimedMultiDay,
    /// Timed event shorter than a day, or an event without DTEND
    TimedDefault,
}

/// A calendar entry ready for aggregation. Immutable once classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub summary: String,
    pub categories: BTreeSet<String>,
    pub start: NaiveDateTime,
    /// Exclusive end
    pub end: NaiveDateTime,
    pub kind: EventKind,
    pub is_holiday: bool,
    pub is_vacation_period: bool,
}

impl Event {
    /// Classify one raw feed component.
    ///
    /// Fails only when the end lies before the start.
    pub fn classify(raw: &RawEvent) -> JcalResult<Self> {
        let start = raw.start.to_naive();

        let (end, kind) = match raw.end {
            None => (start + Duration::days(1), EventKind::TimedDefault),
            Some(end) => {
                let end = end.to_naive();
                if end < start {
                    return Err(JcalError::Parse(format!(
                        "event '{}' ends ({end}) before it starts ({start})",
                        raw.summary
                    )));
                }
                let duration = end - start;
                let kind = if raw.start.is_date_only() {
                    if duration > Duration::days(1) {
                        EventKind::MultiDayLoose
                    } else {
                        EventKind::AllDaySingle
                    }
                } else if duration.num_days() >= 1 {
                    EventKind::TimedMultiDay
                } else {
                    EventKind::TimedDefault
                };
                (end, kind)
            }
        };

        let categories: BTreeSet<String> = raw
            .categories
            .iter()
            .flat_map(|value| value.split(','))
            .map(|cat| cat.trim())
            .filter(|cat| !cat.is_empty())
            .map(str::to_string)
            .collect();

        let is_holiday = HOLIDAY_CATEGORIES.iter().any(|c| categories.contains(*c));
        let is_vacation_period = VACATION_CATEGORIES.iter().any(|c| categories.contains(*c));

        Ok(Event {
            summary: raw.summary.clone(),
            categories,
            start,
            end,
            kind,
            is_holiday,
            is_vacation_period,
        })
    }

    /// Holidays and vacation spans mark days but never take footnote slots.
    pub fn is_marker(&self) -> bool {
        self.is_holiday || self.is_vacation_period
    }

    /// Whether this event gets month-scoped footnotes for its whole span.
    pub fn spans_footnotes(&self) -> bool {
        self.kind == EventKind::MultiDayLoose && !self.is_marker()
    }

    /// The line shown in a day cell: timed events get their start time.
    pub fn display_text(&self) -> String {
        let text = self.summary.trim();
        if self.kind == EventKind::TimedDefault {
            format!("{} {}", self.start.format("%H:%M"), text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::IcsTime;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> IcsTime {
        IcsTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> IcsTime {
        IcsTime::DateTime(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    fn raw(start: IcsTime, end: Option<IcsTime>, categories: &[&str]) -> RawEvent {
        RawEvent {
            summary: "  Termin ".to_string(),
            start,
            end,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_kind_classification() {
        let cases = [
            (day(2024, 3, 30), Some(day(2024, 4, 2)), EventKind::MultiDayLoose),
            (day(2024, 3, 30), Some(day(2024, 3, 31)), EventKind::AllDaySingle),
            (at(2024, 3, 1, 10, 0), Some(at(2024, 3, 2, 10, 0)), EventKind::TimedMultiDay),
            (at(2024, 3, 1, 10, 0), Some(at(2024, 3, 1, 11, 0)), EventKind::TimedDefault),
            (at(2024, 3, 1, 10, 0), None, EventKind::TimedDefault),
            (day(2024, 3, 1), None, EventKind::TimedDefault),
        ];

        for (start, end, expected) in cases {
            let event = Event::classify(&raw(start, end, &[])).unwrap();
            assert_eq!(event.kind, expected, "start={start:?} end={end:?}");
        }
    }

    #[test]
    fn test_partial_extra_day_counts_as_multi_day() {
        let event =
            Event::classify(&raw(day(2024, 3, 1), Some(at(2024, 3, 2, 12, 0)), &[])).unwrap();
        assert_eq!(event.kind, EventKind::MultiDayLoose);

        let event =
            Event::classify(&raw(day(2024, 3, 1), Some(at(2024, 3, 2, 0, 0)), &[])).unwrap();
        assert_eq!(event.kind, EventKind::AllDaySingle);
    }

    #[test]
    fn test_missing_end_defaults_to_one_day() {
        let event = Event::classify(&raw(at(2024, 3, 1, 10, 0), None, &[])).unwrap();
        assert_eq!(event.end - event.start, Duration::days(1));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let err = Event::classify(&raw(day(2024, 3, 5), Some(day(2024, 3, 1)), &[])).unwrap_err();
        assert!(matches!(err, JcalError::Parse(_)));
    }

    #[test]
    fn test_category_flags() {
        let event = Event::classify(&raw(day(2024, 5, 1), None, &["Feiertag, Familie"])).unwrap();
        assert!(event.is_holiday);
        assert!(!event.is_vacation_period);
        assert!(event.categories.contains("Familie"));

        let event = Event::classify(&raw(day(2024, 7, 1), None, &["Work", " Vacation "])).unwrap();
        assert!(event.is_vacation_period);
        assert!(event.is_marker());

        let event = Event::classify(&raw(day(2024, 7, 1), None, &["Holidayish"])).unwrap();
        assert!(!event.is_holiday);
    }

    #[test]
    fn test_kind_order_lists_multi_day_first() {
        assert!(EventKind::MultiDayLoose < EventKind::AllDaySingle);
        assert!(EventKind::AllDaySingle < EventKind::TimedMultiDay);
        assert!(EventKind::TimedMultiDay < EventKind::TimedDefault);
    }

    #[test]
    fn test_display_text() {
        let timed = Event::classify(&raw(at(2024, 3, 1, 9, 5), None, &[])).unwrap();
        assert_eq!(timed.display_text(), "09:05 Termin");

        let all_day = Event::classify(&raw(day(2024, 3, 1), Some(day(2024, 3, 2)), &[])).unwrap();
        assert_eq!(all_day.display_text(), "Termin");
    }
}
