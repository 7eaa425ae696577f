//! Month-scoped footnote legends and the day → footnote cross-reference.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::event::{Event, EventKind};
use crate::window::MonthKey;

/// A legend line before indices are assigned.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LegendCandidate {
    pub source_start: NaiveDateTime,
    pub source_end: NaiveDateTime,
    pub text: String,
    pub kind: EventKind,
}

impl LegendCandidate {
    pub fn new(event: &Event, text: String) -> Self {
        LegendCandidate {
            source_start: event.start,
            source_end: event.end,
            text,
            kind: event.kind,
        }
    }
}

/// A numbered legend line.
#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteEntry {
    /// 1-based, contiguous within the month
    pub index: usize,
    pub source_start: NaiveDateTime,
    pub source_end: NaiveDateTime,
    pub text: String,
    pub kind: EventKind,
}

impl FootnoteEntry {
    /// First and last day (inclusive) this entry marks inside `month`, or
    /// `None` if it does not reach into the month.
    pub fn span_within(&self, month: MonthKey) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.source_start.date().max(month.first_day());
        let end_day = match self.kind {
            // exclusive at the instant level: the last shown day is the one before
            EventKind::MultiDayLoose => self.source_end.date().pred_opt()?,
            _ => self.source_end.date(),
        };
        let last = end_day.min(month.last_day());
        (first <= last).then_some((first, last))
    }
}

/// The numbered legend printed under one month column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootnoteLegend {
    entries: Vec<FootnoteEntry>,
}

impl FootnoteLegend {
    /// Sort candidates by start and number them from 1.
    pub(crate) fn from_candidates(mut candidates: Vec<LegendCandidate>) -> Self {
        candidates.sort_by_key(|c| c.source_start);
        let entries = candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| FootnoteEntry {
                index: i + 1,
                source_start: c.source_start,
                source_end: c.source_end,
                text: c.text,
                kind: c.kind,
            })
            .collect();
        FootnoteLegend { entries }
    }

    pub fn entries(&self) -> &[FootnoteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which footnote numbers to print next to each day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FootnoteDayIndex {
    by_day: BTreeMap<NaiveDate, Vec<usize>>,
}

impl FootnoteDayIndex {
    /// Append every entry's index to each day of its clipped span.
    /// Entries are visited in legend order, so numbers per day ascend.
    pub(crate) fn add_legend(&mut self, month: MonthKey, legend: &FootnoteLegend) {
        for entry in legend.entries() {
            let Some((first, last)) = entry.span_within(month) else {
                continue;
            };
            for date in first.iter_days().take_while(|d| *d <= last) {
                self.by_day.entry(date).or_default().push(entry.index);
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> &[usize] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Months a multi-day event overlaps, including the month of its last
/// shown day.
pub(crate) fn covered_months(event: &Event) -> Vec<MonthKey> {
    let start = event.start.date();
    let mut last = event.end.date();
    if event.end - event.start > Duration::days(1) {
        last = last.pred_opt().unwrap_or(last);
    }

    let end_key = MonthKey::of(last);
    let mut months = Vec::new();
    let mut current = MonthKey::of(start);
    while current <= end_key {
        months.push(current);
        current = current.next();
    }
    months
}

/// Whether `date` is the 1st of a month after the event's start month.
pub(crate) fn is_continuation_day(date: NaiveDate, event: &Event, months: &[MonthKey]) -> bool {
    months.len() > 1
        && date.day() == 1
        && date > event.start.date()
        && months.contains(&MonthKey::of(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn multi_day(start: NaiveDate, end: NaiveDate) -> Event {
        Event {
            summary: "Reise".to_string(),
            categories: BTreeSet::new(),
            start: start.and_hms_opt(0, 0, 0).unwrap(),
            end: end.and_hms_opt(0, 0, 0).unwrap(),
            kind: EventKind::MultiDayLoose,
            is_holiday: false,
            is_vacation_period: false,
        }
    }

    #[test]
    fn test_covered_months_excludes_exclusive_end_month() {
        let event = multi_day(date(2024, 3, 29), date(2024, 4, 1));
        assert_eq!(covered_months(&event), vec![MonthKey { year: 2024, month: 3 }]);

        let event = multi_day(date(2024, 11, 20), date(2025, 1, 3));
        assert_eq!(
            covered_months(&event),
            vec![
                MonthKey { year: 2024, month: 11 },
                MonthKey { year: 2024, month: 12 },
                MonthKey { year: 2025, month: 1 },
            ]
        );
    }

    #[test]
    fn test_span_is_clipped_to_month() {
        let event = multi_day(date(2024, 3, 30), date(2024, 4, 2));
        let legend = FootnoteLegend::from_candidates(vec![LegendCandidate::new(
            &event,
            "Reise".to_string(),
        )]);
        let entry = &legend.entries()[0];

        assert_eq!(
            entry.span_within(MonthKey { year: 2024, month: 3 }),
            Some((date(2024, 3, 30), date(2024, 3, 31)))
        );
        assert_eq!(
            entry.span_within(MonthKey { year: 2024, month: 4 }),
            Some((date(2024, 4, 1), date(2024, 4, 1)))
        );
        assert_eq!(entry.span_within(MonthKey { year: 2024, month: 5 }), None);
    }

    #[test]
    fn test_continuation_day() {
        let event = multi_day(date(2024, 3, 30), date(2024, 5, 3));
        let months = covered_months(&event);

        assert!(is_continuation_day(date(2024, 4, 1), &event, &months));
        assert!(is_continuation_day(date(2024, 5, 1), &event, &months));
        assert!(!is_continuation_day(date(2024, 4, 2), &event, &months));
        assert!(!is_continuation_day(date(2024, 3, 31), &event, &months));
    }
}
