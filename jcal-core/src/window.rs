//! The 12-month span a year calendar covers.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{JcalError, JcalResult};
use crate::event::Event;

/// Placeholder in the header template replaced by the covered year(s).
pub const YEARS_PLACEHOLDER: &str = "{jahre}";

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

/// Half-open interval `[start_month/start_year, +1 year)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    start_month: u32,
    start_year: i32,
}

impl CalendarWindow {
    pub fn new(start_month: u32, start_year: i32) -> JcalResult<Self> {
        if !(1..=12).contains(&start_month) {
            return Err(JcalError::Config(format!(
                "start month must be 1..=12, got {start_month}"
            )));
        }
        if NaiveDate::from_ymd_opt(start_year, start_month, 1)
            .and_then(|d| d.checked_add_months(Months::new(12)))
            .is_none()
        {
            return Err(JcalError::Config(format!(
                "start year {start_year} is out of range"
            )));
        }
        Ok(CalendarWindow {
            start_month,
            start_year,
        })
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn first_month(&self) -> MonthKey {
        MonthKey {
            year: self.start_year,
            month: self.start_month,
        }
    }

    /// First day inside the window.
    pub fn first_day(&self) -> NaiveDate {
        self.first_month().first_day()
    }

    /// First day after the window.
    pub fn end_day(&self) -> NaiveDate {
        self.months()
            .last()
            .map(|m| m.next().first_day())
            .unwrap_or_else(|| self.first_day())
    }

    /// The 12 months of the window in order.
    pub fn months(&self) -> impl Iterator<Item = MonthKey> {
        std::iter::successors(Some(self.first_month()), |m| Some(m.next())).take(12)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date < self.end_day()
    }

    /// An event is kept if it starts inside the window or is still running
    /// when the window begins.
    pub fn overlaps(&self, event: &Event) -> bool {
        let starts_inside = self.contains_date(event.start.date());
        let running_at_start =
            event.start.date() < self.first_day() && event.end.date() >= self.first_day();
        starts_inside || running_at_start
    }

    /// "2024" for a January start, "2024/25" otherwise.
    pub fn years_label(&self) -> String {
        if self.start_month == 1 {
            self.start_year.to_string()
        } else {
            format!("{}/{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
        }
    }

    /// Substitute the years placeholder in a header template.
    pub fn header_text(&self, template: &str) -> String {
        template
            .trim()
            .replace(YEARS_PLACEHOLDER, &self.years_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate) -> Event {
        Event {
            summary: "x".to_string(),
            categories: BTreeSet::new(),
            start: start.and_hms_opt(0, 0, 0).unwrap(),
            end: end.and_hms_opt(0, 0, 0).unwrap(),
            kind: EventKind::MultiDayLoose,
            is_holiday: false,
            is_vacation_period: false,
        }
    }

    #[test]
    fn test_rejects_invalid_month() {
        assert!(matches!(
            CalendarWindow::new(13, 2024),
            Err(JcalError::Config(_))
        ));
        assert!(CalendarWindow::new(0, 2024).is_err());
    }

    #[test]
    fn test_bounds_and_months() {
        let window = CalendarWindow::new(10, 2024).unwrap();
        assert_eq!(window.first_day(), date(2024, 10, 1));
        assert_eq!(window.end_day(), date(2025, 10, 1));

        let months: Vec<_> = window.months().collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[2], MonthKey { year: 2024, month: 12 });
        assert_eq!(months[3], MonthKey { year: 2025, month: 1 });
    }

    #[test]
    fn test_month_key_days() {
        assert_eq!(MonthKey { year: 2024, month: 2 }.days_in_month(), 29);
        assert_eq!(MonthKey { year: 2023, month: 2 }.days_in_month(), 28);
        assert_eq!(MonthKey { year: 2024, month: 12 }.last_day(), date(2024, 12, 31));
    }

    #[test]
    fn test_overlap_filter() {
        let window = CalendarWindow::new(1, 2024).unwrap();

        assert!(window.overlaps(&event(date(2024, 3, 1), date(2024, 3, 2))));
        assert!(window.overlaps(&event(date(2023, 12, 28), date(2024, 1, 3))));
        assert!(!window.overlaps(&event(date(2023, 12, 1), date(2023, 12, 3))));
        assert!(!window.overlaps(&event(date(2025, 1, 1), date(2025, 1, 2))));
    }

    #[test]
    fn test_header_years() {
        let january = CalendarWindow::new(1, 2024).unwrap();
        assert_eq!(january.header_text("Jahreskalender {jahre}"), "Jahreskalender 2024");

        let august = CalendarWindow::new(8, 2024).unwrap();
        assert_eq!(august.header_text(" Schuljahr {jahre} "), "Schuljahr 2024/25");

        let turn_of_century = CalendarWindow::new(9, 2099).unwrap();
        assert_eq!(turn_of_century.years_label(), "2099/00");
    }
}
