//! Which month goes into which column of which page.
//!
//! Both pages share one rule: column `c` of page `p` shows logical month
//! `(p - 1) * 6 + c` counted from the window start, and the year advances
//! exactly once, when that count passes December.

use crate::window::{CalendarWindow, MonthKey};

/// Month columns per page.
pub const MONTHS_PER_PAGE: usize = 6;

/// One of the two half-year pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Page {
    First,
    Second,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::First, Page::Second];

    /// 1 or 2
    pub fn number(self) -> usize {
        match self {
            Page::First => 1,
            Page::Second => 2,
        }
    }
}

/// A month placed in a page column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSlot {
    /// 0..6, left to right
    pub column: usize,
    pub month: MonthKey,
    /// The window already crossed December → January at this slot
    pub rolled_over: bool,
}

/// Month slots for one page.
pub fn plan_page(window: CalendarWindow, page: Page) -> [MonthSlot; MONTHS_PER_PAGE] {
    std::array::from_fn(|column| {
        let offset = (page.number() - 1) * MONTHS_PER_PAGE + column;
        // zero-based month counted from January of the start year
        let absolute = window.start_month() as usize - 1 + offset;
        MonthSlot {
            column,
            month: MonthKey {
                year: window.start_year() + (absolute / 12) as i32,
                month: (absolute % 12) as u32 + 1,
            },
            rolled_over: absolute >= 12,
        }
    })
}

/// Month slots for both pages, page 1 first.
pub fn plan_document(window: CalendarWindow) -> Vec<(Page, [MonthSlot; MONTHS_PER_PAGE])> {
    Page::ALL
        .into_iter()
        .map(|page| (page, plan_page(window, page)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn all_months(window: CalendarWindow) -> Vec<MonthKey> {
        plan_document(window)
            .into_iter()
            .flat_map(|(_, slots)| slots.into_iter().map(|s| s.month))
            .collect()
    }

    #[test]
    fn test_every_start_month_yields_twelve_distinct_months() {
        for start_month in 1..=12 {
            let window = CalendarWindow::new(start_month, 2024).unwrap();
            let months = all_months(window);

            assert_eq!(months.len(), 12);
            let distinct: BTreeSet<_> = months.iter().copied().collect();
            assert_eq!(distinct.len(), 12, "start_month={start_month}");
            assert!(
                months.windows(2).all(|w| w[0].next() == w[1]),
                "start_month={start_month}: months must be consecutive"
            );
            assert_eq!(months, window.months().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_october_start_rolls_over_once() {
        let window = CalendarWindow::new(10, 2024).unwrap();
        let first = plan_page(window, Page::First);
        let second = plan_page(window, Page::Second);

        let years: Vec<_> = first.iter().map(|s| (s.month.month, s.month.year)).collect();
        assert_eq!(
            years,
            vec![(10, 2024), (11, 2024), (12, 2024), (1, 2025), (2, 2025), (3, 2025)]
        );
        let rolled: Vec<_> = first.iter().map(|s| s.rolled_over).collect();
        assert_eq!(rolled, vec![false, false, false, true, true, true]);

        assert!(second.iter().all(|s| s.month.year == 2025 && s.rolled_over));
        assert_eq!(second[0].month.month, 4);
        assert_eq!(second[5].month.month, 9);
    }

    #[test]
    fn test_july_start_rolls_over_on_second_page() {
        let window = CalendarWindow::new(7, 2024).unwrap();
        let first = plan_page(window, Page::First);
        let second = plan_page(window, Page::Second);

        assert!(first.iter().all(|s| s.month.year == 2024 && !s.rolled_over));
        assert_eq!(second[0].month, MonthKey { year: 2025, month: 1 });
        assert!(second[0].rolled_over);
    }

    #[test]
    fn test_january_start_never_rolls_over() {
        let window = CalendarWindow::new(1, 2024).unwrap();
        let slots: Vec<_> = plan_document(window)
            .into_iter()
            .flat_map(|(_, slots)| slots)
            .collect();
        assert!(slots.iter().all(|s| s.month.year == 2024 && !s.rolled_over));
        assert_eq!(slots[11].month.month, 12);
        assert_eq!(slots[11].column, 5);
    }
}
