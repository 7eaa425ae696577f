//! Per-day records.

use chrono::NaiveDate;

use crate::event::Event;

/// Maximum number of event lines printed inside one day cell.
pub const MAX_DISPLAY_LINES: usize = 4;

/// One calendar date touched by at least one event.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub is_vacation_day: bool,
    /// Events whose text is shown on this day, sorted once finalized
    pub events: Vec<Event>,
    /// At most [`MAX_DISPLAY_LINES`] lines, filled when finalized
    pub display_lines: Vec<String>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        DayRecord {
            date,
            is_holiday: false,
            is_vacation_day: false,
            events: Vec::new(),
            display_lines: Vec::new(),
        }
    }

    /// OR the event's holiday/vacation flags into the day.
    pub(crate) fn mark(&mut self, event: &Event) {
        self.is_holiday |= event.is_holiday;
        self.is_vacation_day |= event.is_vacation_period;
    }

    pub(crate) fn anchor(&mut self, event: &Event) {
        self.events.push(event.clone());
    }

    /// Sort the anchored events and split them into display lines and
    /// overflow. Returns the overflowing events with their display text,
    /// lowest priority last.
    pub(crate) fn finalize(&mut self) -> Vec<(Event, String)> {
        self.events.sort_by(|a, b| (a.kind, a.start).cmp(&(b.kind, b.start)));

        let mut overflow = Vec::new();
        self.display_lines.clear();
        for (i, event) in self.events.iter().enumerate() {
            let text = event.display_text();
            if i < MAX_DISPLAY_LINES {
                self.display_lines.push(text);
            } else {
                overflow.push((event.clone(), text));
            }
        }
        overflow
    }
}
