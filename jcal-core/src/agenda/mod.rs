//! Day and footnote aggregation for one calendar window.
//!
//! Events are ingested unordered: each one marks the days it covers and is
//! anchored on the day its text is shown. A single finalize pass then sorts
//! every day, moves lines beyond [`MAX_DISPLAY_LINES`] into the month's
//! legend, numbers the legends and builds the day → footnote index.

mod day;
mod legend;

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use crate::event::Event;
use crate::window::{CalendarWindow, MonthKey};

pub use day::{DayRecord, MAX_DISPLAY_LINES};
pub use legend::{FootnoteDayIndex, FootnoteEntry, FootnoteLegend};

use legend::{LegendCandidate, covered_months, is_continuation_day};

/// Everything the renderer needs for one 12-month calendar.
#[derive(Debug, Clone)]
pub struct YearAgenda {
    window: CalendarWindow,
    days: BTreeMap<NaiveDate, DayRecord>,
    legends: BTreeMap<MonthKey, FootnoteLegend>,
    footnote_days: FootnoteDayIndex,
}

impl YearAgenda {
    /// Aggregate classified events into day records and footnote legends.
    pub fn build(window: CalendarWindow, events: impl IntoIterator<Item = Event>) -> Self {
        let mut builder = AgendaBuilder::new(window);
        for event in events {
            builder.ingest(&event);
        }
        builder.finish()
    }

    pub fn window(&self) -> CalendarWindow {
        self.window
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.values()
    }

    /// Legend entries for a month, in index order.
    pub fn legend(&self, month: MonthKey) -> &[FootnoteEntry] {
        self.legends
            .get(&month)
            .map(FootnoteLegend::entries)
            .unwrap_or(&[])
    }

    /// Footnote numbers to print next to a day, ascending.
    pub fn footnotes_on(&self, date: NaiveDate) -> &[usize] {
        self.footnote_days.get(date)
    }
}

struct AgendaBuilder {
    window: CalendarWindow,
    days: BTreeMap<NaiveDate, DayRecord>,
    candidates: BTreeMap<MonthKey, Vec<LegendCandidate>>,
    ingested: usize,
    discarded: usize,
}

impl AgendaBuilder {
    fn new(window: CalendarWindow) -> Self {
        AgendaBuilder {
            window,
            days: BTreeMap::new(),
            candidates: BTreeMap::new(),
            ingested: 0,
            discarded: 0,
        }
    }

    fn ingest(&mut self, event: &Event) {
        if !self.window.overlaps(event) {
            self.discarded += 1;
            return;
        }
        self.ingested += 1;

        let months = if event.spans_footnotes() {
            covered_months(event)
        } else {
            Vec::new()
        };
        for month in &months {
            self.register_span(*month, event);
        }

        let window_start = self.window.first_day();
        let window_end = self.window.end_day();
        let started_before = event.start.date() < window_start;

        let mut cursor = event.start;
        if started_before {
            cursor += Duration::days((window_start - cursor.date()).num_days());
        }

        while cursor < event.end && cursor.date() < window_end {
            let date = cursor.date();
            let record = self
                .days
                .entry(date)
                .or_insert_with(|| DayRecord::new(date));
            record.mark(event);

            let anchored = date == event.start.date() || (started_before && date == window_start);
            if anchored || is_continuation_day(date, event, &months) {
                record.anchor(event);
            }

            cursor += Duration::days(1);
        }
    }

    /// One legend line per month the event covers, unless the month already
    /// lists the same text.
    fn register_span(&mut self, month: MonthKey, event: &Event) {
        let text = event.display_text();
        let entries = self.candidates.entry(month).or_default();
        if !entries.iter().any(|c| c.text == text) {
            entries.push(LegendCandidate::new(event, text));
        }
    }

    fn finish(mut self) -> YearAgenda {
        for record in self.days.values_mut() {
            let overflow = record.finalize();
            if overflow.is_empty() {
                continue;
            }
            debug!(date = %record.date, count = overflow.len(), "day overflows into legend");
            let month = MonthKey::of(record.date);
            let entries = self.candidates.entry(month).or_default();
            for (event, text) in overflow {
                let listed = entries
                    .iter()
                    .any(|c| c.text == text && c.source_start == event.start);
                if !listed {
                    entries.push(LegendCandidate::new(&event, text));
                }
            }
        }

        let mut legends = BTreeMap::new();
        let mut footnote_days = FootnoteDayIndex::default();
        for (month, candidates) in self.candidates {
            let legend = FootnoteLegend::from_candidates(candidates);
            debug!(?month, entries = legend.len(), "legend built");
            footnote_days.add_legend(month, &legend);
            legends.insert(month, legend);
        }

        info!(
            ingested = self.ingested,
            discarded = self.discarded,
            days = self.days.len(),
            legend_months = legends.len(),
            "aggregated calendar window"
        );

        YearAgenda {
            window: self.window,
            days: self.days,
            legends,
            footnote_days,
        }
    }
}
