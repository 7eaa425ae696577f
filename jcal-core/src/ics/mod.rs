//! iCalendar feed parsing.
//!
//! Turns raw feed bytes into [`RawEvent`]s; classification into typed
//! events happens in [`crate::event`].

mod parse;

pub use parse::{IcsTime, RawEvent, parse_calendar};
