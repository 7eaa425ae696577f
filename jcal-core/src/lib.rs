//! Core of jcal: turns an iCalendar feed into a two-page, twelve-month
//! wall calendar.
//!
//! The pipeline is:
//! - `feed` downloads and validates the feed, `ics` parses it
//! - `event` classifies each entry, `agenda` expands events into day
//!   records and month-scoped footnote legends
//! - `planner` places months on pages, `layout` holds the page geometry
//! - `render` draws onto a `Surface`, `document` produces the PDF

pub mod agenda;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod layout;
pub mod locale;
pub mod planner;
pub mod render;
pub mod window;

pub use agenda::YearAgenda;
pub use config::JcalConfig;
pub use document::{build_document, default_file_name, persist_document};
pub use error::{JcalError, JcalResult};
pub use event::{Event, EventKind};
pub use feed::{fetch_feed, load_events, validate_feed};
pub use locale::Language;
pub use render::RenderOptions;
pub use window::CalendarWindow;
