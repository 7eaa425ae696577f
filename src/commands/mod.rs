pub mod check;
pub mod config;
pub mod generate;

pub use crate::utils::tui::create_spinner;
