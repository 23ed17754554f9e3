//! Turns decoded upstream JSON into display blocks.

pub mod current;
pub mod forecast;

pub use current::{CurrentSummary, summarize_current};
pub use forecast::{FORECAST_HEADER, day_label, weekly_forecast};
