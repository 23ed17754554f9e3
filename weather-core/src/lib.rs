//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetcher and the [`Fetcher`] seam it implements
//! - Presenters that map upstream JSON to display blocks
//! - The two-stage submission pipeline (current weather, then forecast)
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod symbols;
pub mod units;

pub use config::Config;
pub use display::{Block, Metric, Panel, Report, Table};
pub use error::{FetchError, WeatherError};
pub use fetcher::{Fetcher, OpenWeatherFetcher};
pub use model::{CurrentWeatherReading, Envelope, EnvelopeCode, ForecastEntry, WeatherQuery};
pub use pipeline::{SubmitOptions, submit};
