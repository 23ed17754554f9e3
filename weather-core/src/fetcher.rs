use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::error::FetchError;

pub mod openweather;

pub use openweather::{DEFAULT_BASE_URL, OpenWeatherFetcher};

/// Source of raw upstream responses.
///
/// Implementations return the decoded JSON body as-is, whatever its
/// envelope code says. Interpreting `cod` is the presenter's job.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch_current_weather(&self, city: &str) -> Result<Value, FetchError>;

    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Value, FetchError>;
}
