use thiserror::Error;

use crate::model::EnvelopeCode;

/// Failures while talking to the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response body.
    #[error("Failed to reach the weather service: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not valid JSON.
    #[error("Weather service returned a body that is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything that can go wrong during one submission.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("City name must not be empty")]
    EmptyCity,

    /// Upstream could not resolve the city. Carries the upstream message verbatim.
    #[error("{message}")]
    NotFound { message: String },

    /// An expected field was absent or had the wrong shape.
    #[error("Invalid city or response, missing field: {0}")]
    MissingField(String),

    /// The forecast call went through but upstream signalled non-success.
    #[error("Forecast unavailable (code {code}): {message}")]
    ForecastUnavailable { code: EnvelopeCode, message: String },
}

impl WeatherError {
    /// Whether this failure should be shown as a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, WeatherError::ForecastUnavailable { .. })
    }
}
