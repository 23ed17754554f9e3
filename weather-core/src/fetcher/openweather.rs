use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::FetchError;

use super::Fetcher;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the fetcher at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{endpoint}` and decode the body, regardless of HTTP status.
    async fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(network_error)?;

        let status = res.status();
        let body = res.text().await.map_err(network_error)?;
        debug!(%url, %status, body = %truncate_body(&body), "upstream response");

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Fetcher for OpenWeatherFetcher {
    #[instrument(skip(self))]
    async fn fetch_current_weather(&self, city: &str) -> Result<Value, FetchError> {
        self.get_json("weather", &[("q", city.to_string())]).await
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Value, FetchError> {
        self.get_json("forecast", &[("lat", latitude.to_string()), ("lon", longitude.to_string())])
            .await
    }
}

/// reqwest errors carry the request URL, and ours holds `appid`.
fn network_error(err: reqwest::Error) -> FetchError {
    FetchError::Network(err.without_url())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
