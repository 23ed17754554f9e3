//! One submission: current weather, then the forecast for its coordinates.

use std::fmt::Display;

use chrono::TimeZone;
use tracing::{info, instrument, warn};

use crate::{
    display::{Block, Report},
    error::WeatherError,
    fetcher::Fetcher,
    model::WeatherQuery,
    present::{summarize_current, weekly_forecast},
};

pub const FORECAST_HEADING: &str = "Weekly forecast";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    pub include_forecast: bool,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self { include_forecast: true }
    }
}

pub fn report_title(query: &WeatherQuery) -> String {
    format!("Weather of {} is:", query.city())
}

/// Run a submission end to end. Never fails: every problem becomes an
/// error or warning block in the section it belongs to.
#[instrument(skip(fetcher, query, tz, options), fields(city = query.city()))]
pub async fn submit<F, Tz>(
    fetcher: &F,
    query: &WeatherQuery,
    tz: &Tz,
    options: SubmitOptions,
) -> Report
where
    F: Fetcher + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut report = Report::new(report_title(query));

    let current = fetcher
        .fetch_current_weather(query.city())
        .await
        .map_err(WeatherError::from)
        .and_then(|body| summarize_current(&body));

    let summary = match current {
        Ok(summary) => summary,
        Err(err) => {
            warn!(error = %err, "current weather section failed");
            report.push(block_for(&err));
            return report;
        }
    };

    let coords = summary.coordinates();
    report.push(Block::Panels(summary.panels));
    info!(lat = coords.latitude, lon = coords.longitude, "current weather rendered");

    if !options.include_forecast {
        return report;
    }

    report.push(Block::Heading(FORECAST_HEADING.to_string()));

    let forecast = fetcher
        .fetch_forecast(coords.latitude, coords.longitude)
        .await
        .map_err(WeatherError::from)
        .and_then(|body| weekly_forecast(&body, tz));

    match forecast {
        Ok(table) => {
            info!(days = table.rows.len(), "forecast rendered");
            report.push(Block::Table(table));
        }
        Err(err) => {
            warn!(error = %err, "forecast section failed");
            report.push(block_for(&err));
        }
    }

    report
}

fn block_for(err: &WeatherError) -> Block {
    if err.is_warning() {
        Block::Warning(err.to_string())
    } else {
        Block::Error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{display::Table, error::FetchError};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tracing::{
        Subscriber,
        field::{Field, Visit},
        span,
    };
    use tracing_subscriber::{Layer, Registry, layer::Context, prelude::*};

    /// Canned responses, plus a record of the calls made.
    #[derive(Debug)]
    struct StubFetcher {
        current: fn() -> Result<Value, FetchError>,
        forecast: fn() -> Result<Value, FetchError>,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(
            current: fn() -> Result<Value, FetchError>,
            forecast: fn() -> Result<Value, FetchError>,
        ) -> Self {
            Self { current, forecast, calls: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch_current_weather(&self, city: &str) -> Result<Value, FetchError> {
            self.calls.lock().unwrap().push(format!("current:{city}"));
            (self.current)()
        }

        async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Value, FetchError> {
            self.calls.lock().unwrap().push(format!("forecast:{latitude},{longitude}"));
            (self.forecast)()
        }
    }

    fn current_ok() -> Result<Value, FetchError> {
        Ok(json!({
            "coord": { "lon": 72.58, "lat": 23.03 },
            "weather": [{ "main": "Clear", "description": "clear sky" }],
            "main": { "temp": 300.15, "temp_min": 299.15, "temp_max": 301.15, "humidity": 40, "pressure": 1012 },
            "wind": { "speed": 3.6 },
            "cod": 200
        }))
    }

    fn current_not_found() -> Result<Value, FetchError> {
        Ok(json!({ "cod": 404, "message": "city not found" }))
    }

    fn current_garbage() -> Result<Value, FetchError> {
        Err(serde_json::from_str::<Value>("<html>").unwrap_err().into())
    }

    // Two buckets on 2023-06-05 (UTC) with different minimums.
    fn forecast_ok() -> Result<Value, FetchError> {
        Ok(json!({
            "cod": "200",
            "message": 0,
            "list": [
                { "dt": 1_685_944_800, "main": { "temp_min": 290.15, "temp_max": 300.15 }, "weather": [{ "main": "Clear" }] },
                { "dt": 1_685_955_600, "main": { "temp_min": 280.15, "temp_max": 300.15 }, "weather": [{ "main": "Clear" }] }
            ]
        }))
    }

    fn forecast_unauthorized() -> Result<Value, FetchError> {
        Ok(json!({ "cod": "401", "message": "Invalid API key" }))
    }

    fn forecast_malformed() -> Result<Value, FetchError> {
        Ok(json!({ "cod": "200", "list": "nope" }))
    }

    fn unreachable_forecast() -> Result<Value, FetchError> {
        panic!("forecast must not be requested")
    }

    fn query() -> WeatherQuery {
        WeatherQuery::new("Ahmedabad").unwrap()
    }

    #[tokio::test]
    async fn renders_summary_then_forecast() {
        let fetcher = StubFetcher::new(current_ok, forecast_ok);

        let report = submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert_eq!(report.title, "Weather of Ahmedabad is:");
        assert_eq!(report.blocks.len(), 3);
        let Block::Panels(panels) = &report.blocks[0] else { panic!("{:?}", report.blocks) };
        assert_eq!(panels[0].metrics[0].value, "Clear☀️");
        assert_eq!(panels[0].metrics[1].value, "27.00 °C");
        assert_eq!(report.blocks[1], Block::Heading(FORECAST_HEADING.to_string()));
        let Block::Table(Table { rows, .. }) = &report.blocks[2] else { panic!("{:?}", report.blocks) };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], "17.0°C");

        assert_eq!(fetcher.calls(), vec!["current:Ahmedabad", "forecast:23.03,72.58"]);
    }

    #[tokio::test]
    async fn not_found_renders_single_error_and_skips_forecast() {
        let fetcher = StubFetcher::new(current_not_found, unreachable_forecast);

        let report = submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert_eq!(report.blocks, vec![Block::Error("city not found".to_string())]);
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn decode_failure_is_an_error_block() {
        let fetcher = StubFetcher::new(current_garbage, unreachable_forecast);

        let report = submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert_eq!(report.blocks.len(), 1);
        assert!(report.has_errors());
    }

    #[tokio::test]
    async fn forecast_warning_keeps_current_summary() {
        let fetcher = StubFetcher::new(current_ok, forecast_unauthorized);

        let report = submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert!(matches!(report.blocks[0], Block::Panels(_)));
        assert_eq!(
            report.blocks.last(),
            Some(&Block::Warning("Forecast unavailable (code 401): Invalid API key".to_string()))
        );
        assert!(!report.has_errors());
    }

    #[tokio::test]
    async fn malformed_forecast_is_error_scoped_to_forecast() {
        let fetcher = StubFetcher::new(current_ok, forecast_malformed);

        let report = submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert!(matches!(report.blocks[0], Block::Panels(_)));
        assert!(matches!(report.blocks.last(), Some(Block::Error(_))));
    }

    #[tokio::test]
    async fn forecast_can_be_skipped() {
        let fetcher = StubFetcher::new(current_ok, unreachable_forecast);
        let options = SubmitOptions { include_forecast: false };

        let report = submit(&fetcher, &query(), &Utc, options).await;

        assert_eq!(report.blocks.len(), 1);
        assert_eq!(fetcher.calls(), vec!["current:Ahmedabad"]);
    }

    /// Collects the field names of every span opened while installed.
    #[derive(Clone, Default)]
    struct SpanFields(Arc<Mutex<Vec<String>>>);

    struct FieldNames<'a>(&'a mut Vec<String>);

    impl Visit for FieldNames<'_> {
        fn record_debug(&mut self, field: &Field, _value: &dyn std::fmt::Debug) {
            self.0.push(field.name().to_string());
        }
    }

    impl<S: Subscriber> Layer<S> for SpanFields {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            attrs.record(&mut FieldNames(&mut self.0.lock().unwrap()));
        }
    }

    #[tokio::test]
    async fn submit_span_records_city_once() {
        let fields = SpanFields::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(fields.clone()));
        let fetcher = StubFetcher::new(current_ok, forecast_ok);

        submit(&fetcher, &query(), &Utc, SubmitOptions::default()).await;

        assert_eq!(*fields.0.lock().unwrap(), vec!["city"]);
    }
}
