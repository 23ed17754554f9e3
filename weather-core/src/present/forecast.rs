use std::{collections::HashSet, fmt::Display};

use chrono::{DateTime, TimeZone};
use serde_json::Value;
use tracing::debug;

use crate::{
    display::Table,
    error::WeatherError,
    model::{Envelope, ForecastEntry},
    symbols::symbol_for,
    units::{capitalize, forecast_celsius},
};

pub const FORECAST_HEADER: [&str; 4] = ["Day", "Description", "Min temp", "Max temp"];

/// `Monday, June 05` for a unix timestamp, in the given zone.
pub fn day_label<Tz>(timestamp: i64, tz: &Tz) -> Result<String, WeatherError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc = DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| WeatherError::MissingField(format!("dt ({timestamp} out of range)")))?;

    Ok(utc.with_timezone(tz).format("%A, %B %d").to_string())
}

/// Build the weekly table from a forecast response.
///
/// Only a string `cod` of `"200"` counts as success. Buckets are collapsed
/// to one row per local calendar day, keeping the first bucket seen.
pub fn weekly_forecast<Tz>(body: &Value, tz: &Tz) -> Result<Table, WeatherError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let envelope = Envelope::from_json(body);
    if !envelope.is_forecast_success() {
        return Err(WeatherError::ForecastUnavailable {
            code: envelope.code.clone(),
            message: envelope.message_or_unknown(),
        });
    }

    let entries = ForecastEntry::list_from_json(body)?;
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for entry in &entries {
        let label = day_label(entry.timestamp_unix, tz)?;
        if !seen.insert(label.clone()) {
            continue;
        }

        let symbol = symbol_for(&entry.condition_main);
        rows.push(vec![
            label,
            format!("{}{symbol}", capitalize(&entry.condition_main)),
            forecast_celsius(entry.min_temperature_kelvin),
            forecast_celsius(entry.max_temperature_kelvin),
        ]);
    }

    debug!(buckets = entries.len(), days = rows.len(), "collapsed forecast buckets");

    Ok(Table { header: FORECAST_HEADER.iter().map(|h| h.to_string()).collect(), rows })
}
