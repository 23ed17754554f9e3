use serde_json::Value;

use crate::{
    display::{Metric, Panel},
    error::WeatherError,
    model::{Coordinates, CurrentWeatherReading, Envelope},
    symbols::symbol_for,
    units::{capitalize, current_celsius},
};

/// The rendered current-weather section plus what the forecast stage needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSummary {
    pub reading: CurrentWeatherReading,
    pub panels: Vec<Panel>,
}

impl CurrentSummary {
    pub fn coordinates(&self) -> Coordinates {
        self.reading.coordinates
    }
}

/// Map a current-weather response to its two metric panels.
///
/// Integer `cod` 404 short-circuits into [`WeatherError::NotFound`] with the
/// upstream message. Anything structurally off becomes
/// [`WeatherError::MissingField`].
pub fn summarize_current(body: &Value) -> Result<CurrentSummary, WeatherError> {
    let envelope = Envelope::from_json(body);
    if envelope.is_not_found() {
        return Err(WeatherError::NotFound { message: envelope.message_or_unknown() });
    }

    let reading = CurrentWeatherReading::from_json(body)?;
    let panels = panels_for(&reading);

    Ok(CurrentSummary { reading, panels })
}

fn panels_for(reading: &CurrentWeatherReading) -> Vec<Panel> {
    let condition = format!("{}{}", reading.condition_main, symbol_for(&reading.condition_main));

    let group_a = Panel {
        metrics: vec![
            Metric::new("Weather", condition),
            Metric::new("Temperature 🌡️", current_celsius(reading.temperature_kelvin)),
            Metric::new("Min Temp 🥶", current_celsius(reading.min_temperature_kelvin)),
            Metric::new("Wind speed 🎐", format!("{} m/s", reading.wind_speed)),
        ],
    };

    let group_b = Panel {
        metrics: vec![
            Metric::new("Description", capitalize(&reading.condition_description)),
            Metric::new("Humidity 💧", format!("{}%", reading.humidity_percent)),
            Metric::new("Max Temp 🥵", current_celsius(reading.max_temperature_kelvin)),
            Metric::new("Pressure", format!("{} hPa", reading.pressure_hpa)),
        ],
    };

    vec![group_a, group_b]
}
