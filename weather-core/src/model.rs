use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::WeatherError;

/// One user submission: the city to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    /// Build a query, rejecting blank city names. Surrounding whitespace is dropped.
    pub fn new(city: impl AsRef<str>) -> Result<Self, WeatherError> {
        let city = city.as_ref().trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        Ok(Self { city: city.to_owned() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// The `cod` field of an upstream response.
///
/// Upstream is inconsistent: the current-weather endpoint sends integers,
/// the forecast endpoint sends strings. Both forms are kept as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeCode {
    Int(i64),
    Text(String),
    Absent,
}

impl fmt::Display for EnvelopeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeCode::Int(code) => write!(f, "{code}"),
            EnvelopeCode::Text(code) => f.write_str(code),
            EnvelopeCode::Absent => f.write_str("none"),
        }
    }
}

/// Status fields shared by every upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub code: EnvelopeCode,
    pub message: Option<String>,
}

impl Envelope {
    pub fn from_json(value: &Value) -> Self {
        let code = match value.get("cod") {
            Some(Value::Number(n)) => n.as_i64().map_or(EnvelopeCode::Absent, EnvelopeCode::Int),
            Some(Value::String(s)) => EnvelopeCode::Text(s.clone()),
            _ => EnvelopeCode::Absent,
        };

        // On success the forecast endpoint sends `"message": 0`, so only strings count.
        let message = value.get("message").and_then(Value::as_str).map(str::to_owned);

        Self { code, message }
    }

    /// Current-weather "city not found": integer 404 only.
    pub fn is_not_found(&self) -> bool {
        self.code == EnvelopeCode::Int(404)
    }

    /// Forecast success: the string "200" only.
    pub fn is_forecast_success(&self) -> bool {
        matches!(&self.code, EnvelopeCode::Text(code) if code == "200")
    }

    pub fn message_or_unknown(&self) -> String {
        self.message.clone().unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions as reported upstream. Temperatures stay in Kelvin.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherReading {
    pub condition_main: String,
    pub condition_description: String,
    pub temperature_kelvin: f64,
    pub min_temperature_kelvin: f64,
    pub max_temperature_kelvin: f64,
    pub humidity_percent: i64,
    pub pressure_hpa: i64,
    pub wind_speed: f64,
    pub coordinates: Coordinates,
}

impl CurrentWeatherReading {
    pub fn from_json(value: &Value) -> Result<Self, WeatherError> {
        let parsed = OwCurrentResponse::deserialize(value)
            .map_err(|e| WeatherError::MissingField(e.to_string()))?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::MissingField("weather[0]".to_string()))?;

        Ok(Self {
            condition_main: condition.main,
            condition_description: condition.description,
            temperature_kelvin: parsed.main.temp,
            min_temperature_kelvin: parsed.main.temp_min,
            max_temperature_kelvin: parsed.main.temp_max,
            humidity_percent: parsed.main.humidity.round() as i64,
            pressure_hpa: parsed.main.pressure.round() as i64,
            wind_speed: parsed.wind.speed,
            coordinates: Coordinates { latitude: parsed.coord.lat, longitude: parsed.coord.lon },
        })
    }
}

/// One forecast bucket (typically three hours wide).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp_unix: i64,
    pub condition_main: String,
    pub min_temperature_kelvin: f64,
    pub max_temperature_kelvin: f64,
}

impl ForecastEntry {
    /// Parse the `list` array of a forecast response, keeping upstream order.
    pub fn list_from_json(value: &Value) -> Result<Vec<Self>, WeatherError> {
        let parsed = OwForecastResponse::deserialize(value)
            .map_err(|e| WeatherError::MissingField(e.to_string()))?;

        parsed
            .list
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let condition = entry
                    .weather
                    .into_iter()
                    .next()
                    .ok_or_else(|| WeatherError::MissingField(format!("list[{i}].weather[0]")))?;

                Ok(Self {
                    timestamp_unix: entry.dt,
                    condition_main: condition.main,
                    min_temperature_kelvin: entry.main.temp_min,
                    max_temperature_kelvin: entry.main.temp_max,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwForecastCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
