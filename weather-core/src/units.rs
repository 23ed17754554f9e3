//! Display-time conversions. Readings stay in Kelvin until they reach here.

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// `27.00 °C`, used by the current-weather panels.
pub fn current_celsius(kelvin: f64) -> String {
    format!("{:.2} °C", kelvin_to_celsius(kelvin))
}

/// `27.0°C`, used by the forecast table.
pub fn forecast_celsius(kelvin: f64) -> String {
    format!("{:.1}°C", kelvin_to_celsius(kelvin))
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
