//! Weather category → decorative symbol.

/// Symbol for categories missing from [`SYMBOLS`].
pub const UNKNOWN_SYMBOL: &str = "❓";

/// Upstream `weather[].main` vocabulary.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("Clear", "☀️"),
    ("Clouds", "☁️"),
    ("Rain", "🌧️"),
    ("Drizzle", "🌦️"),
    ("Thunderstorm", "⛈️"),
    ("Snow", "❄️"),
    ("Mist", "🌫️"),
    ("Smoke", "💨"),
    ("Haze", "🌫️"),
    ("Dust", "🌪️"),
    ("Fog", "🌫️"),
    ("Sand", "🏜️"),
    ("Ash", "🌋"),
    ("Squall", "🌬️"),
    ("Tornado", "🌪️"),
];

/// Look up the symbol for a category. Matching is exact, as upstream sends it.
pub fn symbol_for(category: &str) -> &'static str {
    SYMBOLS
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(UNKNOWN_SYMBOL, |&(_, symbol)| symbol)
}
