//! Condition label → presentation theme.

use serde::Serialize;

/// Visual style picked for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTheme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl PresentationTheme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PresentationTheme::Sunny => "sunny",
            PresentationTheme::Cloudy => "cloudy",
            PresentationTheme::Rainy => "rainy",
            PresentationTheme::Snowy => "snowy",
        }
    }

    /// Background image key.
    pub const fn background(&self) -> &'static str {
        match self {
            PresentationTheme::Sunny => "sunny_background",
            PresentationTheme::Cloudy => "cloud_background",
            PresentationTheme::Rainy => "rain_background",
            PresentationTheme::Snowy => "snow_background",
        }
    }

    /// Animation key.
    pub const fn animation(&self) -> &'static str {
        match self {
            PresentationTheme::Sunny => "sun",
            PresentationTheme::Cloudy => "cloud",
            PresentationTheme::Rainy => "rain",
            PresentationTheme::Snowy => "snow",
        }
    }

    pub const fn all() -> &'static [PresentationTheme] {
        &[
            PresentationTheme::Sunny,
            PresentationTheme::Cloudy,
            PresentationTheme::Rainy,
            PresentationTheme::Snowy,
        ]
    }
}

impl std::fmt::Display for PresentationTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match; anything unrecognised falls back to sunny.
pub fn classify_theme(label: &str) -> PresentationTheme {
    match label {
        "Clear Sky" | "Sunny" | "Clear" => PresentationTheme::Sunny,
        "Partly Clouds" | "Clouds" | "Overcast" | "Mist" | "Foggy" => PresentationTheme::Cloudy,
        "Light Rain" | "Drizzle" | "Moderate Rain" | "Showers" | "Heavy Rain" => {
            PresentationTheme::Rainy
        }
        "Light Snow" | "Moderate Snow" | "Heavy Snow" | "Blizzard" => PresentationTheme::Snowy,
        _ => PresentationTheme::Sunny,
    }
}
