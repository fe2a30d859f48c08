/// Label used when the provider sends no condition descriptors.
pub const UNKNOWN_CONDITION: &str = "unknown";

/// A validated city lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city_name: String,
}

impl WeatherQuery {
    /// Trim raw input; blank or absent input yields no query.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            city_name: trimmed.to_string(),
        })
    }
}

/// Current conditions for one city, as decoded from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub humidity_pct: i64,
    pub wind_speed_ms: f64,
    pub pressure_hpa: f64,
    pub sunrise_epoch_seconds: i64,
    pub sunset_epoch_seconds: i64,
    pub condition_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_city() {
        let query = WeatherQuery::parse(Some("  Paris \n")).expect("non-blank input");
        assert_eq!(query.city_name, "Paris");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(WeatherQuery::parse(None), None);
        assert_eq!(WeatherQuery::parse(Some("")), None);
        assert_eq!(WeatherQuery::parse(Some(" \t  ")), None);
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let query = WeatherQuery::parse(Some(" New York ")).expect("non-blank input");
        assert_eq!(query.city_name, "New York");
    }
}
