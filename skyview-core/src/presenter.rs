//! Turns a decoded reading into display strings.
//!
//! Everything here is a pure function of `(reading, city_name, now)`. The
//! time zone carried by `now` decides how sunrise/sunset and the calendar
//! fields are rendered.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::{
    error::{FailureReason, FetchError, PresentationError},
    model::WeatherReading,
    theme::{PresentationTheme, classify_theme},
};

/// Formatted values handed to a render sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayViewModel {
    pub city_name: String,
    pub temperature_text: String,
    pub min_temp_text: String,
    pub max_temp_text: String,
    pub humidity_text: String,
    pub wind_speed_text: String,
    pub pressure_text: String,
    pub sunrise_text: String,
    pub sunset_text: String,
    pub condition_text: String,
    pub day_name: String,
    pub date_text: String,
    pub theme: PresentationTheme,
}

/// Build a view model, or fail when there is no reading to show.
pub fn present<Tz>(
    reading: Option<&WeatherReading>,
    city_name: &str,
    now: &DateTime<Tz>,
) -> Result<DisplayViewModel, PresentationError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(reading) = reading else {
        return Err(PresentationError::new(
            FailureReason::EmptyBody,
            format!("no weather reading available for '{city_name}'"),
        ));
    };

    let tz = now.timezone();

    Ok(DisplayViewModel {
        city_name: city_name.to_string(),
        temperature_text: format!("{}°C", format_number(reading.temperature_c)),
        min_temp_text: format!("Min Temp: {} °C", format_number(reading.min_temp_c)),
        max_temp_text: format!("Max Temp: {} °C", format_number(reading.max_temp_c)),
        humidity_text: format!("{} %", reading.humidity_pct),
        wind_speed_text: format!("{} m/s", format_number(reading.wind_speed_ms)),
        pressure_text: format!("{} hPa", format_number(reading.pressure_hpa)),
        sunrise_text: clock_time(reading.sunrise_epoch_seconds, &tz)?,
        sunset_text: clock_time(reading.sunset_epoch_seconds, &tz)?,
        condition_text: reading.condition_label.clone(),
        day_name: now.format("%A").to_string(),
        date_text: now.format("%d %B %Y").to_string(),
        theme: classify_theme(&reading.condition_label),
    })
}

/// Collapse a fetch outcome into the presenter's contract.
pub fn present_outcome<Tz>(
    outcome: Result<WeatherReading, FetchError>,
    city_name: &str,
    now: &DateTime<Tz>,
) -> Result<DisplayViewModel, PresentationError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let reading = outcome.map_err(PresentationError::from)?;
    present(Some(&reading), city_name, now)
}

/// `HH:mm` for an epoch-seconds timestamp, rendered in `tz`.
fn clock_time<Tz>(epoch_seconds: i64, tz: &Tz) -> Result<String, PresentationError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = epoch_seconds
        .checked_mul(1000)
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| {
            PresentationError::new(
                FailureReason::InvalidReading,
                format!("timestamp {epoch_seconds} is out of range"),
            )
        })?;

    Ok(utc.with_timezone(tz).format("%H:%M").to_string())
}

/// JVM-style double text: shortest digits, at least one fractional digit,
/// `E` notation outside `[1e-3, 1e7)`.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-3..1e7).contains(&magnitude) {
        let sci = format!("{value:E}");
        return match sci.split_once('E') {
            Some((mantissa, exp)) if !mantissa.contains('.') => format!("{mantissa}.0E{exp}"),
            _ => sci,
        };
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn reading() -> WeatherReading {
        WeatherReading {
            temperature_c: 30.5,
            min_temp_c: 28.0,
            max_temp_c: 33.0,
            humidity_pct: 40,
            wind_speed_ms: 3.2,
            pressure_hpa: 1010.0,
            sunrise_epoch_seconds: 1_700_000_000,
            sunset_epoch_seconds: 1_700_040_000,
            condition_label: "Clear Sky".to_string(),
        }
    }

    fn friday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn missing_reading_is_an_error() {
        let err = present(None, "Paris", &friday()).unwrap_err();
        assert_eq!(err.reason, FailureReason::EmptyBody);
        assert!(err.message.contains("Paris"));
    }

    #[test]
    fn formats_every_field() {
        let vm = present(Some(&reading()), "Hyderabad", &friday()).unwrap();

        assert_eq!(vm.city_name, "Hyderabad");
        assert_eq!(vm.temperature_text, "30.5°C");
        assert_eq!(vm.min_temp_text, "Min Temp: 28.0 °C");
        assert_eq!(vm.max_temp_text, "Max Temp: 33.0 °C");
        assert_eq!(vm.humidity_text, "40 %");
        assert_eq!(vm.wind_speed_text, "3.2 m/s");
        assert_eq!(vm.pressure_text, "1010.0 hPa");
        assert_eq!(vm.condition_text, "Clear Sky");
        assert_eq!(vm.theme, PresentationTheme::Sunny);
    }

    #[test]
    fn sun_times_treat_field_as_seconds() {
        let vm = present(Some(&reading()), "Hyderabad", &friday()).unwrap();

        // 1_700_000_000 s is 2023-11-14T22:13:20Z; read as millis it would be 16:13.
        assert_eq!(vm.sunrise_text, "22:13");
        assert_eq!(vm.sunset_text, "09:20");
    }

    #[test]
    fn sun_times_follow_the_clock_time_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let now = friday().with_timezone(&ist);

        let vm = present(Some(&reading()), "Hyderabad", &now).unwrap();
        assert_eq!(vm.sunrise_text, "03:43");
        assert_eq!(vm.sunset_text, "14:50");
    }

    #[test]
    fn day_and_date_come_from_now() {
        let vm = present(Some(&reading()), "Hyderabad", &friday()).unwrap();

        assert_eq!(vm.day_name, "Friday");
        assert_eq!(vm.date_text, "15 March 2024");
    }

    #[test]
    fn presenting_is_repeatable() {
        let r = reading();
        let now = friday();

        let first = present(Some(&r), "Hyderabad", &now).unwrap();
        let second = present(Some(&r), "Hyderabad", &now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn theme_follows_condition() {
        let mut r = reading();
        r.condition_label = "Heavy Snow".to_string();

        let vm = present(Some(&r), "Oslo", &friday()).unwrap();
        assert_eq!(vm.theme, PresentationTheme::Snowy);
        assert_eq!(vm.condition_text, "Heavy Snow");
    }

    #[test]
    fn out_of_range_timestamp_is_invalid_reading() {
        let mut r = reading();
        r.sunset_epoch_seconds = i64::MAX;

        let err = present(Some(&r), "Nowhere", &friday()).unwrap_err();
        assert_eq!(err.reason, FailureReason::InvalidReading);
    }

    #[test]
    fn fetch_failure_collapses_with_reason() {
        let err = present_outcome(Err(FetchError::http(404, "city not found")), "Atlantis", &friday())
            .unwrap_err();

        assert_eq!(err.reason, FailureReason::HttpError);
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn number_formatting_matches_display_rules() {
        assert_eq!(format_number(28.0), "28.0");
        assert_eq!(format_number(30.5), "30.5");
        assert_eq!(format_number(-4.25), "-4.25");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(0.001), "0.001");
        assert_eq!(format_number(9_999_999.0), "9999999.0");
    }

    #[test]
    fn number_formatting_switches_to_exponent_outside_plain_range() {
        assert_eq!(format_number(1e7), "1.0E7");
        assert_eq!(format_number(12_345_678.9), "1.23456789E7");
        assert_eq!(format_number(0.0001), "1.0E-4");
        assert_eq!(format_number(-0.00025), "-2.5E-4");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
