use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{UNKNOWN_CONDITION, WeatherQuery, WeatherReading},
};

use super::WeatherFetcher;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::network(format!("request to OpenWeather failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::network(format!("failed to read OpenWeather body: {e}")))?;

        debug!(city, status = status.as_u16(), bytes = body.len(), "OpenWeather responded");

        parse_response(status.as_u16(), &body)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError> {
        self.fetch_current(&query.city_name).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: i64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    wind: OwWind,
    sys: OwSys,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition_label = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .unwrap_or_else(|| UNKNOWN_CONDITION.to_string());

        WeatherReading {
            temperature_c: parsed.main.temp,
            min_temp_c: parsed.main.temp_min,
            max_temp_c: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            wind_speed_ms: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            sunrise_epoch_seconds: parsed.sys.sunrise,
            sunset_epoch_seconds: parsed.sys.sunset,
            condition_label,
        }
    }
}

/// Classify a raw `/weather` response into a reading or a fetch error.
pub fn parse_response(status: u16, body: &str) -> Result<WeatherReading, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::http(status, truncate_body(body)));
    }

    if body.trim().is_empty() {
        return Err(FetchError::empty_body("response body was empty"));
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::empty_body(format!("failed to parse OpenWeather JSON: {e}")))?;

    Ok(parsed.into())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
