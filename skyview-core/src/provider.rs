use crate::{
    Config, FetchError, WeatherQuery, WeatherReading, provider::openweather::DEFAULT_BASE_URL,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Anything that can turn a query into a reading.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, FetchError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `skyview configure` or set {} in the environment.",
            crate::config::API_KEY_ENV
        )
    })?;

    let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

    Ok(OpenWeatherClient::with_base_url(api_key.to_owned(), base_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = client_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `skyview configure`"));
    }

    #[test]
    fn client_from_config_uses_default_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Config::default()
        };

        let client = client_from_config(&cfg).expect("key is configured");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn client_from_config_honours_base_url_override() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:8080/data/2.5/".into()),
            ..Config::default()
        };

        let client = client_from_config(&cfg).expect("key is configured");
        assert_eq!(client.base_url(), "http://localhost:8080/data/2.5");
    }
}
