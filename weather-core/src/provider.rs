use crate::{Config, Query, WeatherError, WeatherSnapshot, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current-weather snapshots.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?;

    Ok(OpenWeatherProvider::new(api_key.to_owned())
        .with_base_url(config.base_url())
        .with_units(config.units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
        assert!(err.to_string().contains("Hint: run `weather configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".to_string());

        assert!(matches!(provider_from_config(&cfg), Err(WeatherError::MissingApiKey)));
    }
}
