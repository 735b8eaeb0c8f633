use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::{WeatherError, truncate_body},
    model::{Query, Units, WeatherSnapshot},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::default(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, WEATHER_PATH)
    }
}

/// Error body the provider sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.endpoint();

        let mut params = query.params();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_str().to_string()));

        debug!(%url, %query, units = %self.units, "requesting current weather");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(%status, bytes = body.len(), "received weather response");

        if status == StatusCode::NOT_FOUND {
            let message = serde_json::from_str::<OwErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| truncate_body(&body));
            return Err(WeatherError::NotFound { message });
        }

        if !status.is_success() {
            warn!(%status, %query, "weather request failed");
            return Err(WeatherError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
