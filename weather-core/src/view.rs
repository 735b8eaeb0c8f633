//! Front-end views. Each one owns its local state and issues at most one
//! request per action; none of them depends on another.

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, error};

use crate::{
    Query, WeatherError, WeatherSnapshot,
    config::HomePosition,
    error::{CITY_NOT_FOUND, LOCATION_DENIED, LOCATION_FETCH_FAILED},
    model::Units,
    provider::WeatherProvider,
    render,
};

/// Where the current-location view gets its coordinates from.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<HomePosition, WeatherError>;
}

/// Coordinates known up front (flags or config). Absent coordinates behave like a refusal.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Option<HomePosition>);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<HomePosition, WeatherError> {
        self.0.ok_or_else(|| {
            WeatherError::LocationUnavailable("no coordinates given and no home position configured".into())
        })
    }
}

/// Search by city name.
#[derive(Debug, Default)]
pub struct SearchView {
    pub city: String,
    pub weather: Option<WeatherSnapshot>,
    pub error: Option<String>,
}

impl SearchView {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into(), ..Self::default() }
    }

    /// Runs the lookup for the current city. Does nothing when the city is blank.
    ///
    /// Surrounding whitespace is trimmed on purpose: a whitespace-only city counts as
    /// blank, and the provider is sent the trimmed name.
    pub async fn search<P: WeatherProvider + ?Sized>(&mut self, provider: &P) {
        let city = self.city.trim();
        if city.is_empty() {
            return;
        }

        self.error = None;
        match provider.fetch(&Query::City(city.to_string())).await {
            Ok(snapshot) => self.weather = Some(snapshot),
            Err(err) => {
                debug!(%city, error = %err, "city search failed");
                self.error = Some(CITY_NOT_FOUND.to_string());
                self.weather = None;
            }
        }
    }

    pub fn render(&self, units: Units) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        if let Some(weather) = &self.weather {
            lines.extend(render::render_full(weather, units));
        }
        lines
    }
}

pub const LOCATION_HEADING: &str = "Weather of Current Location";

/// Weather at the user's position, with a collapsible details block.
#[derive(Debug, Default)]
pub struct LocationView {
    pub weather: Option<WeatherSnapshot>,
    pub error: Option<String>,
    pub show_details: bool,
}

impl LocationView {
    pub async fn locate<P, S>(&mut self, provider: &P, position: &S)
    where
        P: WeatherProvider + ?Sized,
        S: PositionSource + ?Sized,
    {
        let pos = match position.current_position().await {
            Ok(pos) => pos,
            Err(err) => {
                debug!(error = %err, "position unavailable");
                self.error = Some(LOCATION_DENIED.to_string());
                return;
            }
        };

        match provider.fetch(&Query::from(pos)).await {
            Ok(snapshot) => self.weather = Some(snapshot),
            Err(err) => {
                debug!(lat = pos.lat, lon = pos.lon, error = %err, "current location lookup failed");
                self.error = Some(LOCATION_FETCH_FAILED.to_string());
            }
        }
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn render(&self, units: Units) -> Vec<String> {
        let mut lines = vec![LOCATION_HEADING.to_string()];
        if let Some(error) = &self.error {
            lines.push(error.clone());
        }
        if let Some(weather) = &self.weather {
            if self.show_details {
                lines.extend(render::render_full(weather, units));
            } else {
                lines.push(render::render_summary(weather));
            }
        }
        lines
    }
}

pub const LOADING: &str = "Loading...";

/// Lookup by provider location id. Failures are only logged.
#[derive(Debug)]
pub struct DetailsView {
    pub id: u64,
    pub weather: Option<WeatherSnapshot>,
}

impl DetailsView {
    pub fn new(id: u64) -> Self {
        Self { id, weather: None }
    }

    pub async fn load<P: WeatherProvider + ?Sized>(&mut self, provider: &P) {
        match provider.fetch(&Query::LocationId(self.id)).await {
            Ok(snapshot) => self.weather = Some(snapshot),
            Err(err) => error!(id = self.id, error = %err, "failed to load weather details"),
        }
    }

    pub fn render(&self, units: Units) -> Vec<String> {
        match &self.weather {
            Some(weather) => render::render_details(weather, units),
            None => vec![LOADING.to_string()],
        }
    }
}
