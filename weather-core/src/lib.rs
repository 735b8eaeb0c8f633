//! Core library for the `weather` lookup client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather snapshot model and the OpenWeather provider
//! - A state store for city lookups and the views that render results
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod store;
pub mod view;

pub use config::{Config, HomePosition};
pub use error::WeatherError;
pub use model::{Query, Units, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use store::{WeatherAction, WeatherState, WeatherStore};
pub use view::{DetailsView, FixedPosition, LocationView, PositionSource, SearchView};
