//! Predictable-state container for city lookups.
//!
//! State only changes through [`reduce`]. [`WeatherStore`] wraps the reducer,
//! owns the provider, and publishes every new state on a `watch` channel so a
//! front-end can re-render only when something changed.

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{
    Query, WeatherSnapshot,
    error::CITY_NOT_FOUND,
    provider::WeatherProvider,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub data: Option<WeatherSnapshot>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherAction {
    Pending,
    Fulfilled(WeatherSnapshot),
    Rejected(String),
    Clear,
}

impl WeatherAction {
    fn name(&self) -> &'static str {
        match self {
            WeatherAction::Pending => "weather/fetchWeather/pending",
            WeatherAction::Fulfilled(_) => "weather/fetchWeather/fulfilled",
            WeatherAction::Rejected(_) => "weather/fetchWeather/rejected",
            WeatherAction::Clear => "weather/clearWeather",
        }
    }
}

/// Pure transition function.
pub fn reduce(state: &WeatherState, action: WeatherAction) -> WeatherState {
    let mut next = state.clone();
    match action {
        WeatherAction::Pending => {
            next.loading = true;
            next.error = None;
        }
        WeatherAction::Fulfilled(snapshot) => {
            next.loading = false;
            next.data = Some(snapshot);
        }
        WeatherAction::Rejected(message) => {
            next.loading = false;
            next.error = Some(message);
        }
        WeatherAction::Clear => {
            next.data = None;
            next.error = None;
        }
    }
    next
}

#[derive(Debug)]
pub struct WeatherStore<P> {
    provider: P,
    state: watch::Sender<WeatherState>,
}

impl<P: WeatherProvider> WeatherStore<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(WeatherState::default());
        Self { provider, state }
    }

    /// Current state.
    pub fn state(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: WeatherAction) {
        debug!(action = action.name(), "dispatch");
        self.state.send_modify(|state| {
            *state = reduce(state, action);
            trace!(?state, "state updated");
        });
    }

    /// Look up `city`, moving through pending and then exactly one of fulfilled/rejected.
    pub async fn fetch_weather(&self, city: &str) {
        self.dispatch(WeatherAction::Pending);

        match self.provider.fetch(&Query::City(city.to_string())).await {
            Ok(snapshot) => self.dispatch(WeatherAction::Fulfilled(snapshot)),
            Err(err) => {
                debug!(%city, error = %err, "city lookup rejected");
                self.dispatch(WeatherAction::Rejected(CITY_NOT_FOUND.to_string()));
            }
        }
    }

    pub fn clear_weather(&self) {
        self.dispatch(WeatherAction::Clear);
    }
}
