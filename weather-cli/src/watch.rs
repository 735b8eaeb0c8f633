use tokio::sync::watch;
use weather_core::{Units, WeatherProvider, WeatherState, WeatherStore, render};

pub const CLEARED: &str = "Cleared.";

/// What the prompt loop should do after one line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Store-backed lookup session, one line of input at a time.
#[derive(Debug)]
pub struct WatchSession<P> {
    store: WeatherStore<P>,
    rx: watch::Receiver<WeatherState>,
    last_city: Option<String>,
    units: Units,
}

impl<P: WeatherProvider> WatchSession<P> {
    pub fn new(provider: P, units: Units) -> Self {
        let store = WeatherStore::new(provider);
        let rx = store.subscribe();
        Self { store, rx, last_city: None, units }
    }

    /// `quit`/`exit` stop, `clear` resets, blank refreshes the last city, anything else is looked up.
    /// Each rendered state is handed to `emit` as it arrives.
    pub async fn handle<F>(&mut self, input: &str, mut emit: F) -> Step
    where
        F: FnMut(&[String]),
    {
        let city = match input.trim() {
            "quit" | "exit" => return Step::Quit,
            "clear" => {
                self.store.clear_weather();
                self.last_city = None;
                self.rx.mark_unchanged();
                emit(&[CLEARED.to_string()]);
                return Step::Continue;
            }
            "" => match &self.last_city {
                Some(city) => city.clone(),
                None => return Step::Continue,
            },
            city => city.to_string(),
        };

        let units = self.units;
        let rx = &mut self.rx;
        tokio::join!(self.store.fetch_weather(&city), async {
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                emit(&render::render_state(&state, units));
                if !state.loading {
                    break;
                }
            }
        });

        self.last_city = Some(city);
        Step::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use weather_core::{
        Query, WeatherError, WeatherSnapshot,
        error::CITY_NOT_FOUND,
        model::{Condition, Main, Sys, Wind},
        view::LOADING,
    };

    #[derive(Debug)]
    struct StubProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            id: Some(1),
            name: name.to_string(),
            sys: Sys { country: "GB".into(), sunrise: 1_699_946_000, sunset: 1_699_978_800 },
            weather: vec![Condition { description: "clear sky".into() }],
            main: Main { temp: 10.0, feels_like: None, humidity: 50 },
            wind: Wind { speed: 2.0 },
            rain: None,
            snow: None,
            timezone: 0,
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch(&self, query: &Query) -> Result<WeatherSnapshot, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // give the renderer a chance to see the pending state
            tokio::task::yield_now().await;
            match query {
                Query::City(city) if !self.fail => Ok(snapshot(city)),
                _ => Err(WeatherError::NotFound { message: "city not found".into() }),
            }
        }
    }

    fn new_session(fail: bool) -> (WatchSession<StubProvider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider { calls: calls.clone(), fail };
        (WatchSession::new(provider, Units::Metric), calls)
    }

    async fn run(session: &mut WatchSession<StubProvider>, input: &str) -> (Step, Vec<Vec<String>>) {
        let mut frames = Vec::new();
        let step = session.handle(input, |lines| frames.push(lines.to_vec())).await;
        (step, frames)
    }

    #[tokio::test]
    async fn lookup_renders_loading_then_data() {
        let (mut session, _) = new_session(false);

        let (step, frames) = run(&mut session, "London").await;

        assert_eq!(step, Step::Continue);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![LOADING]);
        assert_eq!(frames[1][0], "London, GB");
        assert!(!session.store.state().loading);
    }

    #[tokio::test]
    async fn failed_lookup_renders_loading_then_error() {
        let (mut session, _) = new_session(true);

        let (_, frames) = run(&mut session, "Atlantis").await;

        assert_eq!(frames, vec![vec![LOADING.to_string()], vec![CITY_NOT_FOUND.to_string()]]);
    }

    #[tokio::test]
    async fn blank_input_refreshes_last_city() {
        let (mut session, calls) = new_session(false);

        let (_, frames) = run(&mut session, "  ").await;
        assert!(frames.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        run(&mut session, "Paris").await;
        let (_, frames) = run(&mut session, "").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(frames.last().map(|f| f[0].as_str()), Some("Paris, GB"));
    }

    #[tokio::test]
    async fn clear_resets_state_and_forgets_last_city() {
        let (mut session, calls) = new_session(false);
        run(&mut session, "London").await;

        let (step, frames) = run(&mut session, "clear").await;
        assert_eq!(step, Step::Continue);
        assert_eq!(frames, vec![vec![CLEARED.to_string()]]);
        assert_eq!(session.store.state().data, None);
        assert!(!session.rx.has_changed().expect("store alive"));

        let (_, frames) = run(&mut session, "").await;
        assert!(frames.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn quit_and_exit_stop_without_a_request() {
        let (mut session, calls) = new_session(false);

        assert_eq!(run(&mut session, "quit").await.0, Step::Quit);
        assert_eq!(run(&mut session, " exit ").await.0, Step::Quit);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
