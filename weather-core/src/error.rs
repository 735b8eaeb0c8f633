use thiserror::Error;

/// Shown when a city search fails for any reason.
pub const CITY_NOT_FOUND: &str = "City not found. Please enter a valid city name.";

/// Shown when no position could be obtained for the current-location lookup.
pub const LOCATION_DENIED: &str = "Location access denied. Enable location for weather updates.";

/// Shown when a position was obtained but the lookup for it failed.
pub const LOCATION_FETCH_FAILED: &str = "Failed to fetch weather for current location.";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("location not found: {message}")]
    NotFound { message: String },

    #[error("weather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse weather response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(
        "No API key configured.\n\
         Hint: run `weather configure` or set WEATHER_API_KEY."
    )]
    MissingApiKey,

    #[error("current position unavailable: {0}")]
    LocationUnavailable(String),
}

pub(crate) fn truncate_body(body: &str) -> String {
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
