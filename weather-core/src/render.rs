use chrono::{DateTime, Utc};

use crate::{
    model::{Units, WeatherSnapshot},
    store::WeatherState,
    view::LOADING,
};

/// Wall-clock `HH:MM:SS` of `timestamp` at a location `timezone_offset` seconds from UTC.
pub fn format_time(timestamp: i64, timezone_offset: i64) -> String {
    timestamp
        .checked_add(timezone_offset)
        .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

pub fn render_summary(snapshot: &WeatherSnapshot) -> String {
    format!("{}, {}", snapshot.name, snapshot.sys.country)
}

fn description(snapshot: &WeatherSnapshot) -> String {
    snapshot.description().unwrap_or("Unknown").to_string()
}

fn core_lines(snapshot: &WeatherSnapshot, units: Units) -> Vec<String> {
    vec![
        render_summary(snapshot),
        description(snapshot),
        format!("{}{}", snapshot.main.temp, units.temperature_suffix()),
        format!("Humidity: {}%", snapshot.main.humidity),
        format!("Wind: {} {}", snapshot.wind.speed, units.speed_suffix()),
    ]
}

/// Everything the search and current-location views show.
pub fn render_full(snapshot: &WeatherSnapshot, units: Units) -> Vec<String> {
    let mut lines = core_lines(snapshot, units);

    if let Some(rain) = snapshot.rain_last_hour() {
        lines.push(format!("Precipitation: {rain} mm (last hour)"));
    }
    if let Some(snow) = snapshot.snow_last_hour() {
        lines.push(format!("Snow: {snow} mm (last hour)"));
    }

    lines.push(format!("Sunrise: {}", format_time(snapshot.sys.sunrise, snapshot.timezone)));
    lines.push(format!("Sunset: {}", format_time(snapshot.sys.sunset, snapshot.timezone)));
    lines
}

/// The shorter block shown for a lookup by location id.
pub fn render_details(snapshot: &WeatherSnapshot, units: Units) -> Vec<String> {
    core_lines(snapshot, units)
}

/// Rendering of the store state: progress, then error, then data.
pub fn render_state(state: &WeatherState, units: Units) -> Vec<String> {
    if state.loading {
        return vec![LOADING.to_string()];
    }

    let mut lines = Vec::new();
    if let Some(error) = &state.error {
        lines.push(error.clone());
    }
    if let Some(data) = &state.data {
        lines.extend(render_full(data, units));
    }
    lines
}
