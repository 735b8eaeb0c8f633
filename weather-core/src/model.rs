use serde::{Deserialize, Serialize};
use std::fmt;

/// What to look up. Each variant maps onto one set of provider query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    LocationId(u64),
    Coordinates { lat: f64, lon: f64 },
}

impl Query {
    /// Query parameters for the OpenWeather `weather` endpoint, excluding key and units.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::City(city) => vec![("q", city.clone())],
            Query::LocationId(id) => vec![("id", id.to_string())],
            Query::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::City(city) => write!(f, "city '{city}'"),
            Query::LocationId(id) => write!(f, "location id {id}"),
            Query::Coordinates { lat, lon } => write!(f, "coordinates ({lat}, {lon})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial, standard."
            )),
        }
    }
}

/// The deserialized body of one current-weather response.
///
/// Field names follow the provider schema; anything not listed here is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub sys: Sys,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: Main,
    pub wind: Wind,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub snow: Option<Precipitation>,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i64,
}

impl WeatherSnapshot {
    /// Description of the first reported condition, if any.
    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|w| w.description.as_str())
    }

    pub fn rain_last_hour(&self) -> Option<f64> {
        self.rain.as_ref().and_then(|p| p.last_hour)
    }

    pub fn snow_last_hour(&self) -> Option<f64> {
        self.snow.as_ref().and_then(|p| p.last_hour)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Main {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default)]
    pub last_hour: Option<f64>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const LONDON_JSON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {"temp": 12.5, "feels_like": 11.8, "temp_min": 11.0, "temp_max": 13.9, "pressure": 1012, "humidity": 81},
        "visibility": 10000,
        "wind": {"speed": 4.63, "deg": 240},
        "rain": {"1h": 0.42},
        "clouds": {"all": 75},
        "dt": 1700000000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1699946000, "sunset": 1699978800},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    pub(crate) fn london() -> WeatherSnapshot {
        serde_json::from_str(LONDON_JSON).expect("fixture must parse")
    }

    #[test]
    fn snapshot_keeps_provider_fields_verbatim() {
        let snap = london();

        assert_eq!(snap.id, Some(2643743));
        assert_eq!(snap.name, "London");
        assert_eq!(snap.sys.country, "GB");
        assert_eq!(snap.description(), Some("light rain"));
        assert_eq!(snap.main.temp, 12.5);
        assert_eq!(snap.main.humidity, 81);
        assert_eq!(snap.wind.speed, 4.63);
        assert_eq!(snap.rain_last_hour(), Some(0.42));
        assert_eq!(snap.snow_last_hour(), None);
    }

    #[test]
    fn optional_blocks_may_be_absent() {
        let json = r#"{
            "name": "Nowhere",
            "sys": {"sunrise": 0, "sunset": 0},
            "main": {"temp": 1.0, "humidity": 10},
            "wind": {"speed": 0.0}
        }"#;

        let snap: WeatherSnapshot = serde_json::from_str(json).expect("minimal body must parse");
        assert!(snap.weather.is_empty());
        assert_eq!(snap.description(), None);
        assert_eq!(snap.rain, None);
        assert_eq!(snap.timezone, 0);
        assert_eq!(snap.sys.country, "");
    }

    #[test]
    fn query_params_per_variant() {
        assert_eq!(Query::City("Paris".into()).params(), vec![("q", "Paris".to_string())]);
        assert_eq!(Query::LocationId(42).params(), vec![("id", "42".to_string())]);
        assert_eq!(
            Query::Coordinates { lat: 48.85, lon: 2.35 }.params(),
            vec![("lat", "48.85".to_string()), ("lon", "2.35".to_string())]
        );
    }

    #[test]
    fn units_parse_case_insensitively() {
        for units in Units::all() {
            let parsed = Units::try_from(units.as_str().to_uppercase().as_str())
                .expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }

        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));
    }
}
