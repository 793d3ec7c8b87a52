use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, as produced by a location provider and as it
/// appears in the `coord` object of the OpenWeather response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Measurement system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
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
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// One weather classification, e.g. "light rain", with its display icon code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// The `main` block: temperatures and atmospheric measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMeasurements {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnd_level: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud coverage percentage.
    pub all: u8,
}

/// Rain or snow accumulation over trailing windows, in millimeters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub last_hour: Option<f64>,
    #[serde(rename = "3h", default, skip_serializing_if = "Option::is_none")]
    pub last_three_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sys {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub country: String,
    /// Unix timestamps, UTC.
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current-weather response from `GET /data/2.5/weather`.
///
/// The shape follows the wire format; no unit conversion happens on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub coord: Coordinates,
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub base: String,
    pub main: MainMeasurements,
    /// Meters; omitted by the API above 10 km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<u32>,
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Precipitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Precipitation>,
    pub clouds: Clouds,
    /// Observation time, Unix timestamp.
    pub dt: i64,
    pub sys: Sys,
    /// Shift from UTC in seconds for the observed location.
    pub timezone: i32,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

impl WeatherResponse {
    /// First condition entry, if any. The list may be empty on the wire;
    /// callers render absence rather than failing.
    pub fn condition(&self) -> Option<&ConditionEntry> {
        self.weather.first()
    }

    /// Observation time as UTC, when `dt` is a representable timestamp.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}
