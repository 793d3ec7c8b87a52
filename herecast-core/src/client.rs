use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    model::{Coordinates, Units, WeatherResponse},
};

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Source of current-weather readings. The screen controller talks to this
/// trait so it can be driven by a stub in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(
        &self,
        coords: Coordinates,
        units: Units,
        lang: &str,
    ) -> Result<WeatherResponse, FetchError>;
}

/// Stateless client for the OpenWeather current-weather endpoint.
///
/// One outbound request per call; no retry, no caching, no timeout beyond the
/// transport default. Coordinates and the language code are passed through
/// unvalidated; the remote service is the authority on rejecting them.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL)
    }

    /// Point the client at a different endpoint root. Used by tests to talk
    /// to a local mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(
        &self,
        coords: Coordinates,
        units: Units,
        lang: &str,
    ) -> Result<WeatherResponse, FetchError> {
        let url = format!("{}/weather", self.base_url);

        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            units = %units,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", units.as_str().to_string()),
                ("lang", lang.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::new(format!("Failed to send request to OpenWeather: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::new(format!("Failed to read OpenWeather response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%status, "OpenWeather returned an error status");
            // The service usually explains itself in a JSON `message` field.
            if let Some(message) = error_message(&body) {
                return Err(FetchError::new(message));
            }
            return Err(FetchError::new(format!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: WeatherResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::new(format!("Failed to parse OpenWeather JSON: {e}")))?;

        tracing::debug!(location = %parsed.name, "current weather received");
        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back up to a char boundary; slicing mid-character panics.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

/// The API reports temperatures in kelvin under `standard` units.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}

/// Display URL for a condition icon code, e.g. `"01d"`. The code is not
/// validated; this only produces the URL, no request is made.
pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@2x.png")
}

/// Render a Celsius reading for display, rounded to the nearest degree.
pub fn format_temperature(degrees: f64) -> String {
    format!("{}°C", degrees.round() as i64)
}
