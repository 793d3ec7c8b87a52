use crate::{
    client::WeatherProvider,
    error::ScreenError,
    location::{AccuracyProfile, LocationProvider},
    model::{Coordinates, Units, WeatherResponse},
};

/// Shown when a failure carries no message of its own.
const GENERIC_ERROR: &str = "An unknown error occurred";

/// Blocking user-facing alert raised on any failed fetch cycle, duplicating
/// the inline error text.
pub trait AlertSink: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// Alert sink that swallows everything. Useful for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlerts;

impl AlertSink for SilentAlerts {
    fn alert(&self, _title: &str, _message: &str) {}
}

/// Transient UI state of the weather screen.
///
/// Exactly one of `loading`, a non-empty `error`, or a populated `weather`
/// decides which view renders; `refreshing` is an overlay flag on top of the
/// loaded view.
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub loading: bool,
    pub refreshing: bool,
    pub error: String,
    pub location: Option<Coordinates>,
    pub weather: Option<WeatherResponse>,
}

impl ScreenState {
    /// State at mount: the loading view, before the first cycle runs.
    pub fn new() -> Self {
        Self {
            loading: true,
            refreshing: false,
            error: String::new(),
            location: None,
            weather: None,
        }
    }

    pub fn view(&self) -> View {
        if self.loading {
            View::Loading
        } else if !self.error.is_empty() {
            View::Error
        } else {
            View::Loaded
        }
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// The three exclusive rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Error,
    Loaded,
}

/// Orchestrates one screen: permission check, location read, weather fetch,
/// and the resulting view state.
///
/// Each cycle is a single sequential chain of awaited steps; `&mut self`
/// means at most one cycle can be in flight per controller, so overlapping
/// refreshes cannot race on the state.
pub struct ScreenController {
    api_key: String,
    provider: Box<dyn WeatherProvider>,
    location: Box<dyn LocationProvider>,
    alerts: Box<dyn AlertSink>,
    units: Units,
    lang: String,
    state: ScreenState,
}

impl ScreenController {
    pub fn new(
        api_key: impl Into<String>,
        provider: Box<dyn WeatherProvider>,
        location: Box<dyn LocationProvider>,
        alerts: Box<dyn AlertSink>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            provider,
            location,
            alerts,
            units: Units::Metric,
            lang: "fi".to_string(),
            state: ScreenState::new(),
        }
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Run one full fetch cycle: config gate, permission, location, fetch.
    ///
    /// On failure the error message replaces the view and is duplicated
    /// through the alert sink. `loading` and `refreshing` are cleared on
    /// every exit path, success or failure.
    pub async fn run_cycle(&mut self) -> View {
        self.state.error.clear();

        match self.fetch_once().await {
            Ok((coords, weather)) => {
                tracing::info!(location = %weather.name, "fetch cycle succeeded");
                self.state.location = Some(coords);
                self.state.weather = Some(weather);
            }
            Err(err) => {
                let mut message = err.to_string();
                if message.is_empty() {
                    message = GENERIC_ERROR.to_string();
                }
                tracing::warn!(%message, "fetch cycle failed");
                self.state.error = message.clone();
                self.alerts.alert("Error", &message);
            }
        }

        self.state.loading = false;
        self.state.refreshing = false;
        self.state.view()
    }

    /// User-triggered refresh: raises the overlay flag and re-runs the full
    /// sequence including the permission check. The previous reading stays
    /// in place until new data or an error replaces the view.
    pub async fn refresh(&mut self) -> View {
        self.state.refreshing = true;
        self.run_cycle().await
    }

    /// The sequential pipeline, each step short-circuiting to the error
    /// state on failure.
    async fn fetch_once(&self) -> Result<(Coordinates, WeatherResponse), ScreenError> {
        if self.api_key.is_empty() {
            return Err(ScreenError::missing_api_key());
        }

        let mut status = self.location.permission_status().await;
        if !status.is_granted() {
            status = self.location.request_permission().await;
        }
        if !status.is_granted() {
            return Err(ScreenError::missing_permission());
        }

        let coords = self
            .location
            .current_position(AccuracyProfile::Balanced)
            .await?;

        let weather = self
            .provider
            .current_weather(coords, self.units, &self.lang)
            .await?;

        Ok((coords, weather))
    }
}
