//! Core library for the `herecast` local-weather screen.
//!
//! This crate defines:
//! - Configuration handling (file + environment overrides)
//! - The OpenWeather current-weather client and its typed response
//! - The location-provider abstraction with its permission gate
//! - The screen controller driving the loading / error / loaded views
//!
//! It is used by `herecast-cli`, but can also be reused by other binaries or
//! front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod screen;

pub use client::{
    OpenWeatherClient, WeatherProvider, format_temperature, icon_url, kelvin_to_celsius,
};
pub use config::{Config, EnvOverrides};
pub use error::{FetchError, LocationError, ScreenError};
pub use location::{
    AccuracyProfile, ConfiguredLocationProvider, LocationProvider, PermissionStatus,
};
pub use model::{Coordinates, Units, WeatherResponse};
pub use screen::{AlertSink, ScreenController, ScreenState, SilentAlerts, View};
