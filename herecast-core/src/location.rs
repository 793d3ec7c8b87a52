use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::LocationError, model::Coordinates};

/// Foreground location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Named precision tier, resolved by the provider. The screen always asks
/// for `Balanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccuracyProfile {
    Lowest,
    Low,
    #[default]
    Balanced,
    High,
    Highest,
}

/// Source of the device position, behind the same permission gate a mobile
/// platform exposes: query the current status, request it once if needed,
/// then read a position.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn permission_status(&self) -> PermissionStatus;

    /// Ask the user for foreground location access. Called at most once per
    /// fetch cycle, and only when the current status is not granted.
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(
        &self,
        profile: AccuracyProfile,
    ) -> Result<Coordinates, LocationError>;
}

/// Desktop stand-in for a device GPS: a coordinate pair taken from flags,
/// environment or the config file. Permission is always granted; an empty
/// configuration reads as the service being unavailable.
#[derive(Debug, Clone)]
pub struct ConfiguredLocationProvider {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocationProvider {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocationProvider {
    async fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(
        &self,
        _profile: AccuracyProfile,
    ) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::ServiceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_provider_returns_its_coordinates() {
        let provider = ConfiguredLocationProvider::new(Some(Coordinates::new(60.17, 24.94)));

        assert!(provider.permission_status().await.is_granted());

        let coords = provider
            .current_position(AccuracyProfile::Balanced)
            .await
            .expect("position should be available");
        assert_eq!(coords.latitude, 60.17);
        assert_eq!(coords.longitude, 24.94);
    }

    #[tokio::test]
    async fn unconfigured_provider_reports_unavailable() {
        let provider = ConfiguredLocationProvider::new(None);

        let err = provider
            .current_position(AccuracyProfile::Balanced)
            .await
            .unwrap_err();
        assert!(matches!(err, LocationError::ServiceUnavailable));
    }
}
