use thiserror::Error;

/// Normalized failure from the weather client.
///
/// A single message, not a taxonomy: the remote service's own error text is
/// surfaced when present, otherwise the transport or decode error text.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Failures from a location provider.
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error(
        "Location service unavailable. Pass --lat/--lon or store a default \
         location with `herecast configure`."
    )]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// The closed error set of a fetch cycle. All variants render identically at
/// the UI boundary; only the message text differs.
#[derive(Debug, Clone, Error)]
pub enum ScreenError {
    /// Detected before any I/O; never retried automatically.
    #[error("{0}")]
    Config(String),
    /// Detected before any network I/O.
    #[error("{0}")]
    Permission(String),
    /// Anything that went wrong during location retrieval or the network call.
    #[error("{0}")]
    Operational(String),
}

impl ScreenError {
    pub fn missing_api_key() -> Self {
        ScreenError::Config(
            "API key is missing. Set HERECAST_API_KEY or run `herecast configure`.".to_string(),
        )
    }

    pub fn missing_permission() -> Self {
        ScreenError::Permission(
            "Location permission is missing. The app needs your location to show the weather."
                .to_string(),
        )
    }
}

impl From<FetchError> for ScreenError {
    fn from(err: FetchError) -> Self {
        ScreenError::Operational(err.message)
    }
}

impl From<LocationError> for ScreenError {
    fn from(err: LocationError) -> Self {
        ScreenError::Operational(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_its_message() {
        let err = FetchError::new("Invalid API key");
        assert_eq!(err.to_string(), "Invalid API key");
    }

    #[test]
    fn fetch_error_converts_to_operational() {
        let err = ScreenError::from(FetchError::new("boom"));
        assert!(matches!(err, ScreenError::Operational(ref m) if m == "boom"));
    }

    #[test]
    fn location_error_converts_to_operational() {
        let err = ScreenError::from(LocationError::Timeout);
        assert!(matches!(err, ScreenError::Operational(ref m) if m.contains("timed out")));
    }

    #[test]
    fn fixed_messages_are_distinct() {
        let config = ScreenError::missing_api_key().to_string();
        let permission = ScreenError::missing_permission().to_string();
        assert!(config.contains("API key"));
        assert!(permission.contains("Location permission"));
        assert_ne!(config, permission);
    }
}
