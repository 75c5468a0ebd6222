use thiserror::Error;

use crate::model::DashboardMode;

/// Why a location source could not produce coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location access denied by user")]
    PermissionDenied,
    #[error("Location information unavailable")]
    PositionUnavailable,
    #[error("Location request timed out")]
    TimedOut,
    #[error("Location is not supported on this platform")]
    Unsupported,
}

/// Failure of a single weather API request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("Failed to decode weather response: {0}")]
    Decode(String),
}

/// Outcome of a failed dashboard fetch. Always exactly one cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl LocationError {
    /// Hint shown to the user, distinguishing "permission" from "unavailable".
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access denied. Please enable location services or search for a city."
            }
            Self::PositionUnavailable => "Location unavailable. Please search for a city manually.",
            Self::TimedOut | Self::Unsupported => "Unable to fetch weather data",
        }
    }
}

impl DashboardError {
    /// User-facing message for a failed fetch in the given mode.
    pub fn user_message(&self, mode: &DashboardMode) -> String {
        match (self, mode) {
            (Self::Location(err), _) => err.user_message().to_string(),
            (Self::Fetch(_), DashboardMode::ByPlaceName(name)) => {
                format!("Unable to find weather data for \"{name}\"")
            }
            (Self::Fetch(_), DashboardMode::ByLocation) => "Unable to fetch weather data".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_errors_distinguish_permission_from_unavailable() {
        let denied = DashboardError::from(LocationError::PermissionDenied);
        let unavailable = DashboardError::from(LocationError::PositionUnavailable);

        let mode = DashboardMode::ByLocation;
        assert!(denied.user_message(&mode).contains("denied"));
        assert!(unavailable.user_message(&mode).contains("unavailable"));
        assert_ne!(denied.user_message(&mode), unavailable.user_message(&mode));
    }

    #[test]
    fn timeout_falls_back_to_generic_message() {
        let err = DashboardError::from(LocationError::TimedOut);
        assert_eq!(err.user_message(&DashboardMode::ByLocation), "Unable to fetch weather data");
    }

    #[test]
    fn fetch_error_mentions_place_name() {
        let err = DashboardError::from(FetchError::Http { status: 404 });
        let msg = err.user_message(&DashboardMode::ByPlaceName("Atlantis".into()));
        assert_eq!(msg, "Unable to find weather data for \"Atlantis\"");
    }

    #[test]
    fn http_error_displays_status() {
        assert_eq!(FetchError::Http { status: 503 }.to_string(), "HTTP error! status: 503");
    }
}
