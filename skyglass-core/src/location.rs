use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

use crate::{
    config::{LocationConfig, LocationSourceKind},
    error::LocationError,
    location::ip::IpLocator,
    model::Coordinates,
};

pub mod callback;
pub mod ip;

pub use callback::{CallbackLocator, GeolocationPlatform, PositionErrorCode, PositionReply};

/// Hints passed to the platform. Only `timeout` is enforced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Age of a previously obtained position the platform may hand back.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Single-shot, timeout-bounded lookup of the device position. No retries.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError>;
}

/// Always answers with the configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// The user declined location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

#[async_trait]
impl LocationSource for DeniedLocation {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// No location capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Construct the location source selected in the `[location]` table.
pub fn location_source_from_config(config: &LocationConfig) -> anyhow::Result<Box<dyn LocationSource>> {
    let boxed: Box<dyn LocationSource> = match config.source {
        None => Box::new(NoLocation),
        Some(LocationSourceKind::Disabled) => Box::new(DeniedLocation),
        Some(LocationSourceKind::Fixed) => {
            let coords = config.fixed_coordinates().ok_or_else(|| {
                anyhow::anyhow!(
                    "Location source 'fixed' needs both latitude and longitude.\n\
                     Hint: run `skyglass configure` to set them."
                )
            })?;
            Box::new(FixedLocation(coords))
        }
        Some(LocationSourceKind::Ip) => {
            let locator = IpLocator::new(config.position_options());
            match &config.ip_lookup_url {
                Some(url) => Box::new(locator.with_lookup_url(url.clone())),
                None => Box::new(locator),
            }
        }
    };

    Ok(boxed)
}
