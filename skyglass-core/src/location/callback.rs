//! Bridge from a callback-style geolocation API to one awaitable call.
//!
//! The platform receives a [`PositionReply`] and must answer through exactly
//! one of [`PositionReply::succeed`] or [`PositionReply::fail`]. The locator
//! awaits that answer for at most `options.timeout`.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::oneshot;

use crate::{error::LocationError, model::Coordinates};

use super::{LocationSource, PositionOptions};

/// Failure codes reported by a geolocation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other(u16),
}

impl PositionErrorCode {
    /// Decode the numeric codes used by the W3C geolocation API.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            other => Self::Other(other),
        }
    }
}

impl From<PositionErrorCode> for LocationError {
    fn from(code: PositionErrorCode) -> Self {
        match code {
            PositionErrorCode::PermissionDenied => LocationError::PermissionDenied,
            PositionErrorCode::PositionUnavailable => LocationError::PositionUnavailable,
            PositionErrorCode::Timeout => LocationError::TimedOut,
            PositionErrorCode::Other(code) => {
                tracing::warn!(code, "unknown geolocation error code");
                LocationError::PositionUnavailable
            }
        }
    }
}

/// Completion handle given to the platform for a single request.
#[derive(Debug)]
pub struct PositionReply {
    tx: oneshot::Sender<Result<Coordinates, PositionErrorCode>>,
}

impl PositionReply {
    pub fn succeed(self, coords: Coordinates) {
        // Receiver gone means the request already timed out.
        let _ = self.tx.send(Ok(coords));
    }

    pub fn fail(self, code: PositionErrorCode) {
        let _ = self.tx.send(Err(code));
    }
}

/// A platform that reports positions through callbacks.
pub trait GeolocationPlatform: Send + Sync + Debug {
    fn is_supported(&self) -> bool {
        true
    }

    /// Start a position request. May prompt the user for permission.
    fn request_position(&self, options: &PositionOptions, reply: PositionReply);
}

#[derive(Debug)]
pub struct CallbackLocator<P> {
    platform: P,
    options: PositionOptions,
}

impl<P: GeolocationPlatform> CallbackLocator<P> {
    pub fn new(platform: P, options: PositionOptions) -> Self {
        Self { platform, options }
    }
}

#[async_trait]
impl<P: GeolocationPlatform> LocationSource for CallbackLocator<P> {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        if !self.platform.is_supported() {
            return Err(LocationError::Unsupported);
        }

        let (tx, rx) = oneshot::channel();
        self.platform.request_position(&self.options, PositionReply { tx });

        match tokio::time::timeout(self.options.timeout, rx).await {
            Ok(Ok(Ok(coords))) => {
                tracing::debug!(lat = coords.latitude, lon = coords.longitude, "position acquired");
                Ok(coords)
            }
            Ok(Ok(Err(code))) => Err(code.into()),
            Ok(Err(_)) => {
                tracing::warn!("geolocation platform dropped the request without answering");
                Err(LocationError::PositionUnavailable)
            }
            Err(_) => Err(LocationError::TimedOut),
        }
    }
}
