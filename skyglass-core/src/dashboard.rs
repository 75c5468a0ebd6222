//! One end-to-end "get the dashboard" operation.

use tracing::instrument;

use crate::{
    error::DashboardError,
    forecast,
    location::LocationSource,
    model::{DashboardData, DashboardMode},
    provider::WeatherProvider,
};

/// Combines a location source and a weather provider.
///
/// Holds no mutable state; concurrent calls to [`fetch_dashboard`] are
/// independent of each other.
///
/// [`fetch_dashboard`]: WeatherOrchestrator::fetch_dashboard
#[derive(Debug)]
pub struct WeatherOrchestrator {
    provider: Box<dyn WeatherProvider>,
    location: Box<dyn LocationSource>,
}

impl WeatherOrchestrator {
    pub fn new(provider: Box<dyn WeatherProvider>, location: Box<dyn LocationSource>) -> Self {
        Self { provider, location }
    }

    /// Fetch current conditions and forecast concurrently and normalize the
    /// forecast. The first failing request decides the error; the other one is
    /// dropped.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_dashboard(&self, mode: &DashboardMode) -> Result<DashboardData, DashboardError> {
        let (current, payload) = match mode {
            DashboardMode::ByLocation => {
                let coords = self.location.current_coordinates().await?;
                tracing::debug!(lat = coords.latitude, lon = coords.longitude, "using device location");

                tokio::try_join!(
                    self.provider.current_by_coordinates(coords),
                    self.provider.forecast_by_coordinates(coords),
                )?
            }
            DashboardMode::ByPlaceName(name) => tokio::try_join!(
                self.provider.current_by_place(name),
                self.provider.forecast_by_place(name),
            )?,
        };

        let forecast = forecast::normalize(&payload);
        tracing::info!(
            place = %current.place_name,
            days = forecast.len(),
            "dashboard ready"
        );

        Ok(DashboardData { current, forecast })
    }
}
