use crate::{
    Config,
    error::FetchError,
    model::{Coordinates, CurrentWeatherSnapshot, ForecastPayload},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The four weather queries: {current, forecast} x {coordinates, place name}.
///
/// Each call issues exactly one request and never retries. Place names arrive
/// trimmed; encoding them for the wire is the implementation's job.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_coordinates(&self, coords: Coordinates) -> Result<CurrentWeatherSnapshot, FetchError>;

    async fn current_by_place(&self, place: &str) -> Result<CurrentWeatherSnapshot, FetchError>;

    async fn forecast_by_coordinates(&self, coords: Coordinates) -> Result<ForecastPayload, FetchError>;

    async fn forecast_by_place(&self, place: &str) -> Result<ForecastPayload, FetchError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let mut client = OpenWeatherClient::new(api_key.to_owned(), config.request_timeout())?;
    if let Some(base_url) = &config.base_url {
        client = client.with_base_url(base_url.clone());
    }

    Ok(Box::new(client))
}
