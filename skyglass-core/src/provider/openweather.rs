use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::instrument;

use crate::{
    error::FetchError,
    model::{Coordinates, CurrentWeatherSnapshot, ForecastPayload, RawForecastEntry},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

/// What a request is keyed by.
#[derive(Debug, Clone, Copy)]
enum Query<'a> {
    Coordinates(Coordinates),
    Place(&'a str),
}

impl OpenWeatherClient {
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: builder.build()?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, query: Query<'_>) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params: Vec<(&str, String)> = Vec::with_capacity(4);
        match query {
            Query::Coordinates(c) => {
                params.push(("lat", c.latitude.to_string()));
                params.push(("lon", c.longitude.to_string()));
            }
            Query::Place(place) => params.push(("q", place.to_string())),
        }
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to send request to OpenWeather ({endpoint}): {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read OpenWeather {endpoint} response body: {e}")))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather {endpoint} request failed");
            return Err(FetchError::Http { status: status.as_u16() });
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("Failed to parse OpenWeather {endpoint} JSON: {e}")))
    }

    async fn fetch_current(&self, query: Query<'_>) -> Result<CurrentWeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self.fetch("weather", query).await?;
        parsed.try_into()
    }

    async fn fetch_forecast(&self, query: Query<'_>) -> Result<ForecastPayload, FetchError> {
        let parsed: OwForecastResponse = self.fetch("forecast", query).await?;
        tracing::debug!(entries = parsed.list.len(), "forecast timeline received");
        parsed.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentWeatherSnapshot {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Decode("OpenWeather current response has no weather condition".into()))?;

        Ok(CurrentWeatherSnapshot {
            place_name: parsed.name,
            country_code: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_ms: parsed.wind.speed,
            visibility_m: parsed.visibility,
            condition_main: condition.main,
            condition_description: condition.description,
            condition_icon: condition.icon,
        })
    }
}

impl TryFrom<OwForecastResponse> for ForecastPayload {
    type Error = FetchError;

    fn try_from(parsed: OwForecastResponse) -> Result<Self, Self::Error> {
        let entries = parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = entry.weather.into_iter().next().ok_or_else(|| {
                    FetchError::Decode(format!("OpenWeather forecast entry {} has no weather condition", entry.dt))
                })?;

                Ok(RawForecastEntry {
                    timestamp_seconds: entry.dt,
                    temp_min_c: entry.main.temp_min,
                    temp_max_c: entry.main.temp_max,
                    condition_description: condition.description,
                    condition_icon: condition.icon,
                })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Ok(ForecastPayload { entries })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self), level = "info")]
    async fn current_by_coordinates(&self, coords: Coordinates) -> Result<CurrentWeatherSnapshot, FetchError> {
        self.fetch_current(Query::Coordinates(coords)).await
    }

    #[instrument(skip(self), level = "info")]
    async fn current_by_place(&self, place: &str) -> Result<CurrentWeatherSnapshot, FetchError> {
        self.fetch_current(Query::Place(place)).await
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast_by_coordinates(&self, coords: Coordinates) -> Result<ForecastPayload, FetchError> {
        self.fetch_forecast(Query::Coordinates(coords)).await
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast_by_place(&self, place: &str) -> Result<ForecastPayload, FetchError> {
        self.fetch_forecast(Query::Place(place)).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
