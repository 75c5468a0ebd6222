//! Approximate position from IP geolocation (ip-api.com).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::LocationError, model::Coordinates};

use super::{LocationSource, PositionOptions};

const IP_API_URL: &str = "http://ip-api.com/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    lookup_url: String,
    options: PositionOptions,
}

impl IpLocator {
    pub fn new(options: PositionOptions) -> Self {
        Self {
            http: Client::new(),
            lookup_url: IP_API_URL.to_string(),
            options,
        }
    }

    pub fn with_lookup_url(mut self, lookup_url: impl Into<String>) -> Self {
        self.lookup_url = lookup_url.into();
        self
    }

    async fn lookup(&self) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.lookup_url)
            .query(&[("fields", "status,message,lat,lon,city")])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "ip geolocation request failed");
                LocationError::PositionUnavailable
            })?;

        if !res.status().is_success() {
            tracing::debug!(status = %res.status(), "ip geolocation returned an error status");
            return Err(LocationError::PositionUnavailable);
        }

        let body: IpApiResponse = res.json().await.map_err(|e| {
            tracing::debug!(error = %e, "ip geolocation parse error");
            LocationError::PositionUnavailable
        })?;

        match body {
            IpApiResponse { status, lat: Some(lat), lon: Some(lon), city, .. } if status == "success" => {
                tracing::info!(lat, lon, city = city.as_deref().unwrap_or("?"), "ip geolocation resolved");
                Ok(Coordinates::new(lat, lon))
            }
            IpApiResponse { message, .. } => {
                tracing::warn!(reason = message.as_deref().unwrap_or("unknown"), "ip geolocation failed");
                Err(LocationError::PositionUnavailable)
            }
        }
    }
}

#[async_trait]
impl LocationSource for IpLocator {
    #[instrument(skip(self))]
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        tokio::time::timeout(self.options.timeout, self.lookup())
            .await
            .map_err(|_| LocationError::TimedOut)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locator(server: &MockServer, timeout: Duration) -> IpLocator {
        let options = PositionOptions { timeout, ..PositionOptions::default() };
        IpLocator::new(options).with_lookup_url(format!("{}/json/", server.uri()))
    }

    #[tokio::test]
    async fn resolves_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("fields", "status,message,lat,lon,city"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "lat": 52.52,
                "lon": 13.405,
                "city": "Berlin"
            })))
            .mount(&server)
            .await;

        let coords = locator(&server, Duration::from_secs(5)).current_coordinates().await;
        assert_eq!(coords, Ok(Coordinates::new(52.52, 13.405)));
    }

    #[tokio::test]
    async fn failed_lookup_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "fail",
                "message": "private range"
            })))
            .mount(&server)
            .await;

        let result = locator(&server, Duration::from_secs(5)).current_coordinates().await;
        assert_eq!(result, Err(LocationError::PositionUnavailable));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = locator(&server, Duration::from_secs(5)).current_coordinates().await;
        assert_eq!(result, Err(LocationError::PositionUnavailable));
    }

    #[tokio::test]
    async fn slow_lookup_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "success", "lat": 1.0, "lon": 2.0}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let result = locator(&server, Duration::from_millis(100)).current_coordinates().await;
        assert_eq!(result, Err(LocationError::TimedOut));
    }
}
