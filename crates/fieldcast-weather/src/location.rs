//! Resolving where to forecast: IP geolocation or a city-name lookup.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::provider::WeatherProvider;
use crate::types::{Coordinate, LocationError, LocationQuery};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    ip_api_url: String,
    weather: WeatherProvider,
}

impl LocationResolver {
    pub fn new(client: Client, ip_api_url: impl Into<String>, weather: WeatherProvider) -> Self {
        Self {
            client,
            ip_api_url: ip_api_url.into(),
            weather,
        }
    }

    /// Resolve a query to a coordinate. The first failure is final.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, LocationError> {
        match query {
            LocationQuery::CurrentLocation => self.from_ip().await,
            LocationQuery::City(name) => self.weather.coordinate_for_city(name).await,
        }
    }

    /// Geolocate the caller by public IP address
    #[instrument(skip(self), level = "info")]
    pub async fn from_ip(&self) -> Result<Coordinate, LocationError> {
        let response = self.client.get(&self.ip_api_url).send().await?;

        if !response.status().is_success() {
            tracing::debug!("IP geolocation returned status {}", response.status());
            return Err(LocationError::Status(response.status().as_u16()));
        }

        let body: IpApiResponse = response.json().await?;

        if body.status == "fail" {
            let message = body
                .message
                .unwrap_or_else(|| "geolocation failed".to_string());
            tracing::warn!("IP geolocation failed: {}", message);
            return Err(LocationError::Provider(message));
        }

        let latitude = body.lat.ok_or(LocationError::MissingField("lat"))?;
        let longitude = body.lon.ok_or(LocationError::MissingField("lon"))?;

        tracing::info!("Got location: {}, {}", latitude, longitude);
        Ok(Coordinate::new(latitude, longitude))
    }
}
