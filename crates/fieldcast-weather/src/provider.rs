//! OpenWeather client: 5-day/3-hour forecast and current-weather-by-name lookup.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use crate::types::{
    Coordinate, Forecast, IntervalSample, LocationError, Units, WeatherError, TIMESTAMP_FORMAT,
};

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default)]
    list: Option<Vec<OwmInterval>>,
}

#[derive(Debug, Deserialize)]
struct OwmInterval {
    dt_txt: String,
    main: OwmMain,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmRain>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "3h", default)]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    coord: Option<OwmCoord>,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

impl TryFrom<OwmInterval> for IntervalSample {
    type Error = WeatherError;

    fn try_from(raw: OwmInterval) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(&raw.dt_txt, TIMESTAMP_FORMAT)
            .map_err(|e| WeatherError::Parse(format!("bad dt_txt {:?}: {}", raw.dt_txt, e)))?;
        let condition = raw.weather.into_iter().next().ok_or_else(|| {
            WeatherError::Parse(format!("interval {} has no weather condition", raw.dt_txt))
        })?;

        Ok(Self {
            timestamp,
            temperature: raw.main.temp,
            temp_min: raw.main.temp_min,
            temp_max: raw.main.temp_max,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            precipitation: raw.rain.and_then(|r| r.three_hour),
            description: condition.description,
            icon: condition.icon,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: Units,
}

impl WeatherProvider {
    /// Build a provider around an existing client and base URL
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        units: Units,
    ) -> Self {
        Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            units,
        }
    }

    /// Fetch the 3-hour interval forecast for a coordinate
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, coordinate: Coordinate) -> Result<Forecast, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast request returned status {}", status);
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: OwmForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let samples = match body.list {
            Some(list) => list
                .into_iter()
                .map(IntervalSample::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                tracing::warn!("Forecast response carried no interval list");
                Vec::new()
            }
        };

        tracing::info!("Fetched {} forecast intervals", samples.len());
        Ok(Forecast {
            coordinate,
            units: self.units,
            samples,
        })
    }

    /// Resolve a city name to a coordinate via the current-weather endpoint
    #[instrument(skip(self), level = "info")]
    pub async fn coordinate_for_city(&self, city: &str) -> Result<Coordinate, LocationError> {
        if city.trim().is_empty() {
            return Err(LocationError::CityNotFound);
        }

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
            ])
            .send()
            .await
            .map_err(LocationError::CityLookup)?;

        if !response.status().is_success() {
            tracing::debug!("City lookup returned status {}", response.status());
            return Err(LocationError::CityNotFound);
        }

        let body: OwmCurrentResponse = response
            .json()
            .await
            .map_err(LocationError::CityLookup)?;
        let coord = body.coord.ok_or(LocationError::MissingField("coord"))?;

        tracing::info!("Resolved city {:?} to {}, {}", city, coord.lat, coord.lon);
        Ok(Coordinate::new(coord.lat, coord.lon))
    }
}
