//! Weather backend: resolve a location, then fetch and fold the forecast.
//! Network work runs on the shared runtime; results are sent back via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use serde::Serialize;

use fieldcast_weather::{
    Coordinate, CurrentConditions, DailySummary, Forecast, LocationQuery, Units,
};

use crate::app_services::Pipelines;

/// Error type for weather operations
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Pipeline(#[from] fieldcast_weather::WeatherError),
    #[error("Weather service not initialized")]
    NotInitialized,
}

/// What the weather panel shows after a successful fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub coordinate: Coordinate,
    pub units: Units,
    pub current: Option<CurrentConditions>,
    pub daily: Vec<DailySummary>,
}

impl WeatherReport {
    pub fn from_forecast(forecast: &Forecast) -> Self {
        Self {
            coordinate: forecast.coordinate,
            units: forecast.units,
            current: forecast.current(),
            daily: forecast.daily(),
        }
    }

    /// True when the provider sent no intervals
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one fetch, tagged with the generation that requested it
    FetchDone {
        generation: u64,
        result: Result<WeatherReport, WeatherError>,
    },
}

/// Run the full pipeline: location first, forecast second
pub async fn fetch_report(
    pipelines: &Pipelines,
    query: &LocationQuery,
) -> Result<WeatherReport, WeatherError> {
    let coordinate = pipelines
        .resolver
        .resolve(query)
        .await
        .map_err(fieldcast_weather::WeatherError::from)?;
    let forecast = pipelines.weather.forecast(coordinate).await?;
    Ok(WeatherReport::from_forecast(&forecast))
}

/// Request a weather fetch asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    pipelines: Option<Arc<Pipelines>>,
    query: LocationQuery,
    generation: u64,
) {
    let tx = tx.clone();
    let pipelines = match pipelines {
        Some(p) => p,
        None => {
            let _ = tx.send(WeatherServiceMessage::FetchDone {
                generation,
                result: Err(WeatherError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        tracing::info!(generation, ?query, "Fetching weather");
        let result = fetch_report(&pipelines, &query).await;
        if let Err(e) = &result {
            tracing::error!("Failed to fetch weather: {}", e);
        }
        let _ = tx.send(WeatherServiceMessage::FetchDone { generation, result });
    });
}
