//! Soil backend: query SoilGrids and derive the NPK estimate off the UI thread.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use fieldcast_soil::NutrientEstimate;
use fieldcast_weather::Coordinate;

use crate::app_services::Pipelines;

#[derive(Debug, thiserror::Error)]
pub enum SoilError {
    #[error(transparent)]
    Pipeline(#[from] fieldcast_soil::SoilError),
    #[error("Soil service not initialized")]
    NotInitialized,
}

#[derive(Debug)]
pub enum SoilServiceMessage {
    FetchDone {
        generation: u64,
        result: Result<NutrientEstimate, SoilError>,
    },
}

/// Request a soil estimate; `coordinate` falls back to the configured point.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<SoilServiceMessage>,
    runtime: &tokio::runtime::Handle,
    pipelines: Option<Arc<Pipelines>>,
    coordinate: Option<Coordinate>,
    generation: u64,
) {
    let tx = tx.clone();
    let pipelines = match pipelines {
        Some(p) => p,
        None => {
            let _ = tx.send(SoilServiceMessage::FetchDone {
                generation,
                result: Err(SoilError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let point = coordinate.unwrap_or(pipelines.soil_coordinate);
        tracing::info!(generation, %point, "Fetching soil estimate");
        let result = pipelines
            .soil
            .estimate_at(point.latitude, point.longitude)
            .await
            .map_err(SoilError::from);
        if let Err(e) = &result {
            tracing::error!("Failed to fetch soil data: {}", e);
        }
        let _ = tx.send(SoilServiceMessage::FetchDone { generation, result });
    });
}
