//! SoilGrids REST client.

use reqwest::Client;
use tracing::instrument;

use crate::estimate::{estimate, NutrientEstimate, SoilReadings};
use crate::types::{SoilError, SoilProperty, SoilResponse, DEPTH_BAND};

#[derive(Debug, Clone)]
pub struct SoilClient {
    client: Client,
    base_url: String,
}

impl SoilClient {
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Query topsoil properties at a point
    #[instrument(skip(self), level = "info")]
    pub async fn query(&self, latitude: f64, longitude: f64) -> Result<SoilResponse, SoilError> {
        let url = format!("{}/properties/query", self.base_url);

        let mut params = vec![
            ("lon", longitude.to_string()),
            ("lat", latitude.to_string()),
        ];
        params.extend(
            SoilProperty::ALL
                .iter()
                .map(|p| ("property", p.layer_name().to_string())),
        );
        params.push(("depth", DEPTH_BAND.to_string()));
        params.push(("value", "mean".to_string()));

        let response = self.client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Soil request returned status {}", status);
            return Err(SoilError::Status(status.as_u16()));
        }

        response
            .json::<SoilResponse>()
            .await
            .map_err(|e| SoilError::Parse(e.to_string()))
    }

    /// Query a point and derive the nutrient estimate
    pub async fn estimate_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<NutrientEstimate, SoilError> {
        let response = self.query(latitude, longitude).await?;
        if response.layers().is_none() {
            return Err(SoilError::NoLayers);
        }

        let readings = SoilReadings::from_response(&response);
        let result = estimate(&readings);
        tracing::info!(
            nitrogen = %result.nitrogen,
            phosphorus = %result.phosphorus,
            potassium = %result.potassium,
            texture = %result.texture,
            "Derived soil estimate"
        );
        Ok(result)
    }
}
