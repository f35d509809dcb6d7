use serde::{Deserialize, Serialize};

/// Depth band every estimate is read from
pub const DEPTH_BAND: &str = "0-5cm";

/// SoilGrids properties requested by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilProperty {
    /// pH in water
    Ph,
    /// Organic carbon density
    OrganicCarbonDensity,
    /// Cation exchange capacity
    Cec,
    Sand,
    Clay,
}

impl SoilProperty {
    pub const ALL: [SoilProperty; 5] = [
        SoilProperty::Ph,
        SoilProperty::OrganicCarbonDensity,
        SoilProperty::Cec,
        SoilProperty::Sand,
        SoilProperty::Clay,
    ];

    /// Layer name used by SoilGrids
    pub fn layer_name(&self) -> &'static str {
        match self {
            Self::Ph => "phh2o",
            Self::OrganicCarbonDensity => "ocd",
            Self::Cec => "cec",
            Self::Sand => "sand",
            Self::Clay => "clay",
        }
    }
}

/// Coarse soil texture class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilTexture {
    Sandy,
    Clay,
    Loamy,
}

impl SoilTexture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandy => "sandy",
            Self::Clay => "clay",
            Self::Loamy => "loamy",
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SoilTexture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandy" => Ok(Self::Sandy),
            "clay" => Ok(Self::Clay),
            "loamy" => Ok(Self::Loamy),
            other => Err(format!("unknown soil texture: {}", other)),
        }
    }
}

/// SoilGrids `properties/query` response body (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilResponse {
    #[serde(default)]
    pub properties: Option<SoilProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilProperties {
    #[serde(default)]
    pub layers: Option<Vec<SoilLayer>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoilLayer {
    pub name: String,
    #[serde(default)]
    pub unit_measure: Option<UnitMeasure>,
    #[serde(default)]
    pub depths: Vec<DepthBand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitMeasure {
    /// Divisor converting mapped units to conventional units
    #[serde(default)]
    pub d_factor: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepthBand {
    pub label: String,
    #[serde(default)]
    pub values: DepthValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepthValues {
    #[serde(default)]
    pub mean: Option<f64>,
}

impl SoilResponse {
    pub fn layers(&self) -> Option<&[SoilLayer]> {
        self.properties.as_ref()?.layers.as_deref()
    }

    /// `mean / d_factor` for a layer at the given depth band.
    ///
    /// A missing or zero divisor counts as 1.
    pub fn layer_value(&self, name: &str, depth_label: &str) -> Option<f64> {
        let layer = self.layers()?.iter().find(|l| l.name == name)?;
        let depth = layer.depths.iter().find(|d| d.label == depth_label)?;
        let mean = depth.values.mean?;
        let divisor = layer
            .unit_measure
            .as_ref()
            .and_then(|u| u.d_factor)
            .filter(|d| *d != 0.0)
            .unwrap_or(1.0);
        Some(mean / divisor)
    }

    pub fn property(&self, property: SoilProperty) -> Option<f64> {
        self.layer_value(property.layer_name(), DEPTH_BAND)
    }
}

/// Soil pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum SoilError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to fetch soil data (status {0})")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Soil response has no property layers")]
    NoLayers,
}

impl SoilError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the soil service. Check your connection.".to_string(),
            Self::Status(_) => "Failed to fetch soil data".to_string(),
            Self::Parse(_) => "Received unexpected soil data.".to_string(),
            Self::NoLayers => "No soil data available for this location.".to_string(),
        }
    }
}
