//! Simple crop recommendation from soil texture and growing conditions.

use serde::Serialize;

use crate::types::SoilTexture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Crop {
    Wheat,
    Rice,
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wheat => f.write_str("Wheat"),
            Self::Rice => f.write_str("Rice"),
        }
    }
}

/// Wheat on loamy soil above 20 degrees and 100 mm of rain, otherwise rice
pub fn recommend_crop(texture: SoilTexture, temperature: f64, rainfall: f64) -> Crop {
    if texture == SoilTexture::Loamy && temperature > 20.0 && rainfall > 100.0 {
        Crop::Wheat
    } else {
        Crop::Rice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheat_needs_all_three_conditions() {
        assert_eq!(recommend_crop(SoilTexture::Loamy, 25.0, 150.0), Crop::Wheat);
        assert_eq!(recommend_crop(SoilTexture::Sandy, 25.0, 150.0), Crop::Rice);
        assert_eq!(recommend_crop(SoilTexture::Loamy, 20.0, 150.0), Crop::Rice);
        assert_eq!(recommend_crop(SoilTexture::Loamy, 25.0, 100.0), Crop::Rice);
    }

    #[test]
    fn test_display() {
        assert_eq!(Crop::Wheat.to_string(), "Wheat");
    }
}
