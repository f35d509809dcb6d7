//! Soil pipeline for Fieldcast
//!
//! Queries SoilGrids for topsoil properties and turns them into rough
//! nitrogen/phosphorus/potassium estimates, pH and a texture class.

pub mod client;
pub mod estimate;
pub mod recommend;
pub mod types;

pub use client::SoilClient;
pub use estimate::{estimate, NutrientEstimate, SoilReadings, UNAVAILABLE};
pub use recommend::{recommend_crop, Crop};
pub use types::*;
