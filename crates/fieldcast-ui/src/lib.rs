//! Terminal front end for Fieldcast: panel state, background services and
//! text rendering for the weather and soil pipelines.

pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod render;
pub mod services;

pub use app_services::{AppServices, Pipelines};
pub use models::{SoilAction, SoilPanel, WeatherPanel, WeatherView};
