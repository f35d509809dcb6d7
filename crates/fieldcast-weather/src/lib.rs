//! Weather pipeline for Fieldcast
//!
//! Resolves a coordinate (IP geolocation or city lookup), fetches the
//! OpenWeather 5-day/3-hour forecast and folds it into per-day summaries.

pub mod aggregate;
pub mod location;
pub mod provider;
pub mod types;

pub use aggregate::{aggregate_daily, DailyIndex};
pub use location::LocationResolver;
pub use provider::WeatherProvider;
pub use types::*;
