pub mod soil_panel;
pub mod weather_panel;

pub use soil_panel::{SoilAction, SoilPanel};
pub use weather_panel::{WeatherPanel, WeatherView};
