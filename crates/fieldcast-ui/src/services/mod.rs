pub mod soil_service;
pub mod weather_service;

pub use soil_service::{
    request_fetch as request_soil_fetch, SoilError, SoilServiceMessage,
};
pub use weather_service::{
    request_fetch as request_weather_fetch, WeatherError, WeatherReport, WeatherServiceMessage,
};
