use crate::services::weather_service::WeatherError as UiWeatherError;
use fieldcast_core::{AppError, NetworkError, ReqwestErrorExt};
use fieldcast_weather::{LocationError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Pipeline(err) => {
                let message = err.user_message();
                match err {
                    WeatherError::Network(e) => AppError::Network(e.into_network_error()),
                    WeatherError::Status(status) => {
                        AppError::Network(NetworkError::ServerError { status, message })
                    }
                    WeatherError::Parse(detail) => {
                        AppError::Network(NetworkError::InvalidResponse(detail))
                    }
                    WeatherError::Location(loc) => location_error(loc),
                }
            }
            UiWeatherError::NotInitialized => {
                AppError::provider("weather", "Weather service not initialized")
            }
        }
    }
}

fn location_error(e: LocationError) -> AppError {
    let message = e.user_message();
    match e {
        LocationError::CityNotFound => AppError::NotFound(message),
        LocationError::CityLookup(err) => AppError::Network(err.into_network_error()),
        LocationError::Network(err) => {
            AppError::location_unavailable(err.into_network_error(), message)
        }
        LocationError::Status(status) => AppError::location_unavailable(
            NetworkError::ServerError {
                status,
                message: format!("geolocation returned status {}", status),
            },
            message,
        ),
        LocationError::Provider(_) | LocationError::MissingField(_) => {
            AppError::provider("geolocation", message)
        }
    }
}
