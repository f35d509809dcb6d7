use crate::services::soil_service::SoilError as UiSoilError;
use fieldcast_core::{AppError, NetworkError, ReqwestErrorExt};
use fieldcast_soil::SoilError;

impl From<UiSoilError> for AppError {
    fn from(e: UiSoilError) -> Self {
        match e {
            UiSoilError::Pipeline(err) => {
                let message = err.user_message();
                match err {
                    SoilError::Network(e) => AppError::Network(e.into_network_error()),
                    SoilError::Status(status) => {
                        AppError::Network(NetworkError::ServerError { status, message })
                    }
                    SoilError::Parse(detail) => {
                        AppError::Network(NetworkError::InvalidResponse(detail))
                    }
                    SoilError::NoLayers => AppError::provider("soilgrids", message),
                }
            }
            UiSoilError::NotInitialized => {
                AppError::provider("soil", "Soil service not initialized")
            }
        }
    }
}
