//! Centralized application services.
//!
//! `AppServices` owns the tokio runtime, the configured pipeline clients and
//! the result channels each service reports back on. The clients sit behind a
//! `RwLock` so a new configuration can replace them without restarting.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use fieldcast_core::{AppError, Config, ConfigError, NetworkError};
use fieldcast_soil::SoilClient;
use fieldcast_weather::{Coordinate, LocationResolver, Units, WeatherProvider};

pub use crate::services::{SoilServiceMessage, WeatherServiceMessage};

/// The three provider clients plus the soil fallback coordinate
#[derive(Debug, Clone)]
pub struct Pipelines {
    pub resolver: LocationResolver,
    pub weather: WeatherProvider,
    pub soil: SoilClient,
    pub soil_coordinate: Coordinate,
}

impl Pipelines {
    /// Build every client from one shared HTTP client
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.as_str())
            .build()
            .map_err(|e| NetworkError::ConnectionFailed(e.to_string()))?;

        let weather = WeatherProvider::with_client(
            client.clone(),
            config.weather.base_url.as_str(),
            config.weather.api_key.as_str(),
            weather_units(config.weather.units),
        );
        let resolver = LocationResolver::new(
            client.clone(),
            config.location.ip_api_url.as_str(),
            weather.clone(),
        );
        let soil = SoilClient::with_client(client, config.soil.base_url.as_str());

        Ok(Self {
            resolver,
            weather,
            soil,
            soil_coordinate: Coordinate::new(config.soil.latitude, config.soil.longitude),
        })
    }
}

fn weather_units(units: fieldcast_core::Units) -> Units {
    match units {
        fieldcast_core::Units::Metric => Units::Metric,
        fieldcast_core::Units::Imperial => Units::Imperial,
        fieldcast_core::Units::Standard => Units::Standard,
    }
}

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    pipelines: RwLock<Option<Arc<Pipelines>>>,

    weather_tx: Sender<WeatherServiceMessage>,
    weather_rx: Mutex<Receiver<WeatherServiceMessage>>,

    soil_tx: Sender<SoilServiceMessage>,
    soil_rx: Mutex<Receiver<SoilServiceMessage>>,
}

impl AppServices {
    /// Start the runtime; pipelines stay unset until `configure` succeeds
    pub fn new() -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("fieldcast-tokio")
            .build()?;

        let (weather_tx, weather_rx) = mpsc::channel();
        let (soil_tx, soil_rx) = mpsc::channel();

        Ok(Self {
            runtime,
            pipelines: RwLock::new(None),
            weather_tx,
            weather_rx: Mutex::new(weather_rx),
            soil_tx,
            soil_rx: Mutex::new(soil_rx),
        })
    }

    /// Start the runtime and configure pipelines in one step
    pub fn with_config(config: &Config) -> Result<Self, AppError> {
        let services = Self::new()?;
        services.configure(config)?;
        Ok(services)
    }

    /// (Re)build the pipeline clients from a configuration
    pub fn configure(&self, config: &Config) -> Result<(), AppError> {
        let pipelines = Pipelines::from_config(config)?;
        *self.pipelines.write() = Some(Arc::new(pipelines));
        tracing::info!("Pipelines configured");
        Ok(())
    }

    pub fn pipelines(&self) -> Option<Arc<Pipelines>> {
        self.pipelines.read().clone()
    }

    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn weather_sender(&self) -> Sender<WeatherServiceMessage> {
        self.weather_tx.clone()
    }

    pub fn soil_sender(&self) -> Sender<SoilServiceMessage> {
        self.soil_tx.clone()
    }

    /// Block until the next weather result arrives
    pub fn recv_weather(&self) -> Option<WeatherServiceMessage> {
        self.weather_rx.lock().recv().ok()
    }

    /// Block until the next soil result arrives
    pub fn recv_soil(&self) -> Option<SoilServiceMessage> {
        self.soil_rx.lock().recv().ok()
    }
}
