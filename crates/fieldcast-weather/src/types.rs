use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the forecast endpoint's `dt_txt` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ICON_URL_BASE: &str = "http://openweathermap.org/img/wn";

/// Unit system requested from the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric | Self::Standard => "m/s",
        }
    }
}

/// Geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// How the user asked to be located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// Geolocate by public IP address
    CurrentLocation,
    /// Look up a free-text city name
    City(String),
}

/// One 3-hour forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Rain volume for the interval in mm, absent when the provider omits it
    pub precipitation: Option<f64>,
    pub description: String,
    pub icon: String,
}

impl IntervalSample {
    /// Calendar day this sample belongs to
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn precipitation_or_zero(&self) -> f64 {
        self.precipitation.unwrap_or(0.0)
    }
}

/// Per-day forecast built from interval samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Accumulated rain for the day in mm
    pub precipitation: f64,
    pub weather: String,
    pub icon: String,
}

impl DailySummary {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Conditions shown as "current weather": the earliest forecast interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub description: String,
    pub icon: String,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub precipitation: f64,
}

impl CurrentConditions {
    pub fn from_sample(sample: &IntervalSample) -> Self {
        Self {
            description: sample.description.clone(),
            icon: sample.icon.clone(),
            temperature: sample.temperature,
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
            precipitation: sample.precipitation_or_zero(),
        }
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Parsed forecast for one coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub coordinate: Coordinate,
    pub units: Units,
    pub samples: Vec<IntervalSample>,
}

impl Forecast {
    /// True when the provider returned no interval list
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn current(&self) -> Option<CurrentConditions> {
        self.samples.first().map(CurrentConditions::from_sample)
    }

    pub fn daily(&self) -> Vec<DailySummary> {
        crate::aggregate::aggregate_daily(&self.samples)
    }
}

/// URL of the provider's icon image for an icon code
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_URL_BASE, icon)
}

/// Location resolution errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location service returned status {0}")]
    Status(u16),
    #[error("Location service reported failure: {0}")]
    Provider(String),
    #[error("City not found")]
    CityNotFound,
    #[error("City lookup failed: {0}")]
    CityLookup(#[source] reqwest::Error),
    #[error("Location response missing field: {0}")]
    MissingField(&'static str),
}

impl LocationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::CityNotFound => "City not found".to_string(),
            Self::CityLookup(_) => {
                "Unable to reach the weather service. Check your connection.".to_string()
            }
            _ => "Unable to retrieve your location. Please enter a city manually.".to_string(),
        }
    }
}

/// Forecast pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to fetch weather data (status {0})")]
    Status(u16),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the weather service. Check your connection.".to_string(),
            Self::Status(_) => "Failed to fetch weather data".to_string(),
            Self::Location(e) => e.user_message(),
            Self::Parse(_) => "Received unexpected weather data.".to_string(),
        }
    }
}
