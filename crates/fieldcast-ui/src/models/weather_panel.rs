//! Weather panel state.
//!
//! Each fetch is tagged with a generation number. Starting a new fetch bumps
//! the generation, so a slow response to an earlier search can never
//! overwrite the result of a later one.

use fieldcast_core::AppError;
use fieldcast_weather::LocationQuery;

use crate::services::{WeatherReport, WeatherServiceMessage};

pub const NO_DATA_MESSAGE: &str = "No weather data available.";

#[derive(Debug, Default)]
pub struct WeatherPanel {
    generation: u64,
    loading: bool,
    error_message: Option<String>,
    report: Option<WeatherReport>,
}

/// What the panel should currently display
#[derive(Debug, PartialEq)]
pub enum WeatherView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Ready(&'a WeatherReport),
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the on-load fetch for the caller's own location
    pub fn start_current_location(&mut self) -> (u64, LocationQuery) {
        (self.begin(), LocationQuery::CurrentLocation)
    }

    /// Start a city search; blank input is ignored
    pub fn submit_search(&mut self, text: &str) -> Option<(u64, LocationQuery)> {
        let city = text.trim();
        if city.is_empty() {
            return None;
        }
        Some((self.begin(), LocationQuery::City(city.to_string())))
    }

    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error_message = None;
        self.generation
    }

    /// Apply a service result. Returns false when the result was stale.
    pub fn apply(&mut self, message: WeatherServiceMessage) -> bool {
        let WeatherServiceMessage::FetchDone { generation, result } = message;
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale weather result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(report) => {
                self.error_message = None;
                self.report = Some(report);
            }
            Err(e) => {
                let err = AppError::from(e);
                tracing::warn!("Weather pipeline failed: {}", err);
                self.error_message = Some(err.user_message());
                self.report = None;
            }
        }
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn view(&self) -> WeatherView<'_> {
        if self.loading {
            return WeatherView::Loading;
        }
        if let Some(message) = &self.error_message {
            return WeatherView::Error(message);
        }
        match &self.report {
            Some(report) if !report.is_empty() => WeatherView::Ready(report),
            _ => WeatherView::Empty,
        }
    }
}
