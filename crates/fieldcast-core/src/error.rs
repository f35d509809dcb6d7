//! Centralized error types for Fieldcast.
//!
//! Pipeline failures fall into three user-visible classes:
//! - transport problems ([`NetworkError`])
//! - a provider answering successfully but reporting failure ([`AppError::Provider`])
//! - a lookup that matched nothing ([`AppError::NotFound`])
//!
//! Missing fields inside an otherwise good response are not errors; the
//! soil estimator degrades them to "unavailable" one value at a time.

use thiserror::Error;

/// Error surfaced to the panels and the CLI.
///
/// `user_message()` is the single line shown to the user.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Transport failure: {0}")]
    Network(#[from] NetworkError),

    /// Transport failure while locating the user; `hint` is what they see
    #[error("Location lookup failed: {source}")]
    LocationUnavailable {
        #[source]
        source: NetworkError,
        hint: String,
    },

    #[error("{service} reported a failure: {message}")]
    Provider { service: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn location_unavailable(source: NetworkError, hint: impl Into<String>) -> Self {
        AppError::LocationUnavailable {
            source,
            hint: hint.into(),
        }
    }

    pub fn provider(service: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Provider {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::LocationUnavailable { hint, .. } => hint.clone(),
            AppError::Provider { message, .. } => message.clone(),
            AppError::NotFound(what) => what.clone(),
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Io(_) => "A file operation failed. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Transport failures talking to a provider.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Could not reach host: {0}")]
    ConnectionFailed(String),

    #[error("Request exceeded the HTTP timeout")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection.".to_string()
            }
            NetworkError::Timeout => "The request timed out. Please try again.".to_string(),
            // Carries the text the failing pipeline shows for a bad status
            NetworkError::ServerError { message, .. } => message.clone(),
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
        }
    }
}

/// Problems with the loaded configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration rejected: {0}")]
    Invalid(String),

    #[error("Setting {0} is not set")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "The config file has invalid values. Run `fieldcast config` for details.",
            ConfigError::MissingSetting(_) => "A required setting is missing from the config file.",
        }
    }
}

/// Classify a `reqwest` failure as a [`NetworkError`].
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
