use std::fmt;

use thiserror::Error;

/// Text shown to the user whenever a fetch cycle fails, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

/// Which remote endpoint a request was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
        }
    }

    /// Path segment appended to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to send request to OpenWeather ({endpoint}): {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed OpenWeather {endpoint} response: {reason}")]
    Malformed { endpoint: Endpoint, reason: String },
}

impl WeatherError {
    pub fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        WeatherError::Malformed {
            endpoint,
            reason: reason.into(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            WeatherError::Transport { endpoint, .. }
            | WeatherError::Status { endpoint, .. }
            | WeatherError::Malformed { endpoint, .. } => *endpoint,
        }
    }

    /// Generic message for the dashboard; details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Why automatic location detection did not produce coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable: {0}")]
    Unavailable(String),
}
