//! Serde mirrors of the OpenWeather JSON bodies.
//!
//! Only the fields the dashboard reads are declared; anything else in the
//! response is ignored. A missing required field fails deserialization.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    /// Percent; some stations report it as a float.
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Absent over open sea and for some remote coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
}

/// Just the place name from the `/weather` endpoint, for reverse lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceName {
    pub name: String,
}

/// Body of the `/weather` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: Sys,
    pub main: CurrentMain,
    pub wind: Wind,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalMain {
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One 3-hour sample of the `/forecast` series.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastInterval {
    /// Unix timestamp, seconds.
    pub dt: i64,
    pub main: IntervalMain,
    pub weather: Vec<Condition>,
}

/// Body of the `/forecast` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub list: Vec<ForecastInterval>,
}
