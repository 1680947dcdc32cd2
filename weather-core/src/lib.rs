//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location detection with a fixed fallback, and manual city search
//! - The OpenWeather client and the two-request fetch cycle
//! - Reduction of the 3-hourly forecast to one entry per day
//! - The display-ready view model and dashboard state
//! - Condition/icon lookup tables used by the presentation layer
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod payload;
pub mod provider;
pub mod theme;
pub mod view;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardState, RequestToken};
pub use error::{GeolocationError, WeatherError};
pub use location::{Advisory, Geolocator, LocationResolution};
pub use model::{
    Coordinates, CurrentConditions, ForecastDay, LocationQuery, Units, WeatherViewModel,
};
pub use provider::{WeatherSource, fetch_cycle};
pub use theme::Backdrop;
