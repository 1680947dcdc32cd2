//! Location acquisition: automatic detection with a fixed fallback, and
//! manual city submission.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    error::GeolocationError,
    model::{Coordinates, LocationQuery},
    provider::WeatherSource,
};

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

pub const FALLBACK_CITY: &str = "Mumbai";
pub const FALLBACK_COORDINATES: Coordinates = Coordinates::new(19.076, 72.8777);

pub const PERMISSION_DENIED_ADVISORY: &str =
    "Location permission denied. Using Mumbai as default location.";
pub const UNAVAILABLE_ADVISORY: &str =
    "Geolocation is not available. Using Mumbai as default location.";
pub const LOOKUP_FAILED_ADVISORY: &str =
    "Failed to fetch city name. Using Mumbai as default location.";
pub const EMPTY_CITY_ADVISORY: &str = "Please enter a city name";

/// Non-fatal message shown next to the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory(pub String);

impl Advisory {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of resolving where to fetch weather for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResolution {
    pub query: LocationQuery,
    /// Display name only; never used to re-query.
    pub label: String,
    pub advisory: Option<Advisory>,
}

impl LocationResolution {
    pub fn fallback(advisory: &str) -> Self {
        Self {
            query: LocationQuery::Coordinates(FALLBACK_COORDINATES),
            label: FALLBACK_CITY.to_string(),
            advisory: Some(Advisory::new(advisory)),
        }
    }
}

#[async_trait]
pub trait Geolocator: Send + Sync + fmt::Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Coordinates supplied up front, e.g. from the command line.
#[derive(Debug, Clone, Copy)]
pub struct StaticGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for StaticGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Stands in for a user who refused location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(url: String) -> Self {
        Self {
            url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        if !res.status().is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "lookup returned status {}",
                res.status()
            )));
        }

        let body: IpLookupResponse = res
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        if body.status.as_deref().is_some_and(|s| s != "success") {
            return Err(GeolocationError::Unavailable(
                body.message.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(GeolocationError::Unavailable(
                "lookup returned no coordinates".to_string(),
            )),
        }
    }
}

/// Resolve the user's position automatically.
///
/// Never fails: denial, unavailability or a failed reverse lookup all
/// resolve to the Mumbai fallback with an advisory.
pub async fn detect(geolocator: &dyn Geolocator, source: &dyn WeatherSource) -> LocationResolution {
    let coords = match geolocator.locate().await {
        Ok(coords) if !coords.is_unset() => coords,
        Ok(_) => {
            warn!("Geolocation returned the unset position, using fallback");
            return LocationResolution::fallback(UNAVAILABLE_ADVISORY);
        }
        Err(GeolocationError::PermissionDenied) => {
            warn!("Geolocation permission denied, using fallback");
            return LocationResolution::fallback(PERMISSION_DENIED_ADVISORY);
        }
        Err(GeolocationError::Unavailable(reason)) => {
            warn!(%reason, "Geolocation unavailable, using fallback");
            return LocationResolution::fallback(UNAVAILABLE_ADVISORY);
        }
    };

    debug!(lat = coords.lat, lon = coords.lon, "Position detected");

    match source.city_name(coords).await {
        Ok(name) => {
            info!(city = %name, "Location detected");
            LocationResolution {
                query: LocationQuery::Coordinates(coords),
                label: name,
                advisory: None,
            }
        }
        Err(err) => {
            warn!(error = %err, "Reverse city lookup failed, using fallback");
            LocationResolution::fallback(LOOKUP_FAILED_ADVISORY)
        }
    }
}

/// Validate free-text city input. Blank input issues no query.
pub fn submit_city(input: &str) -> Result<LocationResolution, Advisory> {
    let name = input.trim();
    if name.is_empty() {
        return Err(Advisory::new(EMPTY_CITY_ADVISORY));
    }

    Ok(LocationResolution {
        query: LocationQuery::City(name.to_string()),
        label: name.to_string(),
        advisory: None,
    })
}
