use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair. `(0, 0)` is treated as "not set".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

/// How the remote service should locate the weather station.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinates(Coordinates),
    City(String),
}

impl LocationQuery {
    /// Resolve loose `(lat, lon, city)` parts into a query.
    ///
    /// A non-empty city name always wins over coordinates. Otherwise the
    /// coordinates are used unless they are the `(0, 0)` sentinel, in which
    /// case there is nothing to query.
    pub fn from_parts(lat: f64, lon: f64, city: Option<&str>) -> Option<Self> {
        if let Some(name) = city.map(str::trim).filter(|name| !name.is_empty()) {
            return Some(LocationQuery::City(name.to_string()));
        }

        let coords = Coordinates::new(lat, lon);
        (!coords.is_unset()).then_some(LocationQuery::Coordinates(coords))
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates(c) => {
                vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
            }
        }
    }
}

/// Measurement system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentConditions {
    pub location_label: String,
    pub temperature: i32,
    pub condition_main: String,
    pub icon_code: String,
    pub humidity_pct: i32,
    pub wind_speed: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    /// Locale-formatted calendar date; also the de-duplication key.
    pub date: String,
    pub high: i32,
    pub low: i32,
    pub condition_main: String,
    pub icon_code: String,
}

/// Everything the dashboard needs to draw one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherViewModel {
    pub location: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}
