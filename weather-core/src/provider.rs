use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, LocationQuery},
    payload::{CurrentPayload, ForecastPayload},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// Remote source of current conditions and the 5-day forecast.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentPayload, WeatherError>;

    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastPayload, WeatherError>;

    /// Reverse lookup of a human-readable place name for coordinates.
    ///
    /// The default goes through [`WeatherSource::current`]; clients that can
    /// decode the name alone should override it.
    async fn city_name(&self, coords: Coordinates) -> Result<String, WeatherError> {
        let payload = self.current(&LocationQuery::Coordinates(coords)).await?;
        Ok(payload.name)
    }
}

/// Issue both requests for one cycle concurrently.
///
/// The first failure aborts the cycle and the other result is dropped.
pub async fn fetch_cycle(
    source: &dyn WeatherSource,
    query: &LocationQuery,
) -> Result<(CurrentPayload, ForecastPayload), WeatherError> {
    debug!(?query, "Fetching weather data");

    let (current, forecast) = tokio::try_join!(source.current(query), source.forecast(query))?;

    debug!(location = %current.name, intervals = forecast.list.len(), "Weather data received");
    Ok((current, forecast))
}

/// Construct the OpenWeather client from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let client = OpenWeatherClient::new(api_key.to_owned(), config.base_url.clone(), config.units);
    Ok(Box::new(client))
}
