use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{Endpoint, WeatherError},
    model::{Coordinates, LocationQuery, Units},
    payload::{CurrentPayload, ForecastPayload, PlaceName},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String, units: Units) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
            http: Client::new(),
        }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let mut params = query.query_params();
        params.push(("units", self.units.as_str().to_string()));
        params.push(("appid", self.api_key.clone()));

        let res = self
            .http
            .get(self.url(endpoint))
            .query(&params)
            .send()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { endpoint, source })?;

        if !status.is_success() {
            warn!(%endpoint, %status, "OpenWeather request failed");
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        debug!(%endpoint, bytes = body.len(), "OpenWeather response received");
        serde_json::from_str(&body).map_err(|e| WeatherError::malformed(endpoint, e.to_string()))
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentPayload, WeatherError> {
        self.get_json(Endpoint::Current, query).await
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<ForecastPayload, WeatherError> {
        self.get_json(Endpoint::Forecast, query).await
    }

    async fn city_name(&self, coords: Coordinates) -> Result<String, WeatherError> {
        let place: PlaceName = self
            .get_json(Endpoint::Current, &LocationQuery::Coordinates(coords))
            .await?;
        Ok(place.name)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
