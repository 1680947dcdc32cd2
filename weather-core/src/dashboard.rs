//! Dashboard state and the fetch cycle that drives it.

use std::fmt::Display;

use chrono::TimeZone;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{LocationQuery, WeatherViewModel},
    provider::{WeatherSource, fetch_cycle},
    theme::Backdrop,
    view::build_view_model,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherViewModel),
    Failed(String),
}

/// Identifies one fetch cycle; only the latest one may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct Dashboard {
    state: DashboardState,
    issued: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn view_model(&self) -> Option<&WeatherViewModel> {
        match &self.state {
            DashboardState::Loaded(vm) => Some(vm),
            _ => None,
        }
    }

    /// Start a new cycle. Any earlier token becomes stale.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = DashboardState::Loading;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Apply the outcome of the cycle identified by `token`.
    ///
    /// Returns false and leaves the state untouched if a newer cycle has
    /// been started since.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<WeatherViewModel, WeatherError>,
    ) -> bool {
        if !self.is_current(token) {
            debug!(?token, latest = self.issued, "Dropping stale weather response");
            return false;
        }

        self.state = match result {
            Ok(vm) => DashboardState::Loaded(vm),
            Err(err) => {
                warn!(error = %err, "Weather fetch cycle failed");
                DashboardState::Failed(err.user_message().to_string())
            }
        };
        true
    }

    /// Run one complete cycle for `query` and apply it.
    pub async fn refresh<Tz>(
        &mut self,
        source: &dyn WeatherSource,
        query: &LocationQuery,
        tz: &Tz,
    ) -> &DashboardState
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let token = self.begin();
        let result = load_view_model(source, query, tz).await;
        self.complete(token, result);
        &self.state
    }

    /// Background for the current state; anything but a loaded model gets
    /// the default.
    pub fn backdrop(&self) -> Backdrop {
        self.view_model()
            .map(|vm| Backdrop::for_condition(&vm.current.condition_main))
            .unwrap_or(Backdrop::Default)
    }
}

/// Fetch both payloads and shape them into a view model.
///
/// Front-ends that overlap requests call [`Dashboard::begin`], run this
/// without holding the dashboard, then hand the result to [`Dashboard::complete`].
pub async fn load_view_model<Tz>(
    source: &dyn WeatherSource,
    query: &LocationQuery,
    tz: &Tz,
) -> Result<WeatherViewModel, WeatherError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (current, forecast) = fetch_cycle(source, query).await?;
    build_view_model(&current, &forecast, tz)
}
