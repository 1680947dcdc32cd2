//! Collapses the 3-hourly forecast series into one entry per calendar day.
//!
//! The representative of each day is its first (earliest) interval, not an
//! aggregate over the whole day.

use std::collections::HashSet;
use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::error::{Endpoint, WeatherError};
use crate::model::ForecastDay;
use crate::payload::ForecastInterval;
use crate::view::round_half_up;

pub const MAX_FORECAST_DAYS: usize = 5;

/// Short numeric date, e.g. `6/1/2024`.
pub const DATE_KEY_FORMAT: &str = "%-m/%-d/%Y";

/// Calendar-date key of a unix timestamp in `tz`.
pub fn date_key<Tz>(timestamp: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(tz).format(DATE_KEY_FORMAT).to_string())
}

/// Keep the first interval of every distinct date, in input order, up to
/// [`MAX_FORECAST_DAYS`] entries.
pub fn reduce_daily<Tz>(
    intervals: &[ForecastInterval],
    tz: &Tz,
) -> Result<Vec<ForecastDay>, WeatherError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut seen = HashSet::new();
    let mut days = Vec::with_capacity(MAX_FORECAST_DAYS);

    for interval in intervals {
        if days.len() == MAX_FORECAST_DAYS {
            break;
        }

        let date = date_key(interval.dt, tz).ok_or_else(|| {
            WeatherError::malformed(
                Endpoint::Forecast,
                format!("timestamp {} is out of range", interval.dt),
            )
        })?;

        if !seen.insert(date.clone()) {
            continue;
        }

        let condition = interval.weather.first().ok_or_else(|| {
            WeatherError::malformed(
                Endpoint::Forecast,
                format!("interval at {} has no weather entry", interval.dt),
            )
        })?;

        days.push(ForecastDay {
            date,
            high: round_half_up(interval.main.temp_max),
            low: round_half_up(interval.main.temp_min),
            condition_main: condition.main.clone(),
            icon_code: condition.icon.clone(),
        });
    }

    Ok(days)
}
