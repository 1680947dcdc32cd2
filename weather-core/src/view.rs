use std::fmt::Display;

use chrono::TimeZone;

use crate::error::{Endpoint, WeatherError};
use crate::forecast::reduce_daily;
use crate::model::{CurrentConditions, WeatherViewModel};
use crate::payload::{CurrentPayload, ForecastPayload};

/// Round to the nearest integer, halves towards positive infinity
/// (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// `"{name}, {country}"`, or just the name when no country is reported.
fn location_label(current: &CurrentPayload) -> String {
    match current.sys.country.as_deref().filter(|c| !c.is_empty()) {
        Some(country) => format!("{}, {country}", current.name),
        None => current.name.clone(),
    }
}

/// Merge both payloads of one fetch cycle into a display-ready model.
///
/// Either payload missing its condition entry fails the whole build.
pub fn build_view_model<Tz>(
    current: &CurrentPayload,
    forecast: &ForecastPayload,
    tz: &Tz,
) -> Result<WeatherViewModel, WeatherError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let condition = current
        .weather
        .first()
        .ok_or_else(|| WeatherError::malformed(Endpoint::Current, "no weather entry"))?;

    let location = location_label(current);
    let days = reduce_daily(&forecast.list, tz)?;

    Ok(WeatherViewModel {
        current: CurrentConditions {
            location_label: location.clone(),
            temperature: round_half_up(current.main.temp),
            condition_main: condition.main.clone(),
            icon_code: condition.icon.clone(),
            humidity_pct: round_half_up(current.main.humidity),
            wind_speed: round_half_up(current.wind.speed),
        },
        location,
        forecast: days,
    })
}
