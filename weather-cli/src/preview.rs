//! Offline sample dashboard for layout work.

use weather_core::{CurrentConditions, Dashboard, ForecastDay, Units, WeatherViewModel};

use crate::render;

fn day(date: &str, high: i32, low: i32, condition: &str, icon: &str) -> ForecastDay {
    ForecastDay {
        date: date.to_string(),
        high,
        low,
        condition_main: condition.to_string(),
        icon_code: icon.to_string(),
    }
}

pub fn sample() -> WeatherViewModel {
    WeatherViewModel {
        location: "Mumbai, IN".to_string(),
        current: CurrentConditions {
            location_label: "Mumbai, IN".to_string(),
            temperature: 32,
            condition_main: "Clear".to_string(),
            icon_code: "01d".to_string(),
            humidity_pct: 70,
            wind_speed: 4,
        },
        forecast: vec![
            day("6/1/2023", 28, 18, "Clear", "01d"),
            day("6/2/2023", 27, 17, "Clouds", "02d"),
            day("6/3/2023", 25, 16, "Rain", "10d"),
            day("6/4/2023", 22, 15, "Clouds", "03d"),
            day("6/5/2023", 24, 16, "Clear", "01d"),
        ],
    }
}

pub fn render() -> String {
    let mut dash = Dashboard::new();
    let token = dash.begin();
    dash.complete(token, Ok(sample()));
    render::dashboard(&dash, Units::Metric)
}
