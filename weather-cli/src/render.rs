//! Terminal rendering of the dashboard state.

use colored::Colorize;
use weather_core::{
    Advisory, Dashboard, DashboardState, Units, WeatherViewModel,
    theme::{Rgb, icon_glyph, icon_url},
};

const WIDTH: usize = 48;

/// Render whatever the dashboard currently holds.
pub fn dashboard(dash: &Dashboard, units: Units) -> String {
    let mut out = gradient_bar("Weather Forecast", dash.backdrop().gradient());
    out.push('\n');

    match dash.state() {
        DashboardState::Idle => {}
        DashboardState::Loading => out.push_str(&loading()),
        DashboardState::Failed(msg) => out.push_str(&error(msg)),
        DashboardState::Loaded(vm) => out.push_str(&view(vm, units)),
    }

    out
}

pub fn loading() -> String {
    format!("{}\n", "Loading weather data...".dimmed())
}

pub fn error(msg: &str) -> String {
    format!("{}\n", msg.red().bold())
}

pub fn advisory(advisory: &Advisory) -> String {
    format!("{} {}\n", "!".yellow().bold(), advisory.as_str().yellow())
}

pub fn view(vm: &WeatherViewModel, units: Units) -> String {
    let t = units.temperature_symbol();
    let current = &vm.current;
    let mut out = String::new();

    out.push_str(&format!(
        "\n {}  {}\n",
        icon_glyph(&current.icon_code),
        vm.location.bold()
    ));
    out.push_str(&format!(
        "    {}  {}\n",
        format!("{}{t}", current.temperature).bold(),
        current.condition_main
    ));
    out.push_str(&format!(
        "    Humidity: {}%   Wind: {} {}\n",
        current.humidity_pct,
        current.wind_speed,
        units.speed_symbol()
    ));
    out.push_str(&format!("    {}\n", icon_url(&current.icon_code).dimmed()));

    if !vm.forecast.is_empty() {
        out.push_str(&format!("\n {}\n", "5-Day Forecast".bold()));
        for day in &vm.forecast {
            out.push_str(&format!(
                " {:<12} {}  {:<13} {} / {}\n",
                day.date,
                icon_glyph(&day.icon_code),
                day.condition_main,
                format!("{}{t}", day.high).red(),
                format!("{}{t}", day.low).blue(),
            ));
        }
    }

    out
}

/// Title centred on a horizontal colour gradient.
pub fn gradient_bar(title: &str, (from, to): (Rgb, Rgb)) -> String {
    let text = format!("{title:^width$}", width = WIDTH);
    let steps = text.chars().count().saturating_sub(1).max(1) as f32;

    let mut out = String::new();
    for (i, ch) in text.chars().enumerate() {
        let Rgb(r, g, b) = lerp(from, to, i as f32 / steps);
        out.push_str(&ch.to_string().black().bold().on_truecolor(r, g, b).to_string());
    }
    out.push('\n');
    out
}

fn lerp(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
