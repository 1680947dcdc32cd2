use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use weather_core::{
    Advisory, Config, Dashboard, DashboardState, Geolocator, LocationQuery, LocationResolution,
    Units, WeatherSource,
    location::{self, DeniedGeolocator, EMPTY_CITY_ADVISORY, IpGeolocator, StaticGeolocator},
    provider::source_from_config,
};

use crate::{render, splash};

/// Typed at the city prompt to re-run automatic detection.
const DETECT_COMMAND: &str = ":detect";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and location preferences.
    Configure,

    /// Show current conditions and the 5-day forecast once.
    Show {
        /// City to search for; detects the location when absent.
        city: Option<String>,

        #[command(flatten)]
        locate: LocateArgs,

        /// Print the view model as JSON instead of the dashboard.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard: detect the location, then search cities.
    Dashboard {
        #[command(flatten)]
        locate: LocateArgs,
    },

    /// Render a built-in sample dashboard without network access.
    #[cfg(feature = "preview")]
    Preview,
}

#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Latitude to use instead of automatic detection.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of automatic detection.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Skip the intro banner.
    #[arg(long)]
    pub no_splash: bool,
}

impl LocateArgs {
    /// Combine `city` with `--lat`/`--lon`; the city wins and `(0, 0)` is unset.
    fn query(&self, city: Option<&str>) -> Option<LocationQuery> {
        LocationQuery::from_parts(
            self.lat.unwrap_or_default(),
            self.lon.unwrap_or_default(),
            city,
        )
    }

    fn geolocator(&self, config: &Config) -> Box<dyn Geolocator> {
        match self.query(None) {
            Some(LocationQuery::Coordinates(coords)) => Box::new(StaticGeolocator(coords)),
            _ if !config.geolocation => Box::new(DeniedGeolocator),
            _ => Box::new(IpGeolocator::new(config.geolocation_url.clone())),
        }
    }

    /// Decide what `show` fetches for. Blank city input is rejected.
    fn target(&self, city: Option<&str>, config: &Config) -> Result<Target, Advisory> {
        if city.is_some_and(|name| name.trim().is_empty()) {
            return Err(Advisory::new(EMPTY_CITY_ADVISORY));
        }

        match self.query(city) {
            Some(LocationQuery::City(name)) => location::submit_city(&name).map(Target::Search),
            _ => Ok(Target::Locate(self.geolocator(config))),
        }
    }

    fn splash(&self, config: &Config) -> Option<Duration> {
        (!self.no_splash && config.splash_ms > 0).then(|| Duration::from_millis(config.splash_ms))
    }
}

/// What a one-shot `show` fetches for.
#[derive(Debug)]
enum Target {
    Search(LocationResolution),
    Locate(Box<dyn Geolocator>),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, locate, json } => show(city, locate, json).await,
            Command::Dashboard { locate } => dashboard(locate).await,
            #[cfg(feature = "preview")]
            Command::Preview => {
                print!("{}", crate::preview::render());
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()?;
    if !key.trim().is_empty() {
        config.set_api_key(key);
    }

    config.geolocation = Confirm::new("Detect your location from your IP address?")
        .with_default(config.geolocation)
        .prompt()?;

    let start = match config.units {
        Units::Metric => 0,
        Units::Imperial => 1,
    };
    config.units = Select::new("Units:", vec![Units::Metric, Units::Imperial])
        .with_starting_cursor(start)
        .prompt()?;

    config.save_to(&path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, locate: LocateArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    // Blank input is rejected before credentials are required.
    let target = match locate.target(city.as_deref(), &config) {
        Ok(target) => target,
        Err(advisory) => {
            eprint!("{}", render::advisory(&advisory));
            return Ok(());
        }
    };

    let source = source_from_config(&config)?;
    let splash = if json { None } else { locate.splash(&config) };

    let mut dash = Dashboard::new();
    let resolution = splash::behind(splash, async {
        let resolution = match target {
            Target::Search(resolution) => resolution,
            Target::Locate(geolocator) => {
                location::detect(geolocator.as_ref(), source.as_ref()).await
            }
        };
        refresh(&mut dash, source.as_ref(), &resolution).await;
        resolution
    })
    .await;

    if let Some(advisory) = &resolution.advisory {
        let line = render::advisory(advisory);
        if json {
            eprint!("{line}");
        } else {
            print!("{line}");
        }
    }

    if json {
        return print_json(&dash);
    }

    print!("{}", render::dashboard(&dash, config.units));
    Ok(())
}

fn print_json(dash: &Dashboard) -> anyhow::Result<()> {
    match dash.state() {
        DashboardState::Loaded(vm) => {
            let doc = serde_json::json!({
                "backdrop": dash.backdrop().name(),
                "weather": vm,
            });
            let text = serde_json::to_string_pretty(&doc).context("Failed to serialize weather")?;
            println!("{text}");
            Ok(())
        }
        DashboardState::Failed(msg) => Err(anyhow!("{msg}")),
        DashboardState::Idle | DashboardState::Loading => Err(anyhow!("No weather data loaded")),
    }
}

async fn dashboard(locate: LocateArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;
    let geolocator = locate.geolocator(&config);
    let mut dash = Dashboard::new();

    let mut advisory = splash::behind(
        locate.splash(&config),
        detect_and_refresh(&mut dash, geolocator.as_ref(), source.as_ref()),
    )
    .await;

    loop {
        if let Some(advisory) = advisory.take() {
            print!("{}", render::advisory(&advisory));
        }
        print!("{}", render::dashboard(&dash, config.units));

        let input = Text::new("City:")
            .with_placeholder("Enter city name")
            .with_help_message("Enter to search, :detect to locate again, Esc to quit")
            .prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if input.trim() == DETECT_COMMAND {
            print!("{}", render::loading());
            advisory = detect_and_refresh(&mut dash, geolocator.as_ref(), source.as_ref()).await;
            continue;
        }

        match location::submit_city(&input) {
            Ok(resolution) => {
                print!("{}", render::loading());
                refresh(&mut dash, source.as_ref(), &resolution).await;
            }
            Err(rejected) => advisory = Some(rejected),
        }
    }

    Ok(())
}

async fn detect_and_refresh(
    dash: &mut Dashboard,
    geolocator: &dyn Geolocator,
    source: &dyn WeatherSource,
) -> Option<Advisory> {
    let resolution = location::detect(geolocator, source).await;
    refresh(dash, source, &resolution).await;
    resolution.advisory
}

async fn refresh(dash: &mut Dashboard, source: &dyn WeatherSource, resolution: &LocationResolution) {
    debug!(label = %resolution.label, query = ?resolution.query, "Location resolved");
    dash.refresh(source, &resolution.query, &Local).await;
}
