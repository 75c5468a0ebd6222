use anyhow::{Context, bail};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use skyglass_core::{
    Config, Coordinates, DashboardMode, LocationSource, LocationSourceKind, WeatherOrchestrator,
    location::NoLocation, location_source_from_config, provider_from_config,
};

use crate::{demo, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyglass", version, about = "SkyGlass weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the dashboard as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// OpenWeatherMap API key; overrides the configured one.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key and the location source.
    Configure,

    /// Show weather for a place name.
    Show {
        /// City or place, e.g. "Paris" or "Portland, US".
        #[arg(required = true, num_args = 1..)]
        place: Vec<String>,
    },

    /// Show weather for the current location.
    Here,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { command, json, api_key, .. } = self;

        let mut config = Config::load()?;
        if let Some(key) = api_key {
            config.set_api_key(key);
        }

        match command {
            Command::Configure => configure(config),
            Command::Show { place } => {
                let place = place.join(" ");
                let place = place.trim();
                if place.is_empty() {
                    bail!("Please enter a city name");
                }
                if config.api_key().is_none() {
                    bail!(
                        "API key required for search functionality.\n\
                         Hint: run `skyglass configure` and enter your API key."
                    );
                }

                show_dashboard(&config, DashboardMode::ByPlaceName(place.to_string()), json).await
            }
            Command::Here => {
                if config.api_key().is_none() {
                    tracing::warn!("no API key configured, showing demo data");
                    eprintln!("{}\n", demo::SETUP_HINT);
                    let today = Local::now().date_naive();
                    return render::print(&demo::dashboard(today), json, today);
                }

                show_dashboard(&config, DashboardMode::ByLocation, json).await
            }
        }
    }
}

async fn show_dashboard(config: &Config, mode: DashboardMode, json: bool) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let location: Box<dyn LocationSource> = match mode {
        DashboardMode::ByLocation => location_source_from_config(&config.location)?,
        DashboardMode::ByPlaceName(_) => Box::new(NoLocation),
    };

    let orchestrator = WeatherOrchestrator::new(provider, location);

    match orchestrator.fetch_dashboard(&mode).await {
        Ok(data) => render::print(&data, json, Local::now().date_naive()),
        Err(err) => {
            tracing::error!(error = %err, "could not load dashboard");
            let message = err.user_message(&mode);
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

/// Interactive setup: API key and where `skyglass here` gets coordinates.
fn configure(mut config: Config) -> anyhow::Result<()> {
    let current_key = config.api_key().unwrap_or_default().to_string();
    let key = Text::new("OpenWeatherMap API key:")
        .with_default(&current_key)
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(key.to_string());

    let source = Select::new(
        "Location source for `skyglass here`:",
        LocationSourceKind::all().to_vec(),
    )
    .with_help_message("ip: approximate, from your IP address | fixed: coordinates you enter | disabled: never look up location")
    .prompt()
    .context("Failed to read location source")?;

    match source {
        LocationSourceKind::Fixed => {
            let latitude = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please enter a number")
                .prompt()
                .context("Failed to read latitude")?;
            let longitude = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please enter a number")
                .prompt()
                .context("Failed to read longitude")?;
            config.set_fixed_location(validate_coordinates(latitude, longitude)?);
        }
        other => config.location.source = Some(other),
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn validate_coordinates(latitude: f64, longitude: f64) -> anyhow::Result<Coordinates> {
    if !(-90.0..=90.0).contains(&latitude) {
        bail!("Latitude must be between -90 and 90, got {latitude}");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("Longitude must be between -180 and 180, got {longitude}");
    }
    Ok(Coordinates::new(latitude, longitude))
}
