use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fieldcast_core::{Config, ConfigError};
use fieldcast_soil::{recommend_crop, SoilTexture};
use fieldcast_ui::render::{render_soil, render_weather};
use fieldcast_ui::services::{request_soil_fetch, request_weather_fetch};
use fieldcast_ui::{AppServices, SoilAction, SoilPanel, WeatherPanel};
use fieldcast_weather::Coordinate;

#[derive(Debug, Parser)]
#[command(name = "fieldcast", version, about = "Weather forecast and soil nutrient lookup")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Daily forecast for a city, or for the current location when no city is given
    Forecast {
        #[arg(long)]
        city: Option<String>,
    },
    /// Estimated NPK values at a coordinate (defaults to the configured point)
    Soil {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Suggest a crop; the soil texture is looked up when not given
    Recommend {
        #[arg(long)]
        soil: Option<SoilTexture>,
        /// Average temperature in degrees
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,
        /// Rainfall in mm
        #[arg(long)]
        rainfall: f64,
    },
    /// Show the config file location and validation results
    Config,
}

fn main() -> Result<()> {
    fieldcast_core::init()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Config => show_config(),
        Command::Forecast { city } => {
            let config = load_config()?;
            if config.weather.api_key.trim().is_empty() {
                return Err(ConfigError::MissingSetting("weather.api_key".to_string()).into());
            }
            let services = AppServices::with_config(&config)?;
            forecast(&services, city, cli.json)
        }
        Command::Soil { lat, lon } => {
            let services = AppServices::with_config(&load_config()?)?;
            let coordinate = lat.zip(lon).map(|(lat, lon)| Coordinate::new(lat, lon));
            soil(&services, coordinate, cli.json)
        }
        Command::Recommend {
            soil,
            temperature,
            rainfall,
        } => {
            let texture = match soil {
                Some(texture) => texture,
                None => {
                    let services = AppServices::with_config(&load_config()?)?;
                    fetch_soil(&services, None)?
                        .estimate()
                        .map(|e| e.texture)
                        .context("No soil texture available")?
                }
            };
            let crop = recommend_crop(texture, temperature, rainfall);
            if cli.json {
                let body = serde_json::json!({ "soil": texture, "crop": crop });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Recommended crop for {} soil: {}", texture, crop);
            }
            Ok(())
        }
    }
}

fn load_config() -> Result<Config> {
    let (config, _) = Config::load_validated().context("Failed to load configuration")?;
    Ok(config)
}

fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load_from(&path)?;
    let validation = config.validate();

    println!("Config file: {}", path.display());
    if validation.errors.is_empty() && validation.warnings.is_empty() {
        println!("No problems found.");
    }
    for error in &validation.errors {
        println!("  error:   {}", error);
    }
    for warning in &validation.warnings {
        println!("  warning: {}", warning);
    }
    Ok(())
}

fn forecast(services: &AppServices, city: Option<String>, json: bool) -> Result<()> {
    let mut panel = WeatherPanel::new();
    let (generation, query) = match city.as_deref() {
        Some(city) => panel
            .submit_search(city)
            .context("City name must not be blank")?,
        None => panel.start_current_location(),
    };

    request_weather_fetch(
        &services.weather_sender(),
        &services.runtime(),
        services.pipelines(),
        query,
        generation,
    );
    while panel.is_loading() {
        let message = services
            .recv_weather()
            .context("Weather service stopped before replying")?;
        panel.apply(message);
    }

    match (json, panel.report()) {
        (true, Some(report)) => println!("{}", serde_json::to_string_pretty(report)?),
        _ => println!("{}", render_weather(&panel)),
    }
    Ok(())
}

fn fetch_soil(services: &AppServices, coordinate: Option<Coordinate>) -> Result<SoilPanel> {
    let mut panel = SoilPanel::new();
    let SoilAction::Fetch(generation) = panel.press() else {
        anyhow::bail!("Soil panel is busy");
    };

    request_soil_fetch(
        &services.soil_sender(),
        &services.runtime(),
        services.pipelines(),
        coordinate,
        generation,
    );
    while panel.is_loading() {
        let message = services
            .recv_soil()
            .context("Soil service stopped before replying")?;
        panel.apply(message);
    }

    if let Some(message) = panel.error_message() {
        tracing::warn!("Soil lookup failed: {}", message);
    }
    Ok(panel)
}

fn soil(services: &AppServices, coordinate: Option<Coordinate>, json: bool) -> Result<()> {
    let panel = fetch_soil(services, coordinate)?;
    match (json, panel.estimate()) {
        (true, Some(estimate)) => println!("{}", serde_json::to_string_pretty(estimate)?),
        _ => println!("{}", render_soil(&panel)),
    }
    Ok(())
}
