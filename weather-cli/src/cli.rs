use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;
use weather_core::{Config, OpenWeatherFetcher, SubmitOptions, WeatherQuery, submit};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast from OpenWeather")]
pub struct Cli {
    /// Log requests and upstream responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default city.
    Configure,

    /// Show current weather and the weekly forecast for a city.
    Show {
        /// City name; prompted for when omitted.
        city: Option<String>,

        /// Only fetch current conditions.
        #[arg(long)]
        no_forecast: bool,

        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, no_forecast, json } => show(city, no_forecast, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(city: Option<String>, no_forecast: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;

    let city = match city {
        Some(city) => city,
        None => Text::new("Enter city name")
            .with_default(config.default_city())
            .prompt()
            .context("Failed to read city name")?,
    };

    let query = WeatherQuery::new(&city)?;
    let fetcher = OpenWeatherFetcher::with_base_url(api_key, config.base_url());
    let options = SubmitOptions { include_forecast: !no_forecast };

    info!(city = query.city(), base_url = fetcher.base_url(), "fetching weather data");
    let report = submit(&fetcher, &query, &chrono::Local, options).await;
    info!(has_errors = report.has_errors(), blocks = report.blocks.len(), "submission finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    Ok(())
}
