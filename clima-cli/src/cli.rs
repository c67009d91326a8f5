use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clima_core::{Alert, Config, Screen, WeatherProvider, config::is_http_url};
use inquire::{
    CustomUserError, InquireError, Password, PasswordDisplayMode, Text, validator::Validation,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Consulta de Clima: current weather by coordinates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up current weather once.
    Show {
        /// Latitude in decimal degrees, -90..=90.
        #[arg(allow_hyphen_values = true)]
        latitude: String,

        /// Longitude in decimal degrees, -180..=180.
        #[arg(allow_hyphen_values = true)]
        longitude: String,

        /// Print the result as JSON instead of the three display lines.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for coordinates repeatedly until cancelled.
    Interactive,

    /// Set the OpenWeather API key and endpoint.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show {
                latitude,
                longitude,
                json,
            } => {
                let provider = Config::load()?.provider()?;
                let shown = show(&provider, latitude, longitude, json).await?;
                Ok(if shown { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Interactive => {
                let provider = Config::load()?.provider()?;
                interactive(&provider).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Returns `false` when the lookup failed; the alert has already been
/// printed, so the caller only needs to set the exit status.
async fn show(
    provider: &dyn WeatherProvider,
    latitude: String,
    longitude: String,
    json: bool,
) -> anyhow::Result<bool> {
    let mut screen = Screen::new();
    screen.set_latitude(latitude);
    screen.set_longitude(longitude);

    let outcome = screen.submit(provider).await.map(|r| r.cloned());

    match outcome {
        Some(Ok(result)) if json => {
            let out = serde_json::to_string_pretty(&result)
                .context("Failed to serialize weather result")?;
            println!("{out}");
        }
        Some(Ok(_)) => print_panel(&screen),
        Some(Err(_)) => {
            if let Some(alert) = screen.alert() {
                print_alert(alert);
            }
            return Ok(false);
        }
        None => {}
    }

    Ok(true)
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    let mut screen = Screen::new();
    println!("Consulta de Clima (Esc para sair)");

    loop {
        let latitude = match prompt_field("Latitude", screen.latitude()) {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read latitude"),
        };
        screen.set_latitude(latitude);

        let longitude = match prompt_field("Longitude", screen.longitude()) {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read longitude"),
        };
        screen.set_longitude(longitude);

        if screen.submit(provider).await.is_none() {
            continue;
        }

        if let Some(alert) = screen.alert() {
            print_alert(alert);
            screen.dismiss_alert();
        } else {
            print_panel(&screen);
        }
    }

    Ok(())
}

fn prompt_field(label: &str, current: &str) -> Result<String, InquireError> {
    Text::new(&format!("{label}:"))
        .with_initial_value(current)
        .with_help_message("graus decimais, ex.: -23.5505")
        .prompt()
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        cfg.api_key = api_key.trim().to_string();
    }

    let base_url = Text::new("API base URL:")
        .with_initial_value(&cfg.base_url)
        .with_validator(validate_base_url)
        .prompt()
        .context("Failed to read base URL")?;

    cfg.base_url = base_url.trim().to_string();

    let path = cfg.save()?;
    tracing::info!(path = %path.display(), "Saved configuration");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn validate_base_url(input: &str) -> Result<Validation, CustomUserError> {
    if is_http_url(input) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            "Enter an http:// or https:// URL, e.g. https://api.openweathermap.org".into(),
        ))
    }
}

fn print_panel(screen: &Screen) {
    for line in screen.render() {
        println!("{line}");
    }
}

fn print_alert(alert: &Alert) {
    eprintln!("{}: {}", alert.title, alert.message);
}
