use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use skyview_core::{Config, Renderer, RequestState, client_from_config, session};
use tracing::debug;

use crate::render::TerminalSink;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Current weather for a city, themed by condition")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the view model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities repeatedly, showing each result before the next prompt.
    Search {
        /// Print view models as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Search { json } => search(json).await,
        }
    }
}

fn configure() -> anyhow::Result<ExitCode> {
    let path = Config::config_file_path()?;
    // Read the file directly so an env override is never persisted.
    let mut config = Config::load_from(&path)?;

    let help = if config.api_key().is_some() {
        "Leave blank to keep the current key"
    } else {
        "Get one at https://home.openweathermap.org/api_keys"
    };
    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message(help)
        .prompt()
        .context("Failed to read API key")?;

    if !key.trim().is_empty() {
        config.set_api_key(key);
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());

    let (submitter, mut completions) = session(Arc::new(client));
    submitter.submit(Some(&city));
    drop(submitter);

    let mut renderer = Renderer::new(TerminalSink::new(json));
    renderer.run(&mut completions, Local::now).await;

    if completions.state() == RequestState::Failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn search(json: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;

    let (submitter, mut completions) = session(Arc::new(client));
    let mut renderer = Renderer::new(TerminalSink::new(json));

    // Start with something on screen, like opening the app does.
    submitter.submit(Some(config.default_city()));

    loop {
        // The prompt owns the terminal while it is open, so results are
        // written only between prompts.
        renderer.settle(&mut completions, Local::now).await;

        let input = tokio::task::spawn_blocking(|| {
            Text::new("City:")
                .with_help_message("Enter to search, Esc to quit")
                .prompt()
        })
        .await
        .context("Prompt task panicked")?;

        match input {
            Ok(line) => {
                if submitter.submit(Some(&line)).is_none() {
                    debug!("blank search ignored");
                }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        }
    }

    Ok(ExitCode::SUCCESS)
}
