use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use regatta_cli::commands::{code, results, time};
use regatta_cli::{Cli, Commands, Config, TimeAction};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Time(action)) => match action {
            TimeAction::Parse { text } => time::parse(&mut stdout, text)?,
            TimeAction::Format { ms } => time::format(&mut stdout, *ms)?,
            TimeAction::Auto { raw } => time::auto(&mut stdout, raw)?,
        },
        Some(Commands::Code {
            abbreviation,
            gender,
            title,
            boat,
            weight,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let args = code::CodeArgs {
                abbreviation: abbreviation.clone(),
                gender: *gender,
                title: title.clone(),
                boat: boat.clone(),
                weight: *weight,
            };
            code::run(&mut stdout, &config.race_code, &args)?;
        }
        Some(Commands::Results {
            race,
            json,
            submission,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let format = if *json {
                results::OutputFormat::Json
            } else if *submission {
                results::OutputFormat::Submission
            } else {
                results::OutputFormat::Table
            };
            results::run(&mut stdout, &config, race, format)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
