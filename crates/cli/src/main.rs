use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{logging_config, UserApp, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME};
use common::init_structured_logging;
use console::style;
use domain::config::AppConfig;
use infrastructure::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "user-app")]
#[command(about = "Concatenate names and save them through the user service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (TOML or JSON); must exist when given
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON regardless of the configuration
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Concatenate two values without a separator
    Concat {
        first: String,
        second: String,
    },
    /// Save each value through the service and report the outcome
    Save {
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref()).await?;
    ConfigValidator::new().validate(&config)?;
    init_structured_logging(logging_config(&config.logging, cli.json_logs)?)?;
    debug!(profile = config.profile.name(), "Configuration loaded");

    let app = UserApp::new(&config);

    match cli.command {
        Some(Commands::Concat { first, second }) => {
            println!("{}", app.concat(&first, &second)?);
        }
        Some(Commands::Save { values }) => {
            let outcomes = app.save_all(&values);
            for outcome in &outcomes {
                if outcome.is_failure() {
                    println!("{}", style(outcome).red());
                } else {
                    println!("{}", outcome);
                }
            }

            let failures = outcomes.iter().filter(|o| o.is_failure()).count();
            if failures > 0 {
                anyhow::bail!("{} of {} value(s) failed to save", failures, outcomes.len());
            }
        }
        Some(Commands::Config) => {
            print!("{}", ConfigLoader::render(&config)?);
        }
        None => {
            println!("{}", app.concat(DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME)?);
        }
    }

    Ok(())
}

async fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.load_from(path).await,
        None => loader.load().await,
    }
}
