//! smm market maker - entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use smm_bot::{resolve_config_path, AppConfig, Application, QuoteRequest};

/// smm market maker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SMM_CONFIG env var)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a configuration file.
    CheckConfig,

    /// Compute one ladder with the configured generator and print it as JSON.
    Quote {
        #[arg(long)]
        mid: f64,
        /// Raw skew; inventory correction is applied.
        #[arg(long, allow_hyphen_values = true)]
        skew: f64,
        #[arg(long)]
        spread: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        inventory: f64,
        #[arg(long, default_value = "0.01")]
        tick_size: String,
        #[arg(long, default_value = "0.001")]
        lot_size: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    smm_telemetry::init_logging()?;

    let config_path = resolve_config_path(args.config);
    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::from_file(&config_path)?;

    match args.command {
        Command::CheckConfig => {
            config.validate()?;
            info!(
                symbol = %config.symbol,
                generator = %config.quote_generator,
                total_orders = config.strategy.total_orders,
                "Configuration OK"
            );
        }
        Command::Quote {
            mid,
            skew,
            spread,
            inventory,
            tick_size,
            lot_size,
        } => {
            let app = Application::new(config)?;
            let ladder = app.quote_once(&QuoteRequest {
                mid,
                inventory_delta: inventory,
                skew,
                spread,
                tick_size,
                lot_size,
            })?;
            println!("{}", serde_json::to_string_pretty(&ladder)?);
        }
    }

    Ok(())
}
