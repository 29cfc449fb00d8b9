pub mod api;
pub mod cli;
pub mod core;

use crate::core::{Converter, config::AppConfig};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Currencies,
    Rate { from: String, to: String },
    Convert { amount: String, from: String, to: String },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::resolve(config_path)?;
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve => {
            info!("Currency converter starting...");
            cli::serve::serve(&config).await
        }
        AppCommand::Currencies => cli::quote::currencies(&Converter::new(config.rate_table()?)),
        AppCommand::Rate { from, to } => {
            cli::quote::rate(&Converter::new(config.rate_table()?), &from, &to)
        }
        AppCommand::Convert { amount, from, to } => cli::quote::convert(
            &Converter::new(config.rate_table()?),
            &amount,
            &from,
            &to,
        ),
    }
}
