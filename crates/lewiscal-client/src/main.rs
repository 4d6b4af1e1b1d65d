//! lewiscal CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use lewiscal_core::init_tracing;

use lewiscal_client::cli::{Cli, Command, ConfigAction};
use lewiscal_client::commands;
use lewiscal_client::config::ClientConfig;
use lewiscal_client::error::{ClientError, ClientResult};
use lewiscal_client::logging::tracing_config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(tracing_config(&cli, &config)) {
        eprintln!("warning: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

async fn run(cli: Cli, config: ClientConfig) -> ClientResult<()> {
    let config_path = cli.config.unwrap_or_else(ClientConfig::default_path);

    match cli.command {
        Command::Parse { file } => commands::parse::run(&file),
        Command::Refresh { url, calendar } => commands::refresh::run(&config, url, calendar).await,
        Command::SaveUrl { url } => commands::url::save(&config.url_store(), &url).await,
        Command::Serve { port } => commands::server::run(&config, port).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
