//! Log setup for each subcommand.

use lewiscal_core::{TracingConfig, TracingOutputFormat};
use tracing::Level;

use crate::cli::{Cli, Command};
use crate::config::ClientConfig;

/// Picks the tracing configuration for a run.
///
/// `serve` logs at info so startup and failed refreshes are visible; with
/// `--log-format json` it uses the daemon preset. A `[logging] filter` from
/// the config file overrides the level.
pub fn tracing_config(cli: &Cli, config: &ClientConfig) -> TracingConfig {
    let debug = cli.debug || config.debug;
    let serving = matches!(cli.command, Command::Serve { .. });

    let mut tracing = match cli.log_format {
        Some(TracingOutputFormat::Json) if serving => TracingConfig::daemon(),
        Some(format) => TracingConfig::for_cli(debug).with_format(format),
        None => TracingConfig::for_cli(debug),
    };

    if debug {
        tracing = tracing.with_level(Level::DEBUG);
    } else if serving {
        tracing = tracing.with_level(Level::INFO);
    }

    match config.logging.filter {
        Some(ref filter) => tracing.with_env_filter(filter),
        None => tracing,
    }
}
