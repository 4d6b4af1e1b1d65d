//! Server command.

use lewiscal_server::{PORT_ENV, ServerConfig};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Resolves the server configuration.
///
/// The port comes from `--port`, then `PORT`, then the config file.
pub fn server_config(
    config: &ClientConfig,
    port: Option<u16>,
    port_var: Option<&str>,
) -> ClientResult<ServerConfig> {
    let server = config
        .server_config()
        .with_port_var(port_var)
        .map_err(|e| ClientError::Config(e.to_string()))?;

    Ok(match port {
        Some(port) => server.with_port(port),
        None => server,
    })
}

/// Runs the HTTP backend in the foreground until Ctrl-C.
pub async fn run(config: &ClientConfig, port: Option<u16>) -> ClientResult<()> {
    let port_var = std::env::var(PORT_ENV).ok();
    let server = server_config(config, port, port_var.as_deref())?;
    lewiscal_server::serve(server).await?;
    Ok(())
}
