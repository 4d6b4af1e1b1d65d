//! HTTP backend for the LewisCal frontend.
//!
//! Exposes the refresh pipeline from `lewiscal_providers` over a small JSON
//! API and stores the user's calendar link.
//!
//! # Example
//!
//! ```rust,no_run
//! use lewiscal_server::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     serve(config).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod routes;
mod state;

use tokio::net::TcpListener;
use tracing::{error, info};

pub use config::{PORT_ENV, ServerConfig};
pub use error::{ApiError, ErrorBody, ServerError, ServerResult};
pub use routes::{RefreshQuery, SaveResponse, router};
pub use state::AppState;

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let addr = config.socket_addr();
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(addr = %addr, "LewisCal backend listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl-C; shutdown only by termination");
            std::future::pending::<()>().await;
        }
    }
}
