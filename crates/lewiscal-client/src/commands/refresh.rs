//! Refresh command.

use std::path::PathBuf;

use lewiscal_providers::{CalendarSource, IcsClient, RefreshReport, refresh};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Chooses the calendar: `--url`, then the saved link, then the local file.
pub async fn resolve_source(
    config: &ClientConfig,
    url: Option<String>,
    calendar: Option<PathBuf>,
) -> ClientResult<CalendarSource> {
    let url = match url {
        Some(url) => Some(url),
        None => config.url_store().load().await?,
    };
    let calendar = calendar.unwrap_or_else(|| config.server.calendar_path.clone());
    debug!(url = ?url, calendar = %calendar.display(), "Resolving calendar source");

    Ok(CalendarSource::resolve(url.as_deref(), calendar))
}

/// Runs the refresh pipeline and returns the report.
pub async fn build_report(
    config: &ClientConfig,
    url: Option<String>,
    calendar: Option<PathBuf>,
) -> ClientResult<RefreshReport> {
    let client = IcsClient::new(config.fetch_config())?;
    let source = resolve_source(config, url, calendar)
        .await?
        .into_source(&client)?;
    let report = refresh(source.as_ref(), &config.curated_events()).await?;
    Ok(report)
}

/// Prints the refresh report as JSON.
pub async fn run(
    config: &ClientConfig,
    url: Option<String>,
    calendar: Option<PathBuf>,
) -> ClientResult<()> {
    let report = build_report(config, url, calendar).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
