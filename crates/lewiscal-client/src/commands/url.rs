//! Saved calendar link command.

use lewiscal_providers::UrlStore;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Stores `url` as the calendar link.
pub async fn save(store: &UrlStore, url: &str) -> ClientResult<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ClientError::Usage("calendar URL must not be empty".to_string()));
    }

    store.save(url).await?;
    info!(path = %store.path().display(), "Calendar URL saved");
    println!("Calendar URL saved to {}", store.path().display());
    Ok(())
}
