//! Persistence of the user's calendar link.
//!
//! The link is kept in a small JSON document:
//!
//! ```json
//! {
//!   "calendarUrl": "https://example.com/calendar.ics"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCalendar {
    calendar_url: String,
}

/// Reads and writes the saved calendar URL.
#[derive(Debug, Clone)]
pub struct UrlStore {
    path: PathBuf,
}

impl UrlStore {
    /// Default file name, relative to the working directory.
    pub const DEFAULT_FILE: &'static str = "storage.json";

    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves `url`, replacing any previous value.
    pub async fn save(&self, url: &str) -> ProviderResult<()> {
        let stored = StoredCalendar {
            calendar_url: url.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| {
            ProviderError::internal(format!("Failed to encode calendar URL: {}", e)).with_source(e)
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProviderError::io(parent, e))?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| ProviderError::io(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved calendar URL");
        Ok(())
    }

    /// Loads the saved URL, or `None` if nothing was saved yet.
    pub async fn load(&self) -> ProviderResult<Option<String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProviderError::io(&self.path, e)),
        };

        let stored: StoredCalendar = serde_json::from_str(&content).map_err(|e| {
            ProviderError::invalid_response(format!(
                "Malformed storage file {}: {}",
                self.path.display(),
                e
            ))
            .with_source(e)
        })?;

        Ok(Some(stored.calendar_url))
    }
}

impl Default for UrlStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = UrlStore::new(dir.path().join("storage.json"));

        store.save("https://example.com/cal.ics").await.unwrap();
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("https://example.com/cal.ics")
        );
    }

    #[tokio::test]
    async fn writes_pretty_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = UrlStore::new(&path);

        store.save("https://example.com/cal.ics").await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n  \"calendarUrl\": \"https://example.com/cal.ics\"\n}"
        );
    }

    #[tokio::test]
    async fn missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = UrlStore::new(dir.path().join("storage.json"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{\"url\": 1}").unwrap();

        let err = UrlStore::new(&path).load().await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    }

    #[test]
    fn default_path() {
        assert_eq!(UrlStore::default().path(), Path::new("storage.json"));
    }
}
