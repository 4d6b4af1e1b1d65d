//! Where ICS text comes from.
//!
//! An [`IcsSource`] yields raw calendar text; parsing happens afterwards in
//! `lewiscal_core`. Two implementations exist:
//!
//! - [`HttpSource`] downloads a calendar link (Google, Outlook, Canvas feeds)
//! - [`FileSource`] reads a local `calendar.ics`
//!
//! [`CalendarSource::resolve`] picks between them the way the refresh endpoint
//! does: a URL starting with `http` wins, anything else falls back to the local
//! file.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::http::IcsClient;

/// A boxed future for async trait methods.
///
/// Keeps [`IcsSource`] object-safe so callers can hold a `Box<dyn IcsSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of raw ICS text.
pub trait IcsSource: Send + Sync {
    /// Short name for logs and error messages.
    fn name(&self) -> &str;

    /// Loads the calendar text.
    fn fetch_ics(&self) -> BoxFuture<'_, ProviderResult<String>>;
}

/// A calendar downloaded over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: IcsClient,
    url: Url,
}

impl HttpSource {
    /// Creates a source for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorCode::InvalidUrl`] if the URL does not parse.
    ///
    /// [`ProviderErrorCode::InvalidUrl`]: crate::error::ProviderErrorCode::InvalidUrl
    pub fn new(client: IcsClient, url: &str) -> ProviderResult<Self> {
        let url = Url::parse(url).map_err(|e| {
            ProviderError::invalid_url(format!("Invalid calendar URL {:?}: {}", url, e))
                .with_origin("http")
                .with_source(e)
        })?;
        Ok(Self { client, url })
    }

    /// Returns the calendar URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl IcsSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_ics(&self) -> BoxFuture<'_, ProviderResult<String>> {
        Box::pin(async move {
            debug!(url = %self.url, "Fetching remote calendar");
            self.client.get(&self.url).await
        })
    }
}

/// A calendar read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IcsSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch_ics(&self) -> BoxFuture<'_, ProviderResult<String>> {
        Box::pin(async move {
            debug!(path = %self.path.display(), "Reading local calendar");
            match tokio::fs::read_to_string(&self.path).await {
                Ok(text) => Ok(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(ProviderError::not_found(&self.path).with_origin("file"))
                }
                Err(e) => Err(ProviderError::io(&self.path, e).with_origin("file")),
            }
        })
    }
}

/// The calendar a refresh should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSource {
    /// A calendar link.
    Remote(String),
    /// The local fallback file.
    LocalFile(PathBuf),
}

impl CalendarSource {
    /// Chooses between a user-provided link and the local file.
    ///
    /// Only values starting with `http` (so `http://` and `https://`) count
    /// as links; anything else, including an empty string, selects the file.
    pub fn resolve(url: Option<&str>, local_path: impl Into<PathBuf>) -> Self {
        match url.map(str::trim) {
            Some(url) if url.starts_with("http") => Self::Remote(url.to_string()),
            _ => Self::LocalFile(local_path.into()),
        }
    }

    /// Builds the concrete source.
    pub fn into_source(self, client: &IcsClient) -> ProviderResult<Box<dyn IcsSource>> {
        match self {
            Self::Remote(url) => Ok(Box::new(HttpSource::new(client.clone(), &url)?)),
            Self::LocalFile(path) => Ok(Box::new(FileSource::new(path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::error::ProviderErrorCode;
    use crate::http::test_server;

    fn client() -> IcsClient {
        IcsClient::new(FetchConfig::new()).unwrap()
    }

    mod resolution {
        use super::*;

        #[test]
        fn http_url_selects_remote() {
            assert_eq!(
                CalendarSource::resolve(Some("https://example.com/cal.ics"), "calendar.ics"),
                CalendarSource::Remote("https://example.com/cal.ics".to_string())
            );
        }

        #[test]
        fn missing_or_non_http_falls_back_to_file() {
            let local = CalendarSource::LocalFile(PathBuf::from("calendar.ics"));
            assert_eq!(CalendarSource::resolve(None, "calendar.ics"), local);
            assert_eq!(CalendarSource::resolve(Some(""), "calendar.ics"), local);
            assert_eq!(
                CalendarSource::resolve(Some("webcal://example.com/cal.ics"), "calendar.ics"),
                local
            );
        }

        #[test]
        fn malformed_link_is_invalid_url() {
            let err = CalendarSource::resolve(Some("http//broken"), "calendar.ics")
                .into_source(&client())
                .err()
                .unwrap();
            assert_eq!(err.code(), ProviderErrorCode::InvalidUrl);
        }

        #[test]
        fn builds_named_sources() {
            let remote = CalendarSource::Remote("https://example.com/a.ics".to_string())
                .into_source(&client())
                .unwrap();
            assert_eq!(remote.name(), "http");

            let file = CalendarSource::LocalFile(PathBuf::from("a.ics"))
                .into_source(&client())
                .unwrap();
            assert_eq!(file.name(), "file");
        }
    }

    mod file_source {
        use super::*;

        #[tokio::test]
        async fn reads_existing_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("calendar.ics");
            std::fs::write(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

            let text = FileSource::new(&path).fetch_ics().await.unwrap();
            assert!(text.contains("VCALENDAR"));
        }

        #[tokio::test]
        async fn missing_file_is_not_found_with_path() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("calendar.ics");

            let err = FileSource::new(&path).fetch_ics().await.unwrap_err();
            assert_eq!(err.code(), ProviderErrorCode::NotFound);
            assert_eq!(err.path(), Some(path.as_path()));
        }
    }

    mod http_source {
        use super::*;

        #[tokio::test]
        async fn fetches_remote_calendar() {
            let url = test_server::serve_once("200 OK", "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").await;
            let source = HttpSource::new(client(), &url).unwrap();
            assert_eq!(source.url().as_str(), url);

            let text = source.fetch_ics().await.unwrap();
            assert!(text.starts_with("BEGIN:VCALENDAR"));
        }
    }
}
