//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/lewiscal/config.toml` by default:
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 3001
//! calendar_path = "calendar.ics"
//! storage_path = "storage.json"
//!
//! [fetch]
//! timeout_secs = 30
//!
//! [events]
//! include_curated = true
//!
//! [logging]
//! filter = "lewiscal_core=trace,info"
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lewiscal_providers::{CuratedEvents, FetchConfig, UrlStore};
use lewiscal_server::ServerConfig;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the lewiscal client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Server settings, also used for file locations by `refresh`.
    pub server: ServerSettings,

    /// Remote calendar fetch settings.
    pub fetch: FetchSettings,

    /// Event list settings.
    pub events: EventSettings,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; replaces the level chosen from `--debug`.
    pub filter: Option<String>,
}

/// HTTP server and file location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind.
    pub bind_addr: IpAddr,

    /// TCP port.
    pub port: u16,

    /// Local calendar file.
    pub calendar_path: PathBuf,

    /// File holding the saved calendar link.
    pub storage_path: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: ServerConfig::DEFAULT_PORT,
            calendar_path: PathBuf::from(ServerConfig::DEFAULT_CALENDAR_FILE),
            storage_path: PathBuf::from(UrlStore::DEFAULT_FILE),
        }
    }
}

/// Remote calendar fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: FetchConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Event list settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// Append the Celebration of Scholarship events to every refresh.
    pub include_curated: bool,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            include_curated: true,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lewiscal")
    }

    /// Converts the `[fetch]` section to provider configuration.
    pub fn fetch_config(&self) -> FetchConfig {
        let config = FetchConfig::new().with_timeout(Duration::from_secs(self.fetch.timeout_secs));
        match self.fetch.user_agent {
            Some(ref agent) => config.with_user_agent(agent),
            None => config,
        }
    }

    /// The curated events selected by `[events]`.
    pub fn curated_events(&self) -> CuratedEvents {
        if self.events.include_curated {
            CuratedEvents::scholarship()
        } else {
            CuratedEvents::empty()
        }
    }

    /// The store for the saved calendar link.
    pub fn url_store(&self) -> UrlStore {
        UrlStore::new(self.server.storage_path.clone())
    }

    /// Builds the server configuration from the file settings.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_bind_addr(self.server.bind_addr)
            .with_port(self.server.port)
            .with_calendar_path(self.server.calendar_path.clone())
            .with_storage_path(self.server.storage_path.clone())
            .with_fetch(self.fetch_config())
            .with_include_curated(self.events.include_curated)
    }
}
