//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use lewiscal_providers::{FetchConfig, UrlStore};

use crate::error::{ServerError, ServerResult};

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: IpAddr,

    /// TCP port.
    pub port: u16,

    /// Calendar served when no link is given to `/api/refresh`.
    pub calendar_path: PathBuf,

    /// File holding the saved calendar link.
    pub storage_path: PathBuf,

    /// Remote calendar fetch settings.
    pub fetch: FetchConfig,

    /// Whether refreshes append the curated scholarship events.
    pub include_curated: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: Self::DEFAULT_PORT,
            calendar_path: PathBuf::from(Self::DEFAULT_CALENDAR_FILE),
            storage_path: PathBuf::from(UrlStore::DEFAULT_FILE),
            fetch: FetchConfig::default(),
            include_curated: true,
        }
    }
}

impl ServerConfig {
    /// Default TCP port.
    pub const DEFAULT_PORT: u16 = 3001;

    /// Default local calendar file.
    pub const DEFAULT_CALENDAR_FILE: &'static str = "calendar.ics";

    /// Default configuration with `PORT` applied from the environment.
    pub fn from_env() -> ServerResult<Self> {
        Self::default().with_port_var(std::env::var(PORT_ENV).ok().as_deref())
    }

    /// Applies a `PORT`-style value; `None` or blank keeps the current port.
    pub fn with_port_var(mut self, value: Option<&str>) -> ServerResult<Self> {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.port = raw
                .parse()
                .map_err(|_| ServerError::config(format!("invalid {PORT_ENV} value: {raw:?}")))?;
        }
        Ok(self)
    }

    /// Builder: set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder: set bind address.
    pub fn with_bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Builder: set local calendar path.
    pub fn with_calendar_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.calendar_path = path.into();
        self
    }

    /// Builder: set storage path.
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Builder: set fetch settings.
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Builder: include or skip curated events.
    pub fn with_include_curated(mut self, include: bool) -> Self {
        self.include_curated = include;
        self
    }

    /// The address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.calendar_path, PathBuf::from("calendar.ics"));
        assert_eq!(config.storage_path, PathBuf::from("storage.json"));
        assert!(config.include_curated);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn custom_config() {
        let config = ServerConfig::default()
            .with_port(8080)
            .with_bind_addr(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_calendar_path("/srv/cal.ics")
            .with_storage_path("/srv/storage.json")
            .with_include_curated(false);

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.calendar_path, PathBuf::from("/srv/cal.ics"));
        assert!(!config.include_curated);
    }

    #[test]
    fn port_var_overrides_default() {
        let config = ServerConfig::default().with_port_var(Some("4000")).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn blank_port_var_keeps_default() {
        let config = ServerConfig::default().with_port_var(Some("  ")).unwrap();
        assert_eq!(config.port, 3001);
        let config = ServerConfig::default().with_port_var(None).unwrap();
        assert_eq!(config.port, 3001);
    }

    #[test]
    fn invalid_port_var_is_config_error() {
        let err = ServerConfig::default()
            .with_port_var(Some("eighty"))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config { .. }));
        assert!(err.to_string().contains("PORT"));
    }
}
