//! Calendar sources and the refresh pipeline.
//!
//! This crate sits between the pure ICS parser in `lewiscal_core` and the
//! outer surfaces (HTTP server, CLI):
//!
//! - [`IcsSource`] - where ICS text comes from ([`HttpSource`], [`FileSource`])
//! - [`CuratedEvents`] - literal events merged into every refresh
//! - [`refresh`] - fetch, parse, merge into a [`RefreshReport`]
//! - [`UrlStore`] - the saved calendar link
//! - [`ProviderError`] - error types for all of the above
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │  HttpSource  │   │  FileSource  │
//! └──────┬───────┘   └──────┬───────┘
//!        │    IcsSource     │
//!        └────────┬─────────┘
//!                 ▼ raw ICS text
//!        ┌─────────────────┐
//!        │ lewiscal_core:: │
//!        │     parse()     │
//!        └────────┬────────┘
//!                 ▼ Vec<EventRecord>      ┌───────────────┐
//!        ┌─────────────────┐ ◀────────────│ CuratedEvents │
//!        │  RefreshReport  │              └───────────────┘
//!        └─────────────────┘
//! ```

pub mod config;
pub mod curated;
pub mod error;
pub mod http;
pub mod refresh;
pub mod source;
pub mod storage;

// Re-export main types at crate root
pub use config::FetchConfig;
pub use curated::CuratedEvents;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use http::IcsClient;
pub use refresh::{RefreshReport, refresh};
pub use source::{BoxFuture, CalendarSource, FileSource, HttpSource, IcsSource};
pub use storage::UrlStore;
