//! Core types: event records, ICS parsing, tracing setup
//!
//! The parser is pure: it takes ICS text and returns [`EventRecord`]s without
//! touching the network or the filesystem.
//!
//! ```
//! let events = lewiscal_core::parse(
//!     "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Standup\r\nDTSTART:20250415T130000Z\r\nEND:VEVENT\r\n",
//! );
//! assert_eq!(events[0].title, "Standup");
//! assert_eq!(events[0].start_iso().as_deref(), Some("2025-04-15T13:00:00.000Z"));
//! ```

pub mod event;
pub mod ics;
pub mod tracing;

pub use event::{
    DEFAULT_TITLE, EventFields, EventRecord, EventSource, format_iso_millis, generate_id,
    make_event_record,
};
pub use ics::{TimestampError, normalize_timestamp, parse, parse_lines, parse_timestamp, unfold};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
