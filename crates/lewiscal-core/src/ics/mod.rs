//! iCalendar (RFC 5545) ingestion.
//!
//! Only the subset needed to build [`EventRecord`]s is understood:
//! `VEVENT` blocks with `UID`, `SUMMARY`, `DESCRIPTION`, `LOCATION`,
//! `DTSTART`, `DTEND` and `RRULE`. Everything else is skipped.
//!
//! ```text
//! raw text ──unfold()──▶ logical lines ──parse_lines()──▶ Vec<EventRecord>
//!                                            │
//!                                            └─ normalize_timestamp()
//! ```
//!
//! [`EventRecord`]: crate::event::EventRecord

mod extract;
mod lines;
mod timestamp;

pub use extract::{parse, parse_lines};
pub use lines::{LogicalLines, Unfold, unfold};
pub use timestamp::{TimestampError, normalize_timestamp, parse_timestamp};
