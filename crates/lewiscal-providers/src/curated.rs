//! Curated literal events.
//!
//! Events the university publishes itself (the Celebration of Scholarship
//! program) are not in any feed. They are kept here and appended to parsed
//! calendars by the refresh pipeline; the parser never sees them.

use chrono::{DateTime, TimeZone, Utc};
use lewiscal_core::{EventFields, EventRecord, EventSource, make_event_record};

/// A fixed list of events merged after imported ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuratedEvents {
    events: Vec<EventRecord>,
}

impl CuratedEvents {
    /// Creates a curated list from records.
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }

    /// An empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The Celebration of Scholarship program.
    pub fn scholarship() -> Self {
        Self::new(vec![
            scholarship_event(
                "sch-001",
                "Celebration of Scholarship Opening Ceremony",
                april_15(13),
                april_15(14),
                "Lewis University",
                "Opening event for the Celebration of Scholarship.",
            ),
            scholarship_event(
                "sch-002",
                "Capstone Team Poster Session",
                april_15(15),
                april_15(17),
                "St. Charles Borromeo",
                "Students present their capstone projects.",
            ),
        ])
    }

    /// Returns the records.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn april_15(hour: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 4, 15, hour, 0, 0).single()
}

fn scholarship_event(
    id: &str,
    title: &str,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    location: &str,
    description: &str,
) -> EventRecord {
    make_event_record(EventFields {
        start,
        end,
        ..EventFields::new()
            .with_id(id)
            .with_title(title)
            .with_location(location)
            .with_description(description)
            .with_source(EventSource::Scholarship)
    })
}
