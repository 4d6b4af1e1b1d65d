//! Event record types.
//!
//! This module provides the unified output type of the ICS parser:
//! - [`EventRecord`]: an application-agnostic calendar event
//! - [`EventSource`]: where a record came from
//! - [`EventFields`]: partial input to [`make_event_record`]
//!
//! Records serialize to the JSON shape consumed by the web frontend. Start and
//! end instants are written as ISO-8601 UTC with millisecond precision
//! (`2025-04-15T13:00:00.000Z`), or `null` when unknown.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Title given to events without a `SUMMARY`.
pub const DEFAULT_TITLE: &str = "Untitled Event";

/// Prefix of generated fallback identifiers.
pub const GENERATED_ID_PREFIX: &str = "event-";

const GENERATED_ID_LEN: usize = 11;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Provenance of an event record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Parsed from an ICS calendar.
    #[default]
    Imported,
    /// A curated literal entry (Celebration of Scholarship).
    Scholarship,
}

impl EventSource {
    /// Returns the wire name of this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::Scholarship => "scholarship",
        }
    }
}

/// A normalized calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stable identifier (`UID`, or a generated `event-…` token).
    pub id: String,
    /// Event title.
    pub title: String,
    /// Start instant, `None` if missing or unparseable.
    #[serde(with = "iso_millis")]
    pub start: Option<DateTime<Utc>>,
    /// End instant, `None` if missing or unparseable.
    #[serde(with = "iso_millis")]
    pub end: Option<DateTime<Utc>>,
    /// Free-form location, empty when absent.
    pub location: String,
    /// Free-form description, empty when absent.
    pub description: String,
    /// Provenance tag.
    pub source: EventSource,
    /// Raw recurrence rule, uninterpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
}

impl EventRecord {
    /// Start formatted as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub fn start_iso(&self) -> Option<String> {
        self.start.as_ref().map(format_iso_millis)
    }

    /// End formatted as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub fn end_iso(&self) -> Option<String> {
        self.end.as_ref().map(format_iso_millis)
    }

    /// Returns true if the id was generated rather than read from a `UID`.
    pub fn has_generated_id(&self) -> bool {
        self.id.starts_with(GENERATED_ID_PREFIX)
    }
}

/// Partial event data; every field is optional.
///
/// Passed to [`make_event_record`], which fills in the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub id: Option<String>,
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub source: Option<EventSource>,
    pub rrule: Option<String>,
}

impl EventFields {
    /// Creates an empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to set the start instant.
    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the end instant.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the source.
    pub fn with_source(mut self, source: EventSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder method to set the recurrence rule.
    pub fn with_rrule(mut self, rrule: impl Into<String>) -> Self {
        self.rrule = Some(rrule.into());
        self
    }
}

/// Builds an [`EventRecord`], applying defaults for absent fields.
///
/// - `id`: a generated `event-<base36>` token
/// - `title`: [`DEFAULT_TITLE`]
/// - `location`, `description`: empty
/// - `source`: [`EventSource::Imported`]
///
/// `start`, `end` and `rrule` stay `None`.
pub fn make_event_record(fields: EventFields) -> EventRecord {
    EventRecord {
        id: fields.id.unwrap_or_else(generate_id),
        title: fields.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        start: fields.start,
        end: fields.end,
        location: fields.location.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        source: fields.source.unwrap_or_default(),
        rrule: fields.rrule,
    }
}

/// Generates a random fallback identifier.
///
/// Collisions are possible but unlikely (36^11 values).
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let token: String = (0..GENERATED_ID_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{GENERATED_ID_PREFIX}{token}")
}

/// Formats an instant the way JavaScript's `toISOString` does.
pub fn format_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_iso_millis(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
