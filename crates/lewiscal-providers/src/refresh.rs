//! Refresh pipeline: fetch, parse, merge.

use lewiscal_core::EventRecord;
use serde::Serialize;
use tracing::{debug, info};

use crate::curated::CuratedEvents;
use crate::error::ProviderResult;
use crate::source::IcsSource;

/// The result of a refresh, shaped for the web frontend.
///
/// Imported events come first, in calendar order, followed by curated ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub updated: bool,
    pub total_events: usize,
    pub imported_events: usize,
    pub scholarship_events: usize,
    pub events: Vec<EventRecord>,
}

impl RefreshReport {
    /// Merges imported events with the curated list.
    pub fn merge(imported: Vec<EventRecord>, curated: &CuratedEvents) -> Self {
        let imported_events = imported.len();
        let mut events = imported;
        events.extend_from_slice(curated.events());

        Self {
            updated: true,
            total_events: events.len(),
            imported_events,
            scholarship_events: curated.len(),
            events,
        }
    }
}

/// Loads the calendar from `source`, parses it and appends `curated`.
pub async fn refresh(
    source: &dyn IcsSource,
    curated: &CuratedEvents,
) -> ProviderResult<RefreshReport> {
    let ics = source.fetch_ics().await?;
    debug!(source = source.name(), bytes = ics.len(), "Loaded calendar text");

    let imported = lewiscal_core::parse(&ics);
    info!(
        source = source.name(),
        imported = imported.len(),
        curated = curated.len(),
        "Calendar refreshed"
    );

    Ok(RefreshReport::merge(imported, curated))
}
