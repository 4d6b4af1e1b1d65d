//! Parse command.

use std::path::Path;

use lewiscal_core::EventRecord;
use tracing::debug;

use crate::error::ClientResult;

/// Reads and parses a local calendar file.
pub fn parse_file(path: &Path) -> ClientResult<Vec<EventRecord>> {
    let text = std::fs::read_to_string(path)?;
    let events = lewiscal_core::parse(&text);
    debug!(path = %path.display(), events = events.len(), "Parsed calendar file");
    Ok(events)
}

/// Prints the events of `path` as a JSON array.
pub fn run(path: &Path) -> ClientResult<()> {
    let events = parse_file(path)?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
