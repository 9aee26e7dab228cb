pub mod overlay;
pub mod stats;
pub mod summary;
pub mod validate;

use std::path::Path;

use thermwatch_common::error::ThermwatchError;
use thermwatch_event_model::{parse_event, parse_events, Event};

fn read_payload(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        return Err(ThermwatchError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))
}

/// Read and decode a single event payload.
pub fn load_event(path: &Path) -> anyhow::Result<Event> {
    let content = read_payload(path)?;
    parse_event(&content)
        .map_err(|e| ThermwatchError::model(format!("invalid event payload: {e}")).into())
}

/// Read and decode an array of events.
pub fn load_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    let content = read_payload(path)?;
    parse_events(&content)
        .map_err(|e| ThermwatchError::model(format!("invalid event list: {e}")).into())
}
