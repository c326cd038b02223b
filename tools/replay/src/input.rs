//! Recorded input files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use tessera_engine::ReferenceDataMessage;
use tessera_traits::MarketEvent;

/// Reads a JSON array of reference data records.
pub fn load_reference_data(path: &Path) -> Result<Vec<ReferenceDataMessage>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open reference data {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse reference data {}", path.display()))
}

/// Reads market events, one JSON object per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn load_events(path: &Path) -> Result<Vec<MarketEvent>> {
    let file =
        File::open(path).with_context(|| format!("failed to open events {}", path.display()))?;

    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid event", path.display(), index + 1))?;
        events.push(event);
    }
    Ok(events)
}
