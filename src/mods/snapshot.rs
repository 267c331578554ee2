//! Loading of the prior snapshot used as the diff baseline
//!
//! The snapshot is a JSON array of `{ "name": ..., "version": ..., ... }`
//! objects, normally the output file of a previous run. Loading is best
//! effort: an unreachable or corrupt snapshot degrades to an empty one.

use serde::Deserialize;
use tracing::{info, warn};

use crate::mods::error::SnapshotError;
use crate::mods::location::Location;
use crate::mods::types::PriorSnapshot;

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Load the snapshot, skipping entries without a name or version.
/// Later entries win when a name repeats.
pub async fn load_snapshot(
    client: &reqwest::Client,
    location: &Location,
) -> Result<PriorSnapshot, SnapshotError> {
    let entries: Vec<SnapshotEntry> = location.read_json(client).await?;
    let snapshot: PriorSnapshot = entries
        .into_iter()
        .filter_map(|entry| match (entry.name, entry.version) {
            (Some(name), Some(version)) if !name.is_empty() && !version.is_empty() => {
                Some((name, version))
            }
            _ => None,
        })
        .collect();

    info!("Loaded {} entries from snapshot {}", snapshot.len(), location);
    Ok(snapshot)
}

/// Load the snapshot, treating a missing source or any failure as an empty
/// snapshot so every current mod is reported as updated.
pub async fn load_snapshot_or_empty(
    client: &reqwest::Client,
    location: Option<&Location>,
) -> PriorSnapshot {
    let Some(location) = location else {
        info!("No prior snapshot configured; every mod will be reported as updated");
        return PriorSnapshot::empty();
    };

    load_snapshot(client, location)
        .await
        .inspect_err(|e| warn!("{}; treating snapshot as empty", e))
        .unwrap_or_default()
}
