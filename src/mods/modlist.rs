//! Loading of the tracked mod list
//!
//! Expected shape: `{ "repo_mods": [ { "name": "...", "url": "..." }, ... ] }`.
//! A document without `repo_mods` yields an empty list. Entries are read
//! one by one: a field that is missing, null or not a string becomes `""`,
//! and a non-object entry becomes an empty reference. The aggregator then
//! skips those as invalid references.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::mods::error::ModListError;
use crate::mods::location::Location;
use crate::mods::types::ModReference;

#[derive(Debug, Deserialize)]
struct ModListDocument {
    #[serde(default)]
    repo_mods: Option<Vec<Value>>,
}

fn reference_from_entry(entry: &Value) -> ModReference {
    let field = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let reference = ModReference::new(field("name"), field("url"));
    if reference.identifier_url.is_empty() {
        debug!("Mod list entry without a usable url: {}", entry);
    }
    reference
}

/// Fetch the mod list. Failure here is a run-level fault.
pub async fn load_mod_list(
    client: &reqwest::Client,
    location: &Location,
) -> Result<Vec<ModReference>, ModListError> {
    let document: ModListDocument = location.read_json(client).await?;
    let references: Vec<ModReference> = document
        .repo_mods
        .unwrap_or_default()
        .iter()
        .map(reference_from_entry)
        .collect();
    info!("Loaded {} mods from {}", references.len(), location);
    Ok(references)
}
