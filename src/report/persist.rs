//! JSON persistence of a result set
//!
//! The internal sort key (`raw_date`) is never written. The compact form
//! doubles as a prior snapshot for the next run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::mods::types::ModRecord;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compact persisted form; also what [`read_results`] returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub name: String,
    pub version: Option<String>,
    pub date_updated: String,
    pub url: String,
}

impl From<&ModRecord> for PersistedRecord {
    fn from(record: &ModRecord) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            date_updated: record.date_updated.clone(),
            url: record.url.clone(),
        }
    }
}

#[derive(Serialize)]
struct FullRecord<'a> {
    name: &'a str,
    description: &'a str,
    url: &'a str,
    download_url: Option<&'a str>,
    icon_url: &'a str,
    channel: &'a str,
    owner: &'a str,
    package: &'a str,
    version: Option<&'a str>,
    date_updated: &'a str,
    full_name: &'a str,
}

impl<'a> From<&'a ModRecord> for FullRecord<'a> {
    fn from(r: &'a ModRecord) -> Self {
        Self {
            name: &r.name,
            description: &r.details.description,
            url: &r.url,
            download_url: r.details.download_url.as_deref(),
            icon_url: &r.details.icon_url,
            channel: &r.details.channel,
            owner: &r.details.owner,
            package: &r.details.package,
            version: r.version.as_deref(),
            date_updated: &r.date_updated,
            full_name: &r.details.full_name,
        }
    }
}

/// Encode records as a pretty-printed JSON array
pub fn to_json(records: &[ModRecord], full: bool) -> Result<String, PersistError> {
    let json = if full {
        let rows: Vec<FullRecord> = records.iter().map(FullRecord::from).collect();
        serde_json::to_string_pretty(&rows)?
    } else {
        let rows: Vec<PersistedRecord> = records.iter().map(PersistedRecord::from).collect();
        serde_json::to_string_pretty(&rows)?
    };
    Ok(json)
}

pub fn write_results(path: &Path, records: &[ModRecord], full: bool) -> Result<(), PersistError> {
    let json = to_json(records, full)?;
    std::fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Results saved to {}", path.display());
    Ok(())
}

/// Read back a file written by [`write_results`] in either form
pub fn read_results(path: &Path) -> Result<Vec<PersistedRecord>, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
