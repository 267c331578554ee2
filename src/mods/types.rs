//! Value types shared across the pipeline

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::Deserialize;

use crate::mods::date::parse_timestamp;

/// A tracked mod as listed in the input mod list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModReference {
    pub name: String,
    #[serde(rename = "url")]
    pub identifier_url: String,
}

impl ModReference {
    pub fn new(name: impl Into<String>, identifier_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier_url: identifier_url.into(),
        }
    }
}

/// Registry coordinates parsed out of a mod page URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedCoordinates {
    pub channel: String,
    pub owner: String,
    pub package: String,
}

impl ResolvedCoordinates {
    /// `owner/package`, used when the registry offers no better name
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.owner, self.package)
    }

    /// Canonical package page URL on the registry site
    pub fn page_url(&self, site_url: &str) -> String {
        format!(
            "{}/c/{}/p/{}/{}/",
            site_url.trim_end_matches('/'),
            self.channel,
            self.owner,
            self.package
        )
    }
}

/// Secondary release metadata, only shown and persisted in full output mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModDetails {
    pub description: String,
    pub download_url: Option<String>,
    pub icon_url: String,
    pub channel: String,
    pub owner: String,
    pub package: String,
    pub full_name: String,
}

/// Latest-release information for one successfully fetched mod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRecord {
    pub name: String,
    pub version: Option<String>,
    /// Display form of the last update timestamp
    pub date_updated: String,
    /// Timestamp exactly as the registry sent it; used for ordering only
    pub raw_date: Option<String>,
    pub url: String,
    pub details: ModDetails,
}

impl ModRecord {
    /// Ordering key: the raw timestamp when it parses, otherwise empty
    pub fn sort_key(&self) -> &str {
        match self.raw_date.as_deref() {
            Some(raw) if parse_timestamp(raw).is_some() => raw,
            _ => "",
        }
    }
}

/// Orders records newest first. The sort is stable, so records with equal
/// keys keep their relative order.
pub fn sort_by_date_desc(records: &mut [ModRecord]) {
    records.sort_by(|a, b| b.sort_key().cmp(a.sort_key()));
}

/// Last-seen version per mod name, loaded once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorSnapshot {
    versions: HashMap<String, String>,
}

impl PriorSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for PriorSnapshot {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            versions: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

/// Names of mods whose version changed since the prior snapshot, in result order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSet {
    names: IndexSet<String>,
}

impl UpdateSet {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl FromIterator<String> for UpdateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
