//! Snapshot comparison
//!
//! Only version strings are compared. A release that reuses a version
//! string with a newer date counts as unchanged.

use crate::mods::types::{ModRecord, PriorSnapshot, UpdateSet};

/// Names of records whose version is absent from, or differs from, `prior`.
///
/// Records with an empty name or no/empty version are left out entirely.
pub fn diff(current: &[ModRecord], prior: &PriorSnapshot) -> UpdateSet {
    current
        .iter()
        .filter_map(|record| {
            let version = record.version.as_deref().filter(|v| !v.is_empty())?;
            if record.name.is_empty() {
                return None;
            }
            match prior.get(&record.name) {
                Some(seen) if seen == version => None,
                _ => Some(record.name.clone()),
            }
        })
        .collect()
}
