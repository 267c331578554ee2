//! Bounded concurrent fetch of every listed mod
//!
//! Each reference is resolved up front; references with a bad URL are
//! skipped and never reach the registry. Every resolved reference gets its
//! own tokio task, and a semaphore caps how many of them talk to the
//! registry at once. Outcomes are joined back on the calling task in input
//! order, so the result buffer has a single writer and equal dates keep
//! their list order after the final sort.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::mods::error::{RegistryError, ResolveError};
use crate::mods::registry::Registry;
use crate::mods::resolver::ModUrlResolver;
use crate::mods::types::{ModRecord, ModReference, sort_by_date_desc};

/// Why a listed mod produced no record
#[derive(Debug)]
pub enum SkipReason {
    InvalidReference(ResolveError),
    Fetch(RegistryError),
    /// The fetch task panicked or was cancelled
    TaskFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidReference(e) => write!(f, "{}", e),
            SkipReason::Fetch(e) => write!(f, "{}", e),
            SkipReason::TaskFailed(e) => write!(f, "fetch task failed: {}", e),
        }
    }
}

#[derive(Debug)]
pub struct SkippedMod {
    pub name: String,
    pub url: String,
    pub reason: SkipReason,
}

/// Outcome of one aggregation run
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Successfully fetched records, newest first
    pub records: Vec<ModRecord>,
    /// One entry per reference that produced no record: resolution failures
    /// first, then fetch failures, each in list order
    pub skipped: Vec<SkippedMod>,
}

impl Aggregation {
    pub fn attempted(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Fetch the latest release of every reference with at most
/// `concurrency_limit` registry calls in flight.
///
/// A limit of 0 is treated as 1. Failures are logged and collected in
/// [`Aggregation::skipped`]; they never affect other references.
pub async fn aggregate(
    registry: Arc<dyn Registry>,
    resolver: &ModUrlResolver,
    references: &[ModReference],
    concurrency_limit: usize,
) -> Aggregation {
    let limit = concurrency_limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut skipped = Vec::new();
    let mut pending = Vec::with_capacity(references.len());

    for reference in references {
        let coordinates = match resolver.resolve(&reference.identifier_url) {
            Ok(coordinates) => coordinates,
            Err(e) => {
                warn!(
                    "Skipping invalid URL {} for {}: {}",
                    reference.identifier_url, reference.name, e
                );
                skipped.push(SkippedMod {
                    name: reference.name.clone(),
                    url: reference.identifier_url.clone(),
                    reason: SkipReason::InvalidReference(e),
                });
                continue;
            }
        };

        let registry = Arc::clone(&registry);
        let semaphore = Arc::clone(&semaphore);
        let task = tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return Err(RegistryError::Unavailable(
                    "fetch pool shut down".to_string(),
                ));
            };
            debug!(
                "Fetching {} from {}",
                coordinates.display_name(),
                registry.name()
            );
            registry.fetch_latest(&coordinates).await
        });
        pending.push((reference, task));
    }

    debug!(
        "Dispatched {} fetches with concurrency limit {}",
        pending.len(),
        limit
    );

    let outcomes = join_all(
        pending
            .into_iter()
            .map(|(reference, task)| async move { (reference, task.await) }),
    )
    .await;

    let mut records = Vec::with_capacity(outcomes.len());
    for (reference, outcome) in outcomes {
        let reason = match outcome {
            Ok(Ok(record)) => {
                records.push(record);
                continue;
            }
            Ok(Err(e)) => {
                error!("Error fetching {}: {}", reference.name, e);
                SkipReason::Fetch(e)
            }
            Err(e) => {
                error!("Fetch task for {} failed: {}", reference.name, e);
                SkipReason::TaskFailed(e.to_string())
            }
        };
        skipped.push(SkippedMod {
            name: reference.name.clone(),
            url: reference.identifier_url.clone(),
            reason,
        });
    }

    sort_by_date_desc(&mut records);

    info!(
        "Fetched {} of {} mods ({} skipped)",
        records.len(),
        references.len(),
        skipped.len()
    );

    Aggregation { records, skipped }
}
