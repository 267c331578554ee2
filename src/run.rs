//! One end-to-end run: mod list, fetch, diff, report
//!
//! Only a failure to obtain the mod list (or to write a requested output
//! file) fails the run. Everything per mod, the snapshot and the
//! notification degrade with a log entry.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::http::build_client;
use crate::mods::aggregator::{Aggregation, aggregate};
use crate::mods::differ::diff;
use crate::mods::location::Location;
use crate::mods::modlist::load_mod_list;
use crate::mods::registries::ThunderstoreRegistry;
use crate::mods::registry::Registry;
use crate::mods::resolver::ModUrlResolver;
use crate::mods::snapshot::load_snapshot_or_empty;
use crate::mods::types::{ModRecord, UpdateSet};
use crate::report::{TelegramNotifier, compose_message, write_results};

/// Per-invocation options, usually taken from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mods_url: String,
    pub snapshot: Option<String>,
    pub output: Option<PathBuf>,
    pub full_output: bool,
    pub send_notification: bool,
    pub concurrency: usize,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl RunOptions {
    /// Options seeded from the config file
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            mods_url: config.mods_url.clone(),
            snapshot: config.snapshot.clone(),
            concurrency: config.concurrency,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    /// Entries in the mod list, including ones that could not be resolved
    pub total: usize,
    pub aggregation: Aggregation,
    pub updates: UpdateSet,
}

impl RunSummary {
    pub fn records(&self) -> &[ModRecord] {
        &self.aggregation.records
    }
}

pub struct Pipeline {
    config: AppConfig,
    client: reqwest::Client,
    registry: Arc<dyn Registry>,
    resolver: ModUrlResolver,
}

impl Pipeline {
    /// Pipeline against the registry named in `config`
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = build_client(Duration::from_secs(config.request_timeout_secs))
            .context("Failed to create HTTP client")?;
        let registry = Arc::new(ThunderstoreRegistry::new(
            client.clone(),
            &config.registry.api_url,
            &config.registry.site_url,
        ));
        Ok(Self::with_registry(config, client, registry))
    }

    pub fn with_registry(
        config: AppConfig,
        client: reqwest::Client,
        registry: Arc<dyn Registry>,
    ) -> Self {
        Self {
            config,
            client,
            registry,
            resolver: ModUrlResolver::new(),
        }
    }

    /// Full run: [`Pipeline::collect`] then [`Pipeline::report`]
    pub async fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        let summary = self.collect(options).await?;
        self.report(&summary, options).await?;
        Ok(summary)
    }

    /// Load the mod list, fetch every mod and diff against the prior snapshot
    pub async fn collect(&self, options: &RunOptions) -> Result<RunSummary> {
        let mods_location = Location::parse(&options.mods_url);
        let references = load_mod_list(&self.client, &mods_location)
            .await
            .with_context(|| format!("Error fetching mod list from {}", mods_location))?;
        let total = references.len();

        let aggregation = aggregate(
            Arc::clone(&self.registry),
            &self.resolver,
            &references,
            options.concurrency,
        )
        .await;

        let snapshot_location = options.snapshot.as_deref().map(Location::parse);
        let prior = load_snapshot_or_empty(&self.client, snapshot_location.as_ref()).await;
        let updates = diff(&aggregation.records, &prior);
        info!(
            "{} of {} fetched mods changed since the prior snapshot",
            updates.len(),
            aggregation.records.len()
        );

        Ok(RunSummary {
            total,
            aggregation,
            updates,
        })
    }

    /// Write the requested output file, then send the notification if asked.
    ///
    /// Only the write can fail; on failure no notification is sent.
    pub async fn report(&self, summary: &RunSummary, options: &RunOptions) -> Result<()> {
        if let Some(path) = &options.output {
            write_results(path, summary.records(), options.full_output)
                .with_context(|| format!("Error saving results to {}", path.display()))?;
        }

        if options.send_notification {
            self.notify(summary.records(), &summary.updates, summary.total, options)
                .await;
        }

        Ok(())
    }

    async fn notify(
        &self,
        records: &[ModRecord],
        updates: &UpdateSet,
        total: usize,
        options: &RunOptions,
    ) {
        let notifier = match TelegramNotifier::new(
            self.client.clone(),
            &self.config.notify.api_url,
            options.telegram_token.clone(),
            options.telegram_chat_id.clone(),
        ) {
            Ok(notifier) => notifier,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        let message = compose_message(records, updates, total, self.config.notify.style);
        let _ = notifier
            .send(&message)
            .await
            .inspect_err(|e| error!("{}", e));
    }
}
