//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use modwatch::mods::date::format_display;
use modwatch::mods::error::RegistryError;
use modwatch::mods::registry::Registry;
use modwatch::mods::types::{ModDetails, ModRecord, ResolvedCoordinates};

enum Outcome {
    Release { version: String, date: String },
    Timeout,
    Malformed,
}

/// Registry answering from a fixed script keyed by package name
pub struct ScriptedRegistry {
    outcomes: HashMap<String, Outcome>,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
        }
    }

    pub fn with_release(mut self, package: &str, version: &str, date: &str) -> Self {
        self.outcomes.insert(
            package.to_string(),
            Outcome::Release {
                version: version.to_string(),
                date: date.to_string(),
            },
        );
        self
    }

    pub fn with_timeout(mut self, package: &str) -> Self {
        self.outcomes.insert(package.to_string(), Outcome::Timeout);
        self
    }

    pub fn with_malformed(mut self, package: &str) -> Self {
        self.outcomes.insert(package.to_string(), Outcome::Malformed);
        self
    }
}

#[async_trait]
impl Registry for ScriptedRegistry {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    async fn fetch_latest(
        &self,
        coordinates: &ResolvedCoordinates,
    ) -> Result<ModRecord, RegistryError> {
        match self.outcomes.get(&coordinates.package) {
            Some(Outcome::Release { version, date }) => Ok(ModRecord {
                name: coordinates.package.clone(),
                version: Some(version.clone()),
                date_updated: format_display(date),
                raw_date: Some(date.clone()),
                url: coordinates.page_url("https://thunderstore.io"),
                details: ModDetails {
                    channel: coordinates.channel.clone(),
                    owner: coordinates.owner.clone(),
                    package: coordinates.package.clone(),
                    ..ModDetails::default()
                },
            }),
            Some(Outcome::Timeout) => Err(RegistryError::Unavailable(
                "request timed out".to_string(),
            )),
            Some(Outcome::Malformed) => Err(RegistryError::MalformedResponse(
                "missing field `latest`".to_string(),
            )),
            None => Err(RegistryError::NotFound(coordinates.display_name())),
        }
    }
}

/// Mod page URL for `Owner/{package}` on the default channel
pub fn mod_url(package: &str) -> String {
    format!("https://thunderstore.io/c/repo/p/Owner/{}/", package)
}

/// Body of a mod list document
pub fn mod_list_body(mods: &[(&str, &str)]) -> String {
    let entries: Vec<_> = mods
        .iter()
        .map(|(name, url)| serde_json::json!({ "name": name, "url": url }))
        .collect();
    serde_json::json!({ "repo_mods": entries }).to_string()
}
