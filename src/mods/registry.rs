//! Registry trait for fetching a mod's latest release

#[cfg(test)]
use mockall::automock;

use crate::mods::error::RegistryError;
use crate::mods::types::{ModRecord, ResolvedCoordinates};

/// Trait for fetching the latest release of a package from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the registry's display name, used in logs
    fn name(&self) -> &'static str;

    /// Fetches and normalizes the latest release metadata for one package
    ///
    /// # Arguments
    /// * `coordinates` - Channel, owner and package parsed from the mod page URL
    ///
    /// # Returns
    /// * `Ok(ModRecord)` - Normalized record whose `url` is derived from `coordinates`
    /// * `Err(RegistryError)` - If the registry is unreachable or answers unexpectedly
    async fn fetch_latest(
        &self,
        coordinates: &ResolvedCoordinates,
    ) -> Result<ModRecord, RegistryError>;
}
