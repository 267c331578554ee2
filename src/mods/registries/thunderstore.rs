//! Thunderstore package API implementation

use serde::Deserialize;
use tracing::debug;

use crate::config::{DEFAULT_REGISTRY_API_URL, DEFAULT_REGISTRY_SITE_URL};
use crate::mods::date::format_display;
use crate::mods::error::RegistryError;
use crate::mods::registry::Registry;
use crate::mods::types::{ModDetails, ModRecord, ResolvedCoordinates};

/// Response from `GET {api}/package/{owner}/{package}/`
#[derive(Debug, Deserialize)]
struct PackageResponse {
    latest: LatestRelease,
    #[serde(default)]
    date_updated: Option<String>,
}

/// The `latest` object of a package response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LatestRelease {
    version_number: Option<String>,
    full_name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    download_url: Option<String>,
}

/// Registry implementation for the Thunderstore experimental package API
pub struct ThunderstoreRegistry {
    client: reqwest::Client,
    api_url: String,
    site_url: String,
}

impl ThunderstoreRegistry {
    /// Creates a registry using `api_url` for metadata and `site_url` for page links
    pub fn new(client: reqwest::Client, api_url: &str, site_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a registry pointing at thunderstore.io
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::new(client, DEFAULT_REGISTRY_API_URL, DEFAULT_REGISTRY_SITE_URL)
    }

    fn package_url(&self, coordinates: &ResolvedCoordinates) -> String {
        format!(
            "{}/package/{}/{}/",
            self.api_url, coordinates.owner, coordinates.package
        )
    }

    fn build_record(&self, coordinates: &ResolvedCoordinates, package: PackageResponse) -> ModRecord {
        let latest = package.latest;
        let full_name = latest.full_name.unwrap_or_default();
        let name = if full_name.is_empty() {
            coordinates.display_name()
        } else {
            full_name.clone()
        };
        let date_updated = package
            .date_updated
            .as_deref()
            .map(format_display)
            .unwrap_or_default();

        ModRecord {
            name,
            version: latest.version_number,
            date_updated,
            raw_date: package.date_updated,
            url: coordinates.page_url(&self.site_url),
            details: ModDetails {
                description: latest.description.unwrap_or_default(),
                download_url: latest.download_url,
                icon_url: latest.icon.unwrap_or_default(),
                channel: coordinates.channel.clone(),
                owner: coordinates.owner.clone(),
                package: coordinates.package.clone(),
                full_name,
            },
        }
    }
}

#[async_trait::async_trait]
impl Registry for ThunderstoreRegistry {
    fn name(&self) -> &'static str {
        "Thunderstore"
    }

    async fn fetch_latest(
        &self,
        coordinates: &ResolvedCoordinates,
    ) -> Result<ModRecord, RegistryError> {
        let url = self.package_url(coordinates);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(coordinates.display_name()));
        }

        if !status.is_success() {
            debug!("Thunderstore returned status {}: {}", status, url);
            return Err(RegistryError::Unavailable(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        let package: PackageResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Failed to parse Thunderstore response for {}: {}", url, e);
            RegistryError::MalformedResponse(e.to_string())
        })?;

        Ok(self.build_record(coordinates, package))
    }
}
