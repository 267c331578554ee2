//! JSON documents addressed by an http(s) URL or a local path

use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::mods::error::LocationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(String),
    File(PathBuf),
}

impl Location {
    /// Anything starting with `http://` or `https://` is a URL, everything else a path
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Location::Url(source.to_string())
        } else {
            Location::File(PathBuf::from(source))
        }
    }

    /// Fetch or read the document and deserialize it as JSON
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        client: &reqwest::Client,
    ) -> Result<T, LocationError> {
        let body = match self {
            Location::Url(url) => {
                debug!("Fetching {}", url);
                let response = client
                    .get(url)
                    .header("Accept", "application/json")
                    .send()
                    .await
                    .map_err(|source| LocationError::Http {
                        url: url.clone(),
                        source,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LocationError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|source| LocationError::Http {
                    url: url.clone(),
                    source,
                })?
            }
            Location::File(path) => {
                debug!("Reading {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LocationError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
        };

        serde_json::from_str(&body).map_err(|source| LocationError::Json {
            location: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Url(url) => write!(f, "{}", url),
            Location::File(path) => write!(f, "{}", path.display()),
        }
    }
}
