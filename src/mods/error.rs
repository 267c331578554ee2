use thiserror::Error;

/// A mod page URL that does not have the `/c/{channel}/p/{owner}/{package}` shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid mod URL: {0}")]
    InvalidReference(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl RegistryError {
    /// True for HTTP-level failures (transport, timeout, non-2xx status)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::NotFound(_))
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Unavailable(format!("request timed out: {}", err))
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ModListError {
    #[error("Failed to load mod list: {0}")]
    Unavailable(#[from] LocationError),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Prior snapshot unavailable: {0}")]
    Unavailable(#[from] LocationError),
}
