//! Mod page URL resolution
//!
//! Turns `https://thunderstore.io/c/{channel}/p/{owner}/{package}/` into
//! [`ResolvedCoordinates`]. An empty channel segment falls back to
//! [`DEFAULT_CHANNEL`].

use regex::Regex;

use crate::config::DEFAULT_CHANNEL;
use crate::mods::error::ResolveError;
use crate::mods::types::ResolvedCoordinates;

pub struct ModUrlResolver {
    /// `http(s)://[www.]thunderstore.io/c/{channel}/p/{owner}/{package}`
    page_url_re: Regex,
}

impl ModUrlResolver {
    pub fn new() -> Self {
        Self {
            page_url_re: Regex::new(
                r"^(?i:https?://(?:www\.)?thunderstore\.io)/c/(?P<channel>[^/]*)/p/(?P<owner>[^/?#]+)/(?P<package>[^/?#]+)",
            )
            .unwrap(),
        }
    }

    /// Parse a mod page URL into registry coordinates
    pub fn resolve(&self, url: &str) -> Result<ResolvedCoordinates, ResolveError> {
        let url = url.trim();
        let caps = self
            .page_url_re
            .captures(url)
            .ok_or_else(|| ResolveError::InvalidReference(url.to_string()))?;

        let owner = caps["owner"].trim();
        let package = caps["package"].trim();
        if owner.is_empty() || package.is_empty() {
            return Err(ResolveError::InvalidReference(url.to_string()));
        }

        let channel = match caps["channel"].trim() {
            "" => DEFAULT_CHANNEL,
            channel => channel,
        };

        Ok(ResolvedCoordinates {
            channel: channel.to_string(),
            owner: owner.to_string(),
            package: package.to_string(),
        })
    }
}

impl Default for ModUrlResolver {
    fn default() -> Self {
        Self::new()
    }
}
