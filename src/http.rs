//! Shared HTTP client construction

use std::time::Duration;

use crate::config::USER_AGENT;

/// Build the client used for every outbound call. `timeout` bounds each
/// request from connect to the end of the body.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
