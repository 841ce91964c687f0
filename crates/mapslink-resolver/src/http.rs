//! Shared `reqwest` client construction.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::LookupError;

const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds a client with the given total timeout and `User-Agent`.
///
/// The connect timeout is capped at the total timeout.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, LookupError> {
    Ok(base_builder(timeout_secs, user_agent).build()?)
}

pub(crate) fn base_builder(timeout_secs: u64, user_agent: &str) -> reqwest::ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(
            timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
        ))
        .user_agent(user_agent)
}

pub(crate) fn parse_endpoint(url: &str) -> Result<Url, LookupError> {
    Url::parse(url).map_err(|e| LookupError::InvalidEndpoint {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}
