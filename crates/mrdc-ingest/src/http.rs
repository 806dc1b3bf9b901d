//! Shared blocking HTTP helpers.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{IngestError, Result};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| IngestError::Http {
            url: String::new(),
            source,
        })
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Downloads a URL into memory.
pub fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!(url, "downloading");
    let http_error = |source| IngestError::Http {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().map_err(http_error)?;
    if !response.status().is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    Ok(response.bytes().map_err(http_error)?.to_vec())
}
