//! Object storage extraction.
//!
//! Locations may be `s3://bucket/key` URIs (fetched anonymously from the
//! bucket's public HTTPS endpoint), plain `http(s)://` URLs, or local paths.
//! The format is chosen by extension: `.csv` or `.json`.

use std::path::Path;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use tracing::info;

use crate::csv_table::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::http::{build_client, fetch_bytes, is_remote};
use crate::json::read_json_bytes;

pub trait ObjectSource {
    fn read_object(&self, location: &str) -> Result<DataFrame>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFormat {
    Csv,
    Json,
}

impl ObjectFormat {
    /// Picks the format from the extension of the location's path.
    pub fn from_location(location: &str) -> Option<Self> {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let extension = Path::new(path).extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(ObjectFormat::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(ObjectFormat::Json)
        } else {
            None
        }
    }
}

/// Splits `s3://bucket/key` into bucket and key.
fn split_s3_uri(uri: &str) -> Result<(&str, &str)> {
    uri.strip_prefix("s3://")
        .and_then(|rest| rest.split_once('/'))
        .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
        .ok_or_else(|| IngestError::InvalidS3Uri {
            uri: uri.to_string(),
        })
}

/// Virtual-hosted HTTPS URL of an S3 object.
pub fn s3_uri_to_https(uri: &str, region: Option<&str>) -> Result<String> {
    let (bucket, key) = split_s3_uri(uri)?;
    Ok(match region {
        Some(region) => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
        None => format!("https://{bucket}.s3.amazonaws.com/{key}"),
    })
}

/// Converts an S3 HTTPS URL (virtual-hosted or path style) to an `s3://` URI.
///
/// Returns `None` for URLs that are not S3 object URLs.
pub fn https_to_s3_uri(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let (host, path) = rest.split_once('/')?;
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.is_empty() {
        return None;
    }
    let host_without_domain = host.strip_suffix(".amazonaws.com")?;

    // Path style: s3.amazonaws.com/bucket/key or s3.<region>.amazonaws.com/bucket/key
    if host_without_domain == "s3" || host_without_domain.starts_with("s3.") {
        let (bucket, key) = path.split_once('/')?;
        return (!bucket.is_empty() && !key.is_empty()).then(|| format!("s3://{bucket}/{key}"));
    }

    let (bucket, service) = host_without_domain.split_once('.')?;
    (service == "s3" || service.starts_with("s3.") || service.starts_with("s3-"))
        .then(|| format!("s3://{bucket}/{path}"))
}

pub struct ObjectStoreSource {
    client: Client,
    region: Option<String>,
}

impl ObjectStoreSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            region: None,
        })
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if location.starts_with("s3://") {
            let url = s3_uri_to_https(location, self.region.as_deref())?;
            fetch_bytes(&self.client, &url)
        } else if is_remote(location) {
            fetch_bytes(&self.client, location)
        } else {
            std::fs::read(location).map_err(|source| IngestError::FileRead {
                path: location.into(),
                source,
            })
        }
    }
}

impl ObjectSource for ObjectStoreSource {
    fn read_object(&self, location: &str) -> Result<DataFrame> {
        let format =
            ObjectFormat::from_location(location).ok_or_else(|| IngestError::UnsupportedFormat {
                location: location.to_string(),
            })?;
        info!(location, ?format, "reading object");
        let bytes = self.fetch(location)?;
        match format {
            ObjectFormat::Csv => read_csv_bytes(&bytes, location),
            ObjectFormat::Json => read_json_bytes(&bytes, location),
        }
    }
}
