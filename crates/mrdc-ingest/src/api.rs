//! Store details REST API.
//!
//! The API exposes `/number_stores` and one `/store_details/{index}` page per
//! store. Pages are fetched one at a time through a [`Throttle`]; a page that
//! fails is logged and skipped.

use std::ops::RangeInclusive;
use std::thread;
use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::http::build_client;
use crate::json::frame_from_records;

pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 3;

const API_KEY_HEADER: &str = "x-api-key";

pub trait StoreApi {
    /// Number of stores the API reports.
    fn fetch_count(&self) -> Result<usize>;

    /// Details of the store at `index`.
    fn fetch_page(&self, index: usize) -> Result<Map<String, Value>>;
}

/// Spaces calls at a fixed interval.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// A throttle allowing `requests` calls per second. Zero means no limit.
    pub fn per_second(requests: u32) -> Self {
        if requests == 0 {
            return Self::new(Duration::ZERO);
        }
        Self::new(Duration::from_secs(1) / requests)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until at least one interval has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::per_second(DEFAULT_REQUESTS_PER_SECOND)
    }
}

/// Fetches every store in `range` and stacks the pages into one frame.
pub fn fetch_store_range(
    api: &dyn StoreApi,
    range: RangeInclusive<usize>,
    throttle: &mut Throttle,
) -> Result<DataFrame> {
    let (first, last) = (*range.start(), *range.end());
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for index in range {
        throttle.wait();
        match api.fetch_page(index) {
            Ok(record) => records.push(record),
            Err(error) => {
                skipped += 1;
                warn!(index, %error, "store page skipped");
            }
        }
    }
    info!(first, last, fetched = records.len(), skipped, "store pages fetched");
    if records.is_empty() {
        return Err(IngestError::Empty {
            location: format!("store pages {first}..={last}"),
        });
    }
    frame_from_records(&records)
}

pub struct StoreApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StoreApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn count_url(&self) -> String {
        format!("{}/number_stores", self.base_url)
    }

    pub fn page_url(&self, index: usize) -> String {
        format!("{}/store_details/{index}", self.base_url)
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        let http_error = |source| IngestError::Http {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .map_err(http_error)?;
        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response.json().map_err(http_error)
    }
}

impl std::fmt::Debug for StoreApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .finish()
    }
}

/// Reads the store count from a `/number_stores` response body.
pub fn parse_store_count(body: &Value) -> Option<usize> {
    body.get("number_stores")
        .and_then(|n| n.as_u64().or_else(|| n.as_str()?.trim().parse().ok()))
        .and_then(|n| usize::try_from(n).ok())
}

impl StoreApi for StoreApiClient {
    fn fetch_count(&self) -> Result<usize> {
        let url = self.count_url();
        let body = self.get_json(&url)?;
        parse_store_count(&body).ok_or_else(|| IngestError::UnexpectedResponse {
            url,
            reason: "missing number_stores".to_string(),
        })
    }

    fn fetch_page(&self, index: usize) -> Result<Map<String, Value>> {
        let url = self.page_url(index);
        match self.get_json(&url)? {
            Value::Object(record) => Ok(record),
            other => Err(IngestError::UnexpectedResponse {
                url,
                reason: format!("expected an object, found {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_count_forms() {
        assert_eq!(
            parse_store_count(&json!({"statusCode": 200, "number_stores": 451})),
            Some(451)
        );
        assert_eq!(parse_store_count(&json!({"number_stores": "12"})), Some(12));
        assert_eq!(parse_store_count(&json!({"message": "Forbidden"})), None);
    }

    #[test]
    fn test_urls() {
        let client = StoreApiClient::new("https://api.example.com/prod/", "secret").unwrap();
        assert_eq!(client.count_url(), "https://api.example.com/prod/number_stores");
        assert_eq!(
            client.page_url(7),
            "https://api.example.com/prod/store_details/7"
        );
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn test_throttle_interval() {
        assert_eq!(Throttle::per_second(4).interval(), Duration::from_millis(250));
        assert_eq!(Throttle::per_second(0).interval(), Duration::ZERO);
    }
}
