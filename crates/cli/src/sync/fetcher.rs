// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory fetcher abstraction.
//!
//! Provides a trait-based fetch layer that enables:
//! - Real HTTP requests against the TimeZoneDB directory API
//! - Mock fetchers for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tz_core::{Directory, TimezoneRecord};

/// Default base URL of the directory API.
pub const DEFAULT_API_BASE: &str = "https://api.timezonedb.com/v2.1";

/// Fields requested from the directory API.
const LIST_FIELDS: &str = "countryCode,countryName,zoneName,gmtOffset,dst";

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No API key is configured.
    #[error("no API key configured")]
    MissingCredential,

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The API reported a failure in its response body.
    #[error("directory API error: {0}")]
    Api(String),

    /// The response body was not the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Source of the full time zone directory.
///
/// This trait abstracts over the remote API, allowing the coordinator to
/// be tested with mock implementations.
pub trait Fetcher: Send + Sync {
    /// Fetch the complete directory in one call.
    fn fetch(&self) -> Pin<Box<dyn Future<Output = FetchResult<Directory>> + Send + '_>>;
}

/// Fetch the directory, logging any failure and returning an empty one.
pub async fn fetch_or_empty<F: Fetcher + ?Sized>(fetcher: &F) -> Directory {
    match fetcher.fetch().await {
        Ok(directory) => directory,
        Err(e) => {
            tracing::warn!("directory fetch failed: {}", e);
            Directory::empty()
        }
    }
}

/// Wire shape of one zone entry. Every field is optional so a single
/// malformed entry is dropped instead of failing the whole response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawZone {
    country_code: Option<String>,
    country_name: Option<String>,
    zone_name: Option<String>,
    gmt_offset: Option<Value>,
    dst: Option<Value>,
}

/// Parse an integer that may arrive as a JSON number or a numeric string.
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        other => lenient_int(other).map(|n| n != 0),
    }
}

impl RawZone {
    fn into_record(self) -> Option<TimezoneRecord> {
        let offset = self.gmt_offset.as_ref().and_then(lenient_int)?;
        let offset = i32::try_from(offset).ok()?;
        let dst = match self.dst.as_ref() {
            Some(v) => lenient_bool(v)?,
            None => false,
        };
        TimezoneRecord::new(
            self.country_code?,
            self.country_name?,
            self.zone_name?,
            offset,
            dst,
        )
        .ok()
    }
}

/// Parse a `list-time-zone` response body into a directory.
///
/// The body must carry `status: "OK"` and a `zones` array. Null or
/// malformed entries are dropped; the rest are sorted by zone name.
pub fn parse_list_response(body: &str) -> FetchResult<Directory> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let status = value.get("status").and_then(Value::as_str).unwrap_or("");
    if status != "OK" {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("request was not accepted");
        return Err(FetchError::Api(message.to_string()));
    }

    let zones = value
        .get("zones")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::Decode("missing zones array".to_string()))?;

    let total = zones.len();
    let records: Vec<TimezoneRecord> = zones
        .iter()
        .filter(|z| !z.is_null())
        .filter_map(|z| serde_json::from_value::<RawZone>(z.clone()).ok())
        .filter_map(RawZone::into_record)
        .collect();

    if records.len() < total {
        tracing::debug!(
            "dropped {} malformed zone entries of {}",
            total - records.len(),
            total
        );
    }

    Ok(Directory::from_records(records))
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL of the directory API.
    pub api_base: String,
    /// API key, if configured.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Fetcher backed by the TimeZoneDB HTTP API.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Create a fetcher with its own HTTP client.
    pub fn new(config: FetcherConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("tzclock/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(HttpFetcher { client, config })
    }

    /// URL of the `list-time-zone` endpoint, without the key.
    pub fn list_url(&self) -> String {
        format!("{}/list-time-zone", self.config.api_base.trim_end_matches('/'))
    }

    async fn fetch_list(&self) -> FetchResult<Directory> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential)?;

        let response = self
            .client
            .get(self.list_url())
            .query(&[("key", key), ("format", "json"), ("fields", LIST_FIELDS)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.without_url().to_string()))?;

        parse_list_response(&body)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = FetchResult<Directory>> + Send + '_>> {
        Box::pin(self.fetch_list())
    }
}
