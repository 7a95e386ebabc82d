//! TfNSW Trip Planner HTTP client.
//!
//! Async methods for the `/trip` and `/stop_finder` endpoints. Handles
//! authentication, request throttling, Sydney-local date/time parameters,
//! and error triage. Exactly one upstream call is made per incoming
//! request; a failed or timed-out call fails that request outright.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Australia::Sydney;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use super::error::TfnswError;
use super::types::{StopFinderResponse, TripResponse};

/// Default base URL for the TfNSW Trip Planner API.
const DEFAULT_BASE_URL: &str = "https://api.transport.nsw.gov.au/v1/tp";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// API schema version pin.
const API_VERSION: &str = "10.2.1.42";

/// Configuration for the trip planner client.
#[derive(Debug, Clone)]
pub struct TfnswConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TfnswConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Trip planner API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TfnswClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TfnswClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TfnswConfig) -> Result<Self, TfnswError> {
        let mut headers = HeaderMap::new();

        // TfNSW authenticates with "Authorization: apikey <key>"
        let auth = HeaderValue::from_str(&format!("apikey {}", config.api_key)).map_err(|_| {
            TfnswError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            }
        })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Plan trips from `origin` to `destination` departing now.
    ///
    /// `now` is the request's captured instant; the API wants it as local
    /// Sydney date/time (`YYYYMMDD`/`HHMM`) even when the host runs in
    /// UTC. Light rail, bus, coach, ferry, and school bus are excluded
    /// upstream; walking legs and the rail/other distinction are handled
    /// by the normalizer.
    pub async fn plan_trip(
        &self,
        origin: &str,
        destination: &str,
        count: u32,
        now: DateTime<Utc>,
    ) -> Result<TripResponse, TfnswError> {
        let _permit = self.acquire().await?;

        let local = now.with_timezone(&Sydney);
        let itd_date = local.format("%Y%m%d").to_string();
        let itd_time = local.format("%H%M").to_string();
        let count = count.to_string();

        let url = format!("{}/trip", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("outputFormat", "rapidJSON"),
                ("coordOutputFormat", "EPSG:4326"),
                ("depArrMacro", "dep"),
                ("itdDate", itd_date.as_str()),
                ("itdTime", itd_time.as_str()),
                ("type_origin", "stop"),
                ("name_origin", origin),
                ("type_destination", "stop"),
                ("name_destination", destination),
                ("calcNumberOfTrips", count.as_str()),
                ("TfNSWTR", "true"),
                ("version", API_VERSION),
                ("excludedMeans", "checkbox"),
                ("exclMOT_4", "1"),  // light rail
                ("exclMOT_5", "1"),  // bus
                ("exclMOT_7", "1"),  // coach
                ("exclMOT_9", "1"),  // ferry
                ("exclMOT_11", "1"), // school bus
            ])
            .send()
            .await?;

        read_json(response).await
    }

    /// Search stop locations by free-text query.
    pub async fn find_stops(&self, query: &str) -> Result<StopFinderResponse, TfnswError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/stop_finder", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("outputFormat", "rapidJSON"),
                ("type_sf", "any"),
                ("name_sf", query),
                ("coordOutputFormat", "EPSG:4326"),
                ("TfNSWSF", "true"),
                ("version", API_VERSION),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, TfnswError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| TfnswError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })
    }
}

/// Triage the response status and deserialize the body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TfnswError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TfnswError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TfnswError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TfnswError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| TfnswError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
