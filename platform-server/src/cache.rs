//! Caching layer for trip planner responses.
//!
//! Every browser polls `/api/departures` on a fixed 30-second interval, so
//! several clients watching the same route would otherwise multiply load on
//! the upstream API. Entries are keyed by route and the Sydney-local minute
//! (the minute feeds the upstream `itdTime` parameter, so a cached board is
//! never reused across a minute boundary), with a short TTL because
//! realtime estimates move constantly.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Australia::Sydney;
use moka::future::Cache as MokaCache;

use crate::tfnsw::{StopFinderResponse, TfnswClient, TfnswError, TripResponse};

/// Cache key for trip queries: (origin, destination, count, minute bucket).
/// The bucket is Sydney-local minutes from midnight divided by the bucket size.
type TripKey = (String, String, u32, u16);

/// Configuration for the trip cache.
#[derive(Debug, Clone)]
pub struct TripCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Time bucket size in minutes.
    pub bucket_mins: u16,
}

impl Default for TripCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 500,
            bucket_mins: 1,
        }
    }
}

/// Trip planner client with response caching.
pub struct CachedTfnswClient {
    client: TfnswClient,
    trips: MokaCache<TripKey, Arc<TripResponse>>,
    bucket_mins: u16,
}

impl CachedTfnswClient {
    /// Create a new cached client.
    pub fn new(client: TfnswClient, config: &TripCacheConfig) -> Self {
        let trips = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            trips,
            bucket_mins: config.bucket_mins.max(1),
        }
    }

    /// Compute the minute bucket for an instant, in Sydney local time.
    fn time_bucket(&self, now: DateTime<Utc>) -> u16 {
        let local = now.with_timezone(&Sydney);
        let mins = (local.hour() * 60 + local.minute()) as u16;
        mins / self.bucket_mins
    }

    /// Plan trips, using the cache when a fresh entry exists for this
    /// route and minute.
    pub async fn plan_trip(
        &self,
        origin: &str,
        destination: &str,
        count: u32,
        now: DateTime<Utc>,
    ) -> Result<Arc<TripResponse>, TfnswError> {
        let key = (
            origin.to_string(),
            destination.to_string(),
            count,
            self.time_bucket(now),
        );

        if let Some(cached) = self.trips.get(&key).await {
            return Ok(cached);
        }

        let response = self.client.plan_trip(origin, destination, count, now).await?;
        let entry = Arc::new(response);
        self.trips.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Stop search passes straight through: queries are already debounced
    /// and rarely repeat verbatim.
    pub async fn find_stops(&self, query: &str) -> Result<StopFinderResponse, TfnswError> {
        self.client.find_stops(query).await
    }

    /// Number of cached trip entries.
    pub fn entry_count(&self) -> u64 {
        self.trips.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.trips.invalidate_all();
    }
}
