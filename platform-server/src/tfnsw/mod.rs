//! TfNSW Trip Planner API client.
//!
//! HTTP client for the Transport for NSW Trip Planner, which powers both
//! the departure board (`/trip`) and the station search (`/stop_finder`).
//!
//! Key characteristics of the API:
//! - Responses are "rapidJSON" with deeply nested, mostly-optional fields
//! - Timestamps are ISO 8601 instants; request date/time parameters are
//!   Sydney-local `YYYYMMDD`/`HHMM` strings
//! - Transport modes are numeric product classes (1 train, 2 metro,
//!   99/100 footpath, ...); unwanted modes are excluded per-request

mod client;
mod error;
pub mod types;

pub use client::{TfnswClient, TfnswConfig};
pub use error::TfnswError;
pub use types::{Journey, Leg, Location, StopFinderResponse, StopLocation, TripResponse};
