//! Journey normalization pipeline.
//!
//! Turns the trip planner's multi-leg, multi-product journey graph into a
//! flat, display-ready departure list: classify legs, pick the boarding
//! leg, derive timing/delay/platform/interchange facts, drop journeys with
//! no rail leg, and sort what remains by departure time.

pub mod classify;
pub mod normalize;
pub mod stops;
pub mod timing;

pub use classify::{LegClass, classify};
pub use normalize::{Departure, build_board, normalize_journey};
pub use stops::InterchangeDetail;

/// Placeholder for textual fields the upstream response left blank.
pub const PLACEHOLDER: &str = "?";
