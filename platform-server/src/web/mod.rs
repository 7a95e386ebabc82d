//! Web layer for the departure board.
//!
//! Exposes the departures and stop-search endpoints consumed by the
//! polling browser client, plus static asset serving for that client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
