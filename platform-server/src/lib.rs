//! "Which Platform?" departure board server.
//!
//! A web application that answers: "which platform is my next train from,
//! and can I still catch it?" It queries the TfNSW Trip Planner for
//! journeys between two stations and normalizes the multi-leg responses
//! into a flat, time-ordered departure list.

pub mod board;
pub mod cache;
pub mod refresh;
pub mod settings;
pub mod tfnsw;
pub mod web;
