//! Web layer for the metro navigator.
//!
//! JSON endpoints for station routing, nearest-station lookup, journey
//! planning and indoor waypoint navigation.

mod dto;
mod routes;
mod state;

#[cfg(test)]
mod routes_tests;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
