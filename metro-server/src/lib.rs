//! Metro navigation server.
//!
//! Answers "how do I get there?" at two scales: station-to-station routes
//! across the metro network, and waypoint-to-waypoint guidance inside a
//! station. Records are read from a document store on every request.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod instructions;
pub mod logging;
pub mod nearest;
pub mod router;
pub mod store;
pub mod web;
