//! Adjacency structures built from flat station and waypoint records.
//!
//! Builders are permissive: references to ids that are not in the input
//! are dropped silently, and an empty input yields an empty graph.

mod adjacency;
mod network;
mod waypoints;

pub use adjacency::AdjacencyMap;
pub use network::Network;
pub use waypoints::{WaypointGraph, WaypointKey};
