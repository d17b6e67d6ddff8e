//! Path search over station and waypoint graphs.
//!
//! Both searches return the path as an ordered id sequence including both
//! endpoints. An empty sequence means "no route": unknown endpoints and
//! disconnected graphs are normal outcomes, not errors.

mod astar;
mod bfs;

pub use astar::find_waypoint_path;
pub use bfs::shortest_station_path;

use std::collections::HashMap;

/// Walk parent pointers back from `goal` and return the path start-first.
fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
