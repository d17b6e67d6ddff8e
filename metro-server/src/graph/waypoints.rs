//! Indoor waypoint graph.

use std::collections::HashMap;

use tracing::debug;

use super::AdjacencyMap;
use crate::domain::{IndoorPoint, Waypoint};

/// Which id a waypoint graph is keyed by.
///
/// Producers disagree: some write neighbour lists in terms of document ids,
/// others in terms of a separate `node_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointKey {
    /// Key by store document id. Every waypoint is routable.
    Document,
    /// Key by `node_id`. Waypoints without one are left out.
    Node,
}

impl WaypointKey {
    fn of<'a>(&self, waypoint: &'a Waypoint) -> Option<&'a str> {
        match self {
            WaypointKey::Document => Some(waypoint.id.as_str()),
            WaypointKey::Node => waypoint.node_id.as_deref(),
        }
    }
}

/// Waypoints plus their directed adjacency.
///
/// Edges are kept exactly as written; a one-way corridor stays one-way.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    nodes: HashMap<String, Waypoint>,
    adjacency: AdjacencyMap,
}

impl WaypointGraph {
    /// Build a graph from waypoint records.
    ///
    /// If two records share a key, the later one wins.
    pub fn build(waypoints: impl IntoIterator<Item = Waypoint>, key: WaypointKey) -> Self {
        let mut nodes = HashMap::new();
        let mut skipped = 0usize;
        for waypoint in waypoints {
            match key.of(&waypoint) {
                Some(id) => {
                    nodes.insert(id.to_string(), waypoint);
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, ?key, "waypoints without a key left out of graph");
        }

        let mut adjacency = AdjacencyMap::new();
        for id in nodes.keys() {
            adjacency.insert_node(id.as_str());
        }
        for (id, waypoint) in &nodes {
            for neighbour in &waypoint.neighbors {
                adjacency.add_edge(id, neighbour);
            }
        }

        Self { nodes, adjacency }
    }

    pub fn get(&self, id: &str) -> Option<&Waypoint> {
        self.nodes.get(id)
    }

    pub fn position(&self, id: &str) -> Option<IndoorPoint> {
        self.nodes.get(id).map(|w| w.location)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Outgoing neighbours of `id`, restricted to waypoints in the graph.
    pub fn neighbours(&self, id: &str) -> &[String] {
        self.adjacency.neighbours(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Straight-line distance between two waypoints.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        Some(a.distance_to(&b))
    }

    /// Total length of `path`, or `None` if any step is not an edge.
    pub fn path_cost(&self, path: &[String]) -> Option<f64> {
        match path {
            [] => return None,
            [only] => return self.contains(only).then_some(0.0),
            _ => {}
        }
        let mut total = 0.0;
        for step in path.windows(2) {
            if !self.neighbours(&step[0]).contains(&step[1]) {
                return None;
            }
            total += self.distance(&step[0], &step[1])?;
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(id: &str, x: f64, y: f64, neighbours: &[&str]) -> Waypoint {
        Waypoint::new(id, IndoorPoint::new(x, y)).with_neighbors(neighbours)
    }

    #[test]
    fn directed_edges_are_not_symmetrised() {
        let graph = WaypointGraph::build(
            vec![wp("a", 0.0, 0.0, &["b"]), wp("b", 1.0, 0.0, &[])],
            WaypointKey::Document,
        );

        assert_eq!(graph.neighbours("a"), ["b"]);
        assert!(graph.neighbours("b").is_empty());
    }

    #[test]
    fn dangling_neighbours_are_dropped() {
        let graph = WaypointGraph::build(
            vec![wp("a", 0.0, 0.0, &["missing", "b"]), wp("b", 1.0, 0.0, &["a"])],
            WaypointKey::Document,
        );

        assert_eq!(graph.neighbours("a"), ["b"]);
    }

    #[test]
    fn node_key_skips_records_without_node_id() {
        let graph = WaypointGraph::build(
            vec![
                wp("doc1", 0.0, 0.0, &["N2"]).with_node_id("N1"),
                wp("doc2", 1.0, 0.0, &["N1"]).with_node_id("N2"),
                wp("doc3", 2.0, 0.0, &["N1"]),
            ],
            WaypointKey::Node,
        );

        assert_eq!(graph.len(), 2);
        assert!(graph.contains("N1"));
        assert!(!graph.contains("doc3"));
        assert_eq!(graph.get("N2").map(|w| w.id.as_str()), Some("doc2"));
    }

    #[test]
    fn path_cost_sums_edge_lengths() {
        let graph = WaypointGraph::build(
            vec![
                wp("a", 0.0, 0.0, &["b"]),
                wp("b", 3.0, 4.0, &["c"]),
                wp("c", 3.0, 6.0, &[]),
            ],
            WaypointKey::Document,
        );
        let path: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        assert_eq!(graph.path_cost(&path), Some(7.0));
        assert_eq!(graph.path_cost(&["a".to_string()]), Some(0.0));
        assert_eq!(graph.path_cost(&["c".to_string(), "b".to_string()]), None);
    }
}
