//! Breadth-first station routing.
//!
//! Every hop costs the same, so the first time BFS reaches the goal it has
//! found a path with the fewest hops. Neighbours are expanded in the
//! adjacency map's insertion order, which makes the choice between
//! equal-length paths deterministic: the one discovered first wins.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use super::reconstruct_path;
use crate::graph::AdjacencyMap;

/// Fewest-hops path from `start` to `goal`.
///
/// Returns `[start]` when the endpoints coincide, and an empty path when
/// either endpoint is unknown or the goal is unreachable.
pub fn shortest_station_path(graph: &AdjacencyMap, start: &str, goal: &str) -> Vec<String> {
    if !graph.contains(start) || !graph.contains(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start.to_string()];
    }

    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbours(current) {
            let next = next.as_str();
            if next == start || parents.contains_key(next) {
                continue;
            }
            parents.insert(next, current);
            if next == goal {
                let path = reconstruct_path(&parents, start, goal);
                trace!(start, goal, hops = path.len() - 1, "station path found");
                return path;
            }
            queue.push_back(next);
        }
    }

    trace!(start, goal, visited = parents.len(), "no station path");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineStop, Station};

    fn graph(edges: &[(&str, &[&str])]) -> AdjacencyMap {
        let stations: Vec<Station> = edges
            .iter()
            .map(|(id, adj)| Station::new(*id, *id, &[]).with_adjacent(adj))
            .collect();
        AdjacencyMap::from_stations(&stations)
    }

    #[test]
    fn same_start_and_goal() {
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        assert_eq!(shortest_station_path(&g, "a", "a"), vec!["a"]);
    }

    #[test]
    fn unknown_endpoints_give_empty_path() {
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        assert!(shortest_station_path(&g, "a", "zzz").is_empty());
        assert!(shortest_station_path(&g, "zzz", "a").is_empty());
        assert!(shortest_station_path(&g, "zzz", "zzz").is_empty());
    }

    #[test]
    fn disconnected_goal_gives_empty_path() {
        let g = graph(&[("a", &["b"]), ("b", &["a"]), ("c", &["d"]), ("d", &["c"])]);
        assert!(shortest_station_path(&g, "a", "d").is_empty());
    }

    #[test]
    fn prefers_fewest_hops() {
        // a-b-c-d-e around the long way, a-x-e as a shortcut.
        let g = graph(&[
            ("a", &["b", "x"]),
            ("b", &["a", "c"]),
            ("c", &["b", "d"]),
            ("d", &["c", "e"]),
            ("e", &["d", "x"]),
            ("x", &["a", "e"]),
        ]);
        assert_eq!(shortest_station_path(&g, "a", "e"), vec!["a", "x", "e"]);
    }

    #[test]
    fn ties_go_to_first_listed_neighbour() {
        // Diamond: a→{p,q}→z, both two hops.
        let g = graph(&[
            ("a", &["p", "q"]),
            ("p", &["z"]),
            ("q", &["z"]),
            ("z", &[]),
        ]);
        assert_eq!(shortest_station_path(&g, "a", "z"), vec!["a", "p", "z"]);

        let g = graph(&[
            ("a", &["q", "p"]),
            ("p", &["z"]),
            ("q", &["z"]),
            ("z", &[]),
        ]);
        assert_eq!(shortest_station_path(&g, "a", "z"), vec!["a", "q", "z"]);
    }

    #[test]
    fn line_network_with_interchange() {
        let stops = vec![
            LineStop::new("A", "1"),
            LineStop::new("B", "1"),
            LineStop::new("C", "1").interchange("2"),
            LineStop::new("D", "2").interchange("1"),
            LineStop::new("E", "2"),
        ];
        let g = AdjacencyMap::from_line_sequence(&stops);

        assert_eq!(shortest_station_path(&g, "A", "E"), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(shortest_station_path(&g, "E", "A"), vec!["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn respects_one_way_edges() {
        let g = graph(&[("a", &["b"]), ("b", &[])]);
        assert_eq!(shortest_station_path(&g, "a", "b"), vec!["a", "b"]);
        assert!(shortest_station_path(&g, "b", "a").is_empty());
    }
}
