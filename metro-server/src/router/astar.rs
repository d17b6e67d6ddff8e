//! A* search over indoor waypoint graphs.
//!
//! Edge cost and heuristic are both the planar distance between waypoint
//! positions. The heuristic is admissible and consistent for these costs,
//! so the first time the goal is popped its path is optimal and closed
//! nodes never need reopening.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use super::reconstruct_path;
use crate::graph::WaypointGraph;

/// Lowest-cost path from `start` to `goal`.
///
/// Returns an empty path immediately when either endpoint is not in the
/// graph, and an empty path when the open set is exhausted.
///
/// Among entries with equal `f = g + h`, the one pushed first is popped
/// first.
pub fn find_waypoint_path(graph: &WaypointGraph, start: &str, goal: &str) -> Vec<String> {
    let (Some(_), Some(goal_position)) = (graph.position(start), graph.position(goal)) else {
        return Vec::new();
    };
    let heuristic = |id: &str| {
        graph
            .position(id)
            .map_or(0.0, |p| p.distance_to(&goal_position))
    };

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut closed: HashSet<&str> = HashSet::new();
    let mut open = BinaryHeap::new();
    let mut sequence = 0u64;

    g_score.insert(start, 0.0);
    open.push(OpenEntry::new(start, 0.0, heuristic(start), sequence));

    while let Some(entry) = open.pop() {
        let current = entry.node;
        if !closed.insert(current) {
            continue;
        }

        if current == goal {
            trace!(start, goal, cost = entry.g, expanded = closed.len(), "waypoint path found");
            return reconstruct_path(&parents, start, goal);
        }

        for next in graph.neighbours(current) {
            let next = next.as_str();
            if closed.contains(next) {
                continue;
            }
            let Some(step) = graph.distance(current, next) else {
                continue;
            };

            let tentative = entry.g + step;
            let known = g_score.get(next).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                g_score.insert(next, tentative);
                parents.insert(next, current);
                sequence += 1;
                open.push(OpenEntry::new(next, tentative, heuristic(next), sequence));
            }
        }
    }

    trace!(start, goal, expanded = closed.len(), "no waypoint path");
    Vec::new()
}

/// Open-set entry. Superseded entries stay in the heap and are skipped when
/// popped, because their node is already closed.
#[derive(Debug, Clone, Copy)]
struct OpenEntry<'a> {
    node: &'a str,
    g: f64,
    f: f64,
    sequence: u64,
}

impl<'a> OpenEntry<'a> {
    fn new(node: &'a str, g: f64, h: f64, sequence: u64) -> Self {
        Self {
            node,
            g,
            f: g + h,
            sequence,
        }
    }
}

impl PartialEq for OpenEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry<'_> {}

impl PartialOrd for OpenEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys so the max-heap pops lowest f, then
        // earliest insertion.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
