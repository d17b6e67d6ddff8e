//! Insertion-ordered adjacency map.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{LineStop, Station};

/// Mapping from entity id to its directly connected ids.
///
/// Neighbour lists keep insertion order and never contain duplicates, so
/// traversal order (and with it, tie-breaking between equal-cost paths) is
/// reproducible for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    neighbours: HashMap<String, Vec<String>>,
    /// Node ids in first-insertion order.
    order: Vec<String>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `id` has an entry, possibly empty.
    pub fn insert_node(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.neighbours.contains_key(&id) {
            self.order.push(id.clone());
            self.neighbours.insert(id, Vec::new());
        }
    }

    /// Add a directed edge `from → to`.
    ///
    /// Returns `false` (and changes nothing) when either endpoint is
    /// unknown, when the edge is a self-loop, or when it already exists.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if from == to || !self.neighbours.contains_key(to) {
            return false;
        }
        let Some(list) = self.neighbours.get_mut(from) else {
            return false;
        };
        if list.iter().any(|n| n == to) {
            return false;
        }
        list.push(to.to_string());
        true
    }

    /// Add edges in both directions.
    pub fn link(&mut self, a: &str, b: &str) {
        self.add_edge(a, b);
        self.add_edge(b, a);
    }

    /// Neighbours of `id` in insertion order; empty for unknown ids.
    pub fn neighbours(&self, id: &str) -> &[String] {
        self.neighbours.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.neighbours.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Iterate over every node id in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Build from stations whose `adjacent_stations` are already populated.
    ///
    /// Edges are taken as given; dangling references are skipped.
    pub fn from_stations(stations: &[Station]) -> Self {
        let mut map = Self::new();
        for station in stations {
            map.insert_node(station.id.as_str());
        }
        for station in stations {
            for neighbour in &station.adjacent_stations {
                if !map.contains(neighbour) {
                    trace!(
                        station = %station.id,
                        neighbour = %neighbour,
                        "skipping dangling adjacency"
                    );
                    continue;
                }
                map.add_edge(&station.id, neighbour);
            }
        }
        map
    }

    /// Derive a symmetric graph from line-ordered stops.
    ///
    /// Stops are grouped by line in order of first appearance; consecutive
    /// stops on a line are linked both ways. A stop on line `X` declaring
    /// `interchange_with = Y` is then linked to the first stop on line `Y`
    /// declaring `interchange_with = X`. An unmatched declaration adds
    /// nothing.
    pub fn from_line_sequence(stops: &[LineStop]) -> Self {
        let mut map = Self::new();
        let mut lines: Vec<(&str, Vec<&str>)> = Vec::new();

        for stop in stops {
            map.insert_node(stop.station_id.as_str());
            match lines.iter_mut().find(|(line, _)| *line == stop.line) {
                Some((_, members)) => members.push(stop.station_id.as_str()),
                None => lines.push((stop.line.as_str(), vec![stop.station_id.as_str()])),
            }
        }

        for (_, members) in &lines {
            for pair in members.windows(2) {
                map.link(pair[0], pair[1]);
            }
        }

        for stop in stops {
            let Some(other_line) = stop.interchange_with.as_deref() else {
                continue;
            };
            let partner = stops.iter().find(|p| {
                p.line == other_line && p.interchange_with.as_deref() == Some(stop.line.as_str())
            });
            match partner {
                Some(partner) => map.link(&stop.station_id, &partner.station_id),
                None => trace!(
                    station = %stop.station_id,
                    line = %stop.line,
                    interchange_with = %other_line,
                    "no interchange partner"
                ),
            }
        }

        map
    }

    /// Add `other`'s edges in both directions, restricted to nodes already
    /// present in `self`.
    pub fn merge_symmetric(&mut self, other: &AdjacencyMap) {
        for id in other.ids() {
            for neighbour in other.neighbours(id) {
                self.link(id, neighbour);
            }
        }
    }
}
