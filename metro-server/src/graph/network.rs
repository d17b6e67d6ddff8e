//! The station network loaded for one request.

use std::collections::HashMap;

use super::AdjacencyMap;
use crate::domain::{LineStop, Station};

/// Stations plus the adjacency used to route between them.
///
/// Built from an injected, read-only dataset; nothing here outlives the
/// request that loaded it.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<String, usize>,
    graph: AdjacencyMap,
}

impl Network {
    /// Build the network from stations and an optional line-ordered
    /// description.
    ///
    /// Explicit `adjacent_stations` are kept as written. Edges derived from
    /// `line_stops` are merged in both directions. Each station's
    /// `adjacent_stations` is then rewritten to the resolved neighbour list,
    /// so callers see exactly what the router traverses.
    pub fn new(mut stations: Vec<Station>, line_stops: &[LineStop]) -> Self {
        let mut graph = AdjacencyMap::from_stations(&stations);
        if !line_stops.is_empty() {
            graph.merge_symmetric(&AdjacencyMap::from_line_sequence(line_stops));
        }

        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter_mut().enumerate() {
            station.adjacent_stations = graph.neighbours(&station.id).to_vec();
            index.entry(station.id.clone()).or_insert(i);
        }

        Self {
            stations,
            index,
            graph,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&i| &self.stations[i])
    }

    pub fn graph(&self) -> &AdjacencyMap {
        &self.graph
    }

    /// Look up each id of a path, skipping any that are unknown.
    pub fn resolve(&self, path: &[String]) -> Vec<&Station> {
        path.iter().filter_map(|id| self.station(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_stops_fill_in_missing_adjacency() {
        let stations = vec![
            Station::new("a", "A", &["1"]),
            Station::new("b", "B", &["1"]).with_adjacent(&["a"]),
            Station::new("c", "C", &["1"]),
        ];
        let stops = vec![
            LineStop::new("a", "1"),
            LineStop::new("b", "1"),
            LineStop::new("c", "1"),
        ];
        let network = Network::new(stations, &stops);

        assert_eq!(network.graph().neighbours("a"), ["b"]);
        assert_eq!(network.graph().neighbours("b"), ["a", "c"]);
        assert_eq!(
            network.station("c").map(|s| s.adjacent_stations.clone()),
            Some(vec!["b".to_string()])
        );
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let network = Network::new(vec![Station::new("a", "A", &[])], &[]);
        let path = vec!["a".to_string(), "zzz".to_string()];

        let resolved = network.resolve(&path);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "a");
    }

    #[test]
    fn empty_network() {
        let network = Network::new(Vec::new(), &[]);
        assert!(network.stations().is_empty());
        assert!(network.graph().is_empty());
    }
}
