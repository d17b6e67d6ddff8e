//! Nearest station/gate resolution and entry-station selection.
//!
//! At metro-network scale (tens of stations, a few gates each) a linear
//! scan is fast enough. [`StationLocator`] is the seam for swapping in a
//! spatial index without touching callers.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Gate, GeoPoint, Station, StationSummary};
use crate::graph::Network;
use crate::router::shortest_station_path;

/// Default walking weight: one kilometre on foot costs as much as four
/// metro hops.
pub const DEFAULT_WALK_WEIGHT: f64 = 4.0;

/// Default number of boarding candidates routed per request.
pub const DEFAULT_CANDIDATE_COUNT: usize = 3;

/// Result of a nearest-station lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestStation {
    pub station: StationSummary,
    /// The closest gate, or `None` when the station was matched on its own
    /// coordinate.
    pub gate: Option<Gate>,
    pub distance_km: f64,
}

/// Finds the station closest to a coordinate.
pub trait StationLocator {
    fn nearest(&self, point: GeoPoint) -> Option<NearestStation>;
}

/// Exhaustive O(stations × gates) scan.
#[derive(Debug, Clone, Copy)]
pub struct LinearScan<'a> {
    stations: &'a [Station],
}

impl<'a> LinearScan<'a> {
    pub fn new(stations: &'a [Station]) -> Self {
        Self { stations }
    }
}

impl StationLocator for LinearScan<'_> {
    /// Every located gate is a candidate. A station without gates is a
    /// candidate on its own coordinate, with no gate in the result. A station
    /// whose gates all lack a location is not a candidate. The first minimum
    /// found wins.
    fn nearest(&self, point: GeoPoint) -> Option<NearestStation> {
        let mut best: Option<(&Station, Option<&Gate>, f64)> = None;

        for station in self.stations {
            let mut points: Vec<(Option<&Gate>, GeoPoint)> = station
                .located_gates()
                .map(|(gate, location)| (Some(gate), location))
                .collect();
            if station.gates.is_empty() {
                points.extend(station.location.map(|location| (None, location)));
            }

            for (gate, location) in points {
                let distance = point.distance_km(&location);
                if best.is_none_or(|(_, _, d)| distance < d) {
                    best = Some((station, gate, distance));
                }
            }
        }

        best.map(|(station, gate, distance_km)| NearestStation {
            station: station.summary(),
            gate: gate.cloned(),
            distance_km,
        })
    }
}

/// Nearest station and gate to `point` by linear scan.
pub fn nearest_station(stations: &[Station], point: GeoPoint) -> Option<NearestStation> {
    LinearScan::new(stations).nearest(point)
}

/// The gate of `station` closest to `point`, with its distance.
pub fn nearest_gate(station: &Station, point: GeoPoint) -> Option<(Gate, f64)> {
    let mut best: Option<(&Gate, f64)> = None;
    for (gate, location) in station.located_gates() {
        let distance = point.distance_km(&location);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((gate, distance));
        }
    }
    best.map(|(gate, distance)| (gate.clone(), distance))
}

/// Tuning for entry-station selection.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryConfig {
    /// Cost of one kilometre of walking, in metro hops.
    pub walk_weight: f64,

    /// How many of the closest stations are routed and compared.
    /// Bounds the number of graph searches per request.
    pub candidate_count: usize,
}

impl EntryConfig {
    pub fn new(walk_weight: f64, candidate_count: usize) -> Self {
        Self {
            walk_weight,
            candidate_count,
        }
    }

    pub fn with_walk_weight(mut self, walk_weight: f64) -> Self {
        self.walk_weight = walk_weight;
        self
    }

    pub fn with_candidate_count(mut self, candidate_count: usize) -> Self {
        self.candidate_count = candidate_count;
        self
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            walk_weight: DEFAULT_WALK_WEIGHT,
            candidate_count: DEFAULT_CANDIDATE_COUNT,
        }
    }
}

/// A boarding station under consideration.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub station_id: String,
    pub walk_distance_km: f64,
    pub hop_count: usize,
    pub blended_cost: f64,
}

impl Candidate {
    /// `blended_cost = walk_distance_km * walk_weight + hop_count`.
    pub fn new(
        station_id: impl Into<String>,
        walk_distance_km: f64,
        hop_count: usize,
        walk_weight: f64,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            walk_distance_km,
            hop_count,
            blended_cost: walk_distance_km * walk_weight + hop_count as f64,
        }
    }
}

/// Cheapest candidate by blended cost; on a tie the earlier one wins.
pub fn select_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best: Option<&Candidate>, c| match best {
        Some(b) if b.blended_cost <= c.blended_cost => Some(b),
        _ => Some(c),
    })
}

/// The `k` located stations closest to `origin` by station coordinate,
/// nearest first. Equal distances keep input order.
pub fn closest_stations(stations: &[Station], origin: GeoPoint, k: usize) -> Vec<(&Station, f64)> {
    let mut ranked: Vec<(&Station, f64)> = stations
        .iter()
        .filter_map(|s| s.location.map(|loc| (s, origin.distance_km(&loc))))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(k);
    ranked
}

/// A resolved door-to-door metro journey.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyPlan {
    pub boarding: StationSummary,
    pub alighting: StationSummary,
    pub entry_gate: Option<Gate>,
    pub exit_gate: Option<Gate>,
    pub walk_distance_km: f64,
    pub hop_count: usize,
    pub blended_cost: f64,
    /// Station ids from boarding to alighting, inclusive.
    pub path: Vec<String>,
}

/// Choose where to board for a trip between two free-form coordinates.
///
/// The alighting station is the one nearest `destination`. The
/// `candidate_count` stations nearest `origin` are each routed there, and
/// the candidate with the lowest blended walk+hop cost is chosen.
/// Candidates with no route are dropped. Entry and exit gates are picked
/// independently as the gates nearest each end.
pub fn plan_journey(
    network: &Network,
    origin: GeoPoint,
    destination: GeoPoint,
    config: &EntryConfig,
) -> Option<JourneyPlan> {
    let (alighting, _) = closest_stations(network.stations(), destination, 1)
        .into_iter()
        .next()?;

    let mut candidates = Vec::new();
    let mut paths = Vec::new();
    for (station, walk_km) in closest_stations(network.stations(), origin, config.candidate_count) {
        let path = shortest_station_path(network.graph(), &station.id, &alighting.id);
        if path.is_empty() {
            debug!(candidate = %station.id, alighting = %alighting.id, "candidate has no route");
            continue;
        }
        candidates.push(Candidate::new(
            station.id.as_str(),
            walk_km,
            path.len() - 1,
            config.walk_weight,
        ));
        paths.push(path);
    }

    let best = select_candidate(&candidates)?;
    let index = candidates.iter().position(|c| std::ptr::eq(c, best))?;
    let boarding = network.station(&best.station_id)?;

    debug!(
        boarding = %boarding.id,
        alighting = %alighting.id,
        candidates = candidates.len(),
        blended_cost = best.blended_cost,
        "selected boarding station"
    );

    Some(JourneyPlan {
        boarding: boarding.summary(),
        alighting: alighting.summary(),
        entry_gate: nearest_gate(boarding, origin).map(|(gate, _)| gate),
        exit_gate: nearest_gate(alighting, destination).map(|(gate, _)| gate),
        walk_distance_km: best.walk_distance_km,
        hop_count: best.hop_count,
        blended_cost: best.blended_cost,
        path: paths.swap_remove(index),
    })
}
