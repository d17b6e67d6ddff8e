//! Station, gate and line-sequence records.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// An entry/exit gate, owned by exactly one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub name: String,

    /// Gates without a location cannot be ranked by distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    /// Street-level description, e.g. "Link Road, towards Infinity Mall".
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Gate {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location: Some(location),
            description: None,
        }
    }
}

/// A metro station as held by the backing store.
///
/// Every field except the id is defaulted when absent, so a sparse record
/// still loads: no lines, no location, no neighbours, no gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "station_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Lines serving this station, in display order.
    #[serde(default)]
    pub lines: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    /// Ids of directly connected stations, in traversal order.
    #[serde(default)]
    pub adjacent_stations: Vec<String>,

    #[serde(default)]
    pub gates: Vec<Gate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Station {
    /// Create a station with no location, neighbours or gates.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lines: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            location: None,
            adjacent_stations: Vec::new(),
            gates: Vec::new(),
            image_url: None,
        }
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_adjacent(mut self, ids: &[&str]) -> Self {
        self.adjacent_stations = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }

    /// Whether `line` serves this station.
    pub fn serves(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    /// Gates that carry a usable location.
    pub fn located_gates(&self) -> impl Iterator<Item = (&Gate, GeoPoint)> {
        self.gates
            .iter()
            .filter_map(|gate| gate.location.map(|loc| (gate, loc)))
    }

    /// Minimal projection used in resolver responses.
    pub fn summary(&self) -> StationSummary {
        StationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            lines: self.lines.clone(),
        }
    }
}

/// The id/name/lines projection of a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    #[serde(rename = "station_id")]
    pub id: String,
    pub name: String,
    pub lines: Vec<String>,
}

/// One stop in a line-ordered network description.
///
/// Consecutive stops on the same line are adjacent. A stop that declares
/// `interchange_with = Y` on line `X` is linked to the stop on line `Y`
/// that declares `interchange_with = X`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStop {
    pub station_id: String,
    pub line: String,
    #[serde(
        default,
        alias = "interchangeWith",
        skip_serializing_if = "Option::is_none"
    )]
    pub interchange_with: Option<String>,
}

impl LineStop {
    pub fn new(station_id: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            line: line.into(),
            interchange_with: None,
        }
    }

    pub fn interchange(mut self, line: impl Into<String>) -> Self {
        self.interchange_with = Some(line.into());
        self
    }
}
