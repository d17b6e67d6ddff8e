//! Indoor navigation waypoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::IndoorPoint;

/// Default waypoint type for records that do not declare one.
const DEFAULT_KIND: &str = "path";

/// An indoor navigation node inside a station.
///
/// `neighbors` is directed: an edge A→B does not imply B→A. Traversal
/// follows the relation exactly as the producer wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WaypointRecord")]
pub struct Waypoint {
    /// Document id in the backing store.
    #[serde(rename = "doc_id")]
    pub id: String,

    /// Graph-level id used by producers that key edges by node rather than
    /// by document.
    pub node_id: Option<String>,

    pub station_id: Option<String>,

    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: String,

    pub location: IndoorPoint,

    pub neighbors: Vec<String>,

    /// Instruction text keyed by the neighbour it leads to.
    pub instructions: BTreeMap<String, String>,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, location: IndoorPoint) -> Self {
        Self {
            id: id.into(),
            node_id: None,
            station_id: None,
            name: None,
            kind: DEFAULT_KIND.to_string(),
            location,
            neighbors: Vec::new(),
            instructions: BTreeMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_neighbors(mut self, ids: &[&str]) -> Self {
        self.neighbors = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }

    pub fn with_instruction(mut self, to: impl Into<String>, text: impl Into<String>) -> Self {
        self.instructions.insert(to.into(), text.into());
        self
    }

    /// Name for user-facing text, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether this waypoint is a selectable destination.
    ///
    /// Purely structural nodes are unnamed or carry "Node" in their name.
    pub fn is_destination(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.contains("Node"))
    }
}

/// Raw store shape. Producers disagree on field names and on whether the
/// position is nested, so everything is optional here.
#[derive(Deserialize)]
struct WaypointRecord {
    #[serde(alias = "doc_id", alias = "waypoint_id")]
    id: String,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    station_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    location: Option<IndoorPoint>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default, alias = "adjacent_waypoints")]
    neighbors: Option<Vec<String>>,
    #[serde(default)]
    instructions: Option<BTreeMap<String, String>>,
}

impl From<WaypointRecord> for Waypoint {
    fn from(record: WaypointRecord) -> Self {
        let location = match (record.location, record.x, record.y) {
            (Some(location), _, _) => location,
            (None, Some(x), Some(y)) => IndoorPoint::new(x, y),
            _ => IndoorPoint::default(),
        };

        Self {
            id: record.id,
            node_id: record.node_id,
            station_id: record.station_id,
            name: record.name,
            kind: record.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
            location,
            neighbors: record.neighbors.unwrap_or_default(),
            instructions: record.instructions.unwrap_or_default(),
        }
    }
}
