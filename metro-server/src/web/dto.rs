//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Gate, StationSummary, Waypoint};
use crate::instructions::RouteStep;
use crate::nearest::JourneyPlan;

/// `from`/`to` id pair shared by the route endpoints.
///
/// Fields are optional so a missing parameter becomes a 400 with a JSON
/// body rather than axum's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// A user coordinate, kept raw until validated.
#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Origin and destination coordinates for journey planning.
#[derive(Debug, Deserialize)]
pub struct JourneyQuery {
    pub from_lat: Option<String>,
    pub from_lon: Option<String>,
    pub to_lat: Option<String>,
    pub to_lon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StationFilter {
    #[serde(rename = "stationId")]
    pub station_id: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A waypoint as returned by `/api/ar-path`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WaypointNode {
    pub doc_id: String,
    pub node_id: Option<String>,
    pub name: Option<String>,
    pub station_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub neighbors: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&Waypoint> for WaypointNode {
    fn from(wp: &Waypoint) -> Self {
        Self {
            doc_id: wp.id.clone(),
            node_id: wp.node_id.clone(),
            name: wp.name.clone(),
            station_id: wp.station_id.clone(),
            x: wp.location.x,
            y: wp.location.y,
            neighbors: wp.neighbors.clone(),
            kind: wp.kind.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArPathResponse {
    pub found: bool,
    pub path: Vec<WaypointNode>,
}

/// A selectable indoor destination.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub doc_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A planned door-to-door journey.
#[derive(Debug, Serialize, Deserialize)]
pub struct JourneyResponse {
    pub boarding: StationSummary,
    pub alighting: StationSummary,
    pub entry_gate: Option<Gate>,
    pub exit_gate: Option<Gate>,
    pub walk_distance_km: f64,
    pub hop_count: usize,
    pub blended_cost: f64,
    pub route: Vec<StationSummary>,
    pub steps: Vec<StepResult>,
}

/// A route step with its rendered sentence.
#[derive(Debug, Serialize, Deserialize)]
pub struct StepResult {
    #[serde(flatten)]
    pub step: RouteStep,
    pub text: String,
}

impl From<&RouteStep> for StepResult {
    fn from(step: &RouteStep) -> Self {
        Self {
            step: step.clone(),
            text: step.text(),
        }
    }
}

impl JourneyResponse {
    pub fn new(plan: JourneyPlan, route: Vec<StationSummary>, steps: &[RouteStep]) -> Self {
        Self {
            boarding: plan.boarding,
            alighting: plan.alighting,
            entry_gate: plan.entry_gate,
            exit_gate: plan.exit_gate,
            walk_distance_km: plan.walk_distance_km,
            hop_count: plan.hop_count,
            blended_cost: plan.blended_cost,
            route,
            steps: steps.iter().map(StepResult::from).collect(),
        }
    }
}
