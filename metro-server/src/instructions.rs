//! Turn resolved paths into rider-facing steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::graph::WaypointGraph;

/// Placeholder distance for synthesised indoor instructions.
pub const FALLBACK_STEP_METRES: u32 = 30;

/// One step of a station-to-station route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteStep {
    /// Stay on one line between two stations.
    Ride {
        line: Option<String>,
        from: String,
        to: String,
        stops: usize,
    },
    /// Change lines. `from_station == to_station` for an in-station change;
    /// they differ when the change walks over a cross-link.
    Interchange {
        from_station: String,
        to_station: String,
        from_line: Option<String>,
        to_line: Option<String>,
    },
}

impl RouteStep {
    pub fn is_interchange(&self) -> bool {
        matches!(self, RouteStep::Interchange { .. })
    }

    /// Human-readable sentence for this step.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

fn line_label(line: &Option<String>) -> String {
    match line {
        Some(line) => format!("the {line} line"),
        None => "the metro".to_string(),
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteStep::Ride {
                line,
                from,
                to,
                stops,
            } => {
                let unit = if *stops == 1 { "stop" } else { "stops" };
                write!(
                    f,
                    "Ride {} from {from} to {to} ({stops} {unit}).",
                    line_label(line)
                )
            }
            RouteStep::Interchange {
                from_station,
                to_station,
                from_line,
                to_line,
            } if from_station == to_station => write!(
                f,
                "Change from {} to {} at {from_station}.",
                line_label(from_line),
                line_label(to_line)
            ),
            RouteStep::Interchange {
                from_station,
                to_station,
                from_line,
                to_line,
            } => write!(
                f,
                "Change from {} at {from_station} to {} at {to_station}.",
                line_label(from_line),
                line_label(to_line)
            ),
        }
    }
}

/// The line to ride from `here` towards `next`: the first of `here`'s lines
/// that `next` also serves, else `here`'s first line.
fn line_towards(here: &Station, next: Option<&Station>) -> Option<String> {
    next.and_then(|next| here.lines.iter().find(|l| next.serves(l)))
        .or_else(|| here.lines.first())
        .cloned()
}

/// A station with no line data never forces a change.
fn continues(station: &Station, line: Option<&str>) -> bool {
    match line {
        Some(line) => station.lines.is_empty() || station.serves(line),
        None => true,
    }
}

/// Project a station path onto ride and interchange steps.
///
/// A ride accumulates stations while they keep serving the current line and
/// is emitted when the line changes or the path ends. A change where both
/// stations share a line is made in-station at the earlier one; otherwise
/// the rider transfers across the link between them.
pub fn project_station_route(path: &[&Station]) -> Vec<RouteStep> {
    let mut steps = Vec::new();
    if path.len() < 2 {
        return steps;
    }

    let mut line = line_towards(path[0], path.get(1).copied());
    let mut ride_start = 0;

    let flush = |steps: &mut Vec<RouteStep>, line: &Option<String>, start: usize, end: usize| {
        if end > start {
            steps.push(RouteStep::Ride {
                line: line.clone(),
                from: path[start].name.clone(),
                to: path[end].name.clone(),
                stops: end - start,
            });
        }
    };

    for i in 1..path.len() {
        let (prev, next) = (path[i - 1], path[i]);
        if continues(next, line.as_deref()) {
            continue;
        }

        flush(&mut steps, &line, ride_start, i - 1);

        match prev.lines.iter().find(|l| next.serves(l)) {
            Some(shared) => {
                steps.push(RouteStep::Interchange {
                    from_station: prev.name.clone(),
                    to_station: prev.name.clone(),
                    from_line: line.clone(),
                    to_line: Some(shared.clone()),
                });
                line = Some(shared.clone());
                ride_start = i - 1;
            }
            None => {
                let to_line = line_towards(next, path.get(i + 1).copied());
                steps.push(RouteStep::Interchange {
                    from_station: prev.name.clone(),
                    to_station: next.name.clone(),
                    from_line: line.clone(),
                    to_line: to_line.clone(),
                });
                line = to_line;
                ride_start = i;
            }
        }
    }

    flush(&mut steps, &line, ride_start, path.len() - 1);
    steps
}

/// Project a waypoint path onto per-edge instruction text.
///
/// Each edge uses the authored `instructions[current][next]` when present.
/// Otherwise a generic step towards the next node's name (or id) is
/// synthesised, so partial instruction data never fails the route.
pub fn project_waypoint_route(graph: &WaypointGraph, path: &[String]) -> Vec<String> {
    path.windows(2)
        .map(|pair| {
            let (current, next) = (&pair[0], &pair[1]);
            graph
                .get(current)
                .and_then(|wp| wp.instructions.get(next))
                .cloned()
                .unwrap_or_else(|| {
                    let target = graph.get(next).map_or(next.as_str(), |wp| wp.display_name());
                    format!("Proceed to {target} ({FALLBACK_STEP_METRES}m).")
                })
        })
        .collect()
}
