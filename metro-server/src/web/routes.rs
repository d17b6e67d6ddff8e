//! HTTP route handlers.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::domain::{GeoPoint, Poi, Station};
use crate::graph::{Network, WaypointGraph, WaypointKey};
use crate::instructions::{project_station_route, project_waypoint_route};
use crate::nearest::{NearestStation, nearest_station, plan_journey};
use crate::router::{find_waypoint_path, shortest_station_path};
use crate::store::{DocumentStore, StoreError};

use super::dto::*;
use super::state::AppState;

const MISSING_FROM_TO: &str = "Missing \"from\" or \"to\" query parameters.";
const NO_LOCATED_STATIONS: &str = "No stations with location data found.";

/// Create the application router.
pub fn create_router<S: DocumentStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations::<S>))
        .route("/api/route", get(station_route::<S>))
        .route("/api/nearest-station", get(nearest::<S>))
        .route("/api/journey", get(journey::<S>))
        .route("/api/pois", get(list_pois::<S>))
        .route("/api/ar-route", get(ar_route::<S>))
        .route("/api/ar-path", get(ar_path::<S>))
        .route("/api/destinations", get(destinations::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Load stations and line stops, and build the station network.
async fn load_network<S: DocumentStore>(store: &S) -> Result<Network, AppError> {
    let (stations, stops) = tokio::try_join!(store.stations(), store.line_stops())?;
    Ok(Network::new(stations, &stops))
}

/// Both values of an id pair, or a 400.
fn require_pair(query: RouteQuery) -> Result<(String, String), AppError> {
    let nonempty = |v: Option<String>| v.filter(|s| !s.is_empty());
    match (nonempty(query.from), nonempty(query.to)) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(AppError::bad_request(MISSING_FROM_TO)),
    }
}

/// Validate a raw latitude/longitude pair.
///
/// Missing, non-numeric and non-finite values are all rejected before any
/// search runs.
fn parse_coordinate(
    lat: Option<&str>,
    lon: Option<&str>,
    names: (&str, &str),
) -> Result<GeoPoint, AppError> {
    let (lat_name, lon_name) = names;
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(AppError::bad_request(format!(
            "Missing \"{lat_name}\" or \"{lon_name}\" query parameters."
        )));
    };

    let parse = |raw: &str| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    match (parse(lat), parse(lon)) {
        (Some(lat), Some(lon)) => Ok(GeoPoint::new(lat, lon)),
        _ => Err(AppError::bad_request(format!(
            "Invalid \"{lat_name}\" or \"{lon_name}\" parameters."
        ))),
    }
}

/// All stations, exactly as stored.
async fn list_stations<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Station>>, AppError> {
    let stations = state.store.stations().await?;
    debug!(stations = stations.len(), "listing stations");
    Ok(Json(stations))
}

/// Fewest-hops route between two stations, as full station records.
async fn station_route<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<Station>>, AppError> {
    let (from, to) = require_pair(query)?;
    let network = load_network(state.store.as_ref()).await?;

    let path = shortest_station_path(network.graph(), &from, &to);
    if path.is_empty() {
        return Err(AppError::not_found(
            "No route found between the selected stations.",
        ));
    }

    info!(%from, %to, hops = path.len() - 1, "station route found");
    Ok(Json(network.resolve(&path).into_iter().cloned().collect()))
}

/// Nearest station and gate to a coordinate.
async fn nearest<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Json<NearestStation>, AppError> {
    let point = parse_coordinate(query.lat.as_deref(), query.lon.as_deref(), ("lat", "lon"))?;
    let stations = state.store.stations().await?;

    nearest_station(&stations, point)
        .map(Json)
        .ok_or_else(|| AppError::not_found(NO_LOCATED_STATIONS))
}

/// Door-to-door journey between two coordinates.
async fn journey<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<JourneyQuery>,
) -> Result<Json<JourneyResponse>, AppError> {
    let origin = parse_coordinate(
        query.from_lat.as_deref(),
        query.from_lon.as_deref(),
        ("from_lat", "from_lon"),
    )?;
    let destination = parse_coordinate(
        query.to_lat.as_deref(),
        query.to_lon.as_deref(),
        ("to_lat", "to_lon"),
    )?;

    let network = load_network(state.store.as_ref()).await?;
    if !network.stations().iter().any(|s| s.location.is_some()) {
        return Err(AppError::not_found(NO_LOCATED_STATIONS));
    }

    let plan = plan_journey(&network, origin, destination, &state.entry).ok_or_else(|| {
        AppError::not_found("No route found between the given locations.")
    })?;

    let stations = network.resolve(&plan.path);
    let steps = project_station_route(&stations);
    let route = stations.iter().map(|s| s.summary()).collect();

    info!(
        boarding = %plan.boarding.id,
        alighting = %plan.alighting.id,
        hops = plan.hop_count,
        "journey planned"
    );
    Ok(Json(JourneyResponse::new(plan, route, &steps)))
}

/// Points of interest, optionally for one station.
async fn list_pois<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(filter): Query<StationFilter>,
) -> Result<Json<Vec<Poi>>, AppError> {
    let mut pois = state.store.pois().await?;

    if let Some(station_id) = filter.station_id.filter(|s| !s.is_empty()) {
        pois.retain(|poi| poi.station_id.as_deref() == Some(station_id.as_str()));
    }

    Ok(Json(pois))
}

/// Indoor route between two waypoints, as instruction text.
///
/// Waypoints are addressed by document id and routed within the start
/// waypoint's station.
async fn ar_route<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let (from, to) = require_pair(query)?;

    let start = state
        .store
        .waypoint(&from)
        .await?
        .ok_or_else(|| AppError::not_found("Starting waypoint not found."))?;

    let station_id = start.station_id.ok_or_else(|| AppError::Internal {
        message: "Starting waypoint has no station_id.".to_string(),
    })?;

    let waypoints = state.store.waypoints_in_station(&station_id).await?;
    let graph = WaypointGraph::build(waypoints, WaypointKey::Document);

    let path = find_waypoint_path(&graph, &from, &to);
    if path.is_empty() {
        return Err(AppError::not_found("No AR route found."));
    }

    debug!(%from, %to, %station_id, steps = path.len() - 1, "AR route found");
    Ok(Json(project_waypoint_route(&graph, &path)))
}

/// Indoor route between two waypoints, as waypoint records.
///
/// Document ids are resolved to `node_id`s and the search runs over the
/// `node_id` graph of every waypoint.
async fn ar_path<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<ArPathResponse>, AppError> {
    let (from, to) = require_pair(query)?;
    let waypoints = state.store.waypoints().await?;

    let node_ids: HashMap<&str, &str> = waypoints
        .iter()
        .filter_map(|wp| wp.node_id.as_deref().map(|node| (wp.id.as_str(), node)))
        .collect();

    let (Some(start), Some(goal)) = (node_ids.get(from.as_str()), node_ids.get(to.as_str())) else {
        return Err(AppError::not_found("Invalid Start or End Node ID"));
    };
    let (start, goal) = (start.to_string(), goal.to_string());

    let graph = WaypointGraph::build(waypoints, WaypointKey::Node);
    let path: Vec<WaypointNode> = find_waypoint_path(&graph, &start, &goal)
        .iter()
        .filter_map(|id| graph.get(id))
        .map(WaypointNode::from)
        .collect();

    debug!(%from, %to, nodes = path.len(), "AR path searched");
    Ok(Json(ArPathResponse {
        found: !path.is_empty(),
        path,
    }))
}

/// Named destinations inside a station.
async fn destinations<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Query(filter): Query<StationFilter>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let station_id = filter
        .station_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing \"stationId\" query parameter."))?;

    let destinations = state
        .store
        .waypoints_in_station(&station_id)
        .await?
        .into_iter()
        .filter(|wp| wp.is_destination())
        .map(|wp| Destination {
            name: wp.display_name().to_string(),
            doc_id: wp.id,
            kind: wp.kind,
        })
        .collect();

    Ok(Json(destinations))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound {
            message: message.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
