//! Router tests against an in-memory store.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::*;
use crate::domain::{Gate, GeoPoint, IndoorPoint, LineStop, Poi, Station, Waypoint};
use crate::nearest::{EntryConfig, NearestStation};
use crate::store::{Dataset, DocumentStore, StaticStore, StoreError};

fn at(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon)
}

/// Blue line Versova - D.N. Nagar - Andheri, Red line Andheri - Gundavali,
/// plus an isolated station. Adjacency comes from the line sequence.
fn dataset() -> Dataset {
    let stations = vec![
        Station::new("versova", "Versova", &["Blue"])
            .with_location(at(19.1318, 72.8215))
            .with_gate(Gate::new("Gate 1", at(19.1320, 72.8213))),
        Station::new("dn_nagar", "D.N. Nagar", &["Blue"]).with_location(at(19.1245, 72.8318)),
        Station::new("andheri", "Andheri", &["Blue", "Red"])
            .with_location(at(19.1206, 72.8480))
            .with_gate(Gate::new("East", at(19.1207, 72.8490)))
            .with_gate(Gate::new("West", at(19.1205, 72.8470))),
        Station::new("gundavali", "Gundavali", &["Red"]).with_location(at(19.1175, 72.8600)),
        Station::new("island", "Island", &["Green"]),
    ];
    let network = vec![
        LineStop::new("versova", "Blue"),
        LineStop::new("dn_nagar", "Blue"),
        LineStop::new("andheri", "Blue"),
        LineStop::new("andheri", "Red"),
        LineStop::new("gundavali", "Red"),
    ];

    // Neighbour lists carry both document ids and node ids, so the
    // document-keyed and node-keyed graphs come from the same records.
    let waypoints = vec![
        Waypoint::new("doc_gate", IndoorPoint::new(0.0, 0.0))
            .named("Gate 1")
            .in_station("versova")
            .with_node_id("n1")
            .with_kind("gate")
            .with_neighbors(&["doc_hall", "n2"])
            .with_instruction("doc_hall", "Walk through the gate to the hall."),
        Waypoint::new("doc_hall", IndoorPoint::new(1.0, 0.0))
            .named("Hall Node 2")
            .in_station("versova")
            .with_node_id("n2")
            .with_neighbors(&["doc_gate", "doc_platform", "n1", "n3"]),
        Waypoint::new("doc_platform", IndoorPoint::new(2.0, 0.0))
            .named("Platform 1")
            .in_station("versova")
            .with_node_id("n3")
            .with_kind("platform")
            .with_neighbors(&["doc_hall", "n2"]),
        Waypoint::new("doc_stray", IndoorPoint::new(9.0, 9.0))
            .named("Lost Property")
            .in_station("versova")
            .with_node_id("n9"),
        Waypoint::new("doc_orphan", IndoorPoint::new(0.0, 0.0)).named("Orphan"),
        Waypoint::new("doc_other", IndoorPoint::new(0.0, 0.0))
            .named("Andheri Ticket Office")
            .in_station("andheri"),
    ];

    Dataset::default()
        .with_stations(stations)
        .with_network(network)
        .with_waypoints(waypoints)
        .with_pois(vec![
            Poi {
                id: "p1".into(),
                name: "Infinity Mall".into(),
                description: None,
                category: Some("shopping".into()),
                station_id: Some("dn_nagar".into()),
                location: None,
                image_url: None,
            },
            Poi {
                id: "p2".into(),
                name: "Juhu Beach".into(),
                description: None,
                category: None,
                station_id: Some("versova".into()),
                location: None,
                image_url: None,
            },
        ])
}

fn app() -> Router {
    create_router(AppState::new(StaticStore::new(dataset()), EntryConfig::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json<T: DeserializeOwned>(uri: &str) -> (StatusCode, T) {
    let (status, body) = get(app(), uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_error(uri: &str) -> (StatusCode, String) {
    let (status, body): (_, ErrorResponse) = get_json(uri).await;
    (status, body.error)
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn stations_are_listed_as_stored() {
    let (status, stations): (_, Vec<Station>) = get_json("/api/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stations.len(), 5);

    // Line-sequence edges are used for routing but not written back.
    let andheri = stations.iter().find(|s| s.id == "andheri").unwrap();
    assert!(andheri.adjacent_stations.is_empty());
}

#[tokio::test]
async fn stations_keep_dangling_adjacency() {
    let data = Dataset::default()
        .with_stations(vec![
            Station::new("a", "A", &["1"]).with_adjacent(&["b", "ghost"]),
            Station::new("b", "B", &["1"]),
        ])
        .with_network(vec![LineStop::new("a", "1"), LineStop::new("b", "1")]);
    let app = create_router(AppState::new(StaticStore::new(data), EntryConfig::default()));

    let (status, body) = get(app, "/api/stations").await;
    assert_eq!(status, StatusCode::OK);
    let stations: Vec<Station> = serde_json::from_slice(&body).unwrap();
    assert_eq!(stations[0].adjacent_stations, vec!["b", "ghost"]);
    assert!(stations[1].adjacent_stations.is_empty());
}

#[tokio::test]
async fn empty_store_lists_no_stations() {
    let app = create_router(AppState::new(StaticStore::default(), EntryConfig::default()));
    let (status, body) = get(app, "/api/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn station_route_returns_full_records() {
    let (status, route): (_, Vec<Station>) =
        get_json("/api/route?from=versova&to=gundavali").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<_> = route.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["versova", "dn_nagar", "andheri", "gundavali"]);
    assert_eq!(route[0].gates[0].name, "Gate 1");
}

#[tokio::test]
async fn station_route_errors() {
    let (status, error) = get_error("/api/route?from=versova").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.contains("Missing"));

    let (status, _) = get_error("/api/route?from=versova&to=island").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_error("/api/route?from=nowhere&to=versova").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn nearest_station_by_gate() {
    let (status, body): (_, serde_json::Value) =
        get_json("/api/nearest-station?lat=19.1205&lon=72.8469").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["station"]["station_id"], "andheri");
    assert_eq!(body["station"]["lines"], serde_json::json!(["Blue", "Red"]));
    assert_eq!(body["gate"]["name"], "West");
    assert!(body["distance_km"].as_f64().unwrap() < 0.05);
}

#[tokio::test]
async fn nearest_station_without_gates_has_null_gate() {
    let (status, body): (_, serde_json::Value) =
        get_json("/api/nearest-station?lat=19.1245&lon=72.8318").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["station"]["station_id"], "dn_nagar");
    assert!(body["gate"].is_null());
    assert_eq!(body["distance_km"], 0.0);
}

#[tokio::test]
async fn nearest_station_input_validation() {
    let (status, _) = get_error("/api/nearest-station?lat=19.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_error("/api/nearest-station?lat=north&lon=72.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_error("/api/nearest-station?lat=NaN&lon=72.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearest_station_with_no_located_stations() {
    let data = Dataset::default().with_stations(vec![Station::new("x", "X", &[])]);
    let app = create_router(AppState::new(StaticStore::new(data), EntryConfig::default()));

    let (status, body) = get(app, "/api/nearest-station?lat=19.1&lon=72.8").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "No stations with location data found.");
}

#[tokio::test]
async fn journey_between_coordinates() {
    let (status, body): (_, serde_json::Value) = get_json(
        "/api/journey?from_lat=19.1319&from_lon=72.8214&to_lat=19.1176&to_lon=72.8601",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["boarding"]["station_id"], "versova");
    assert_eq!(body["alighting"]["station_id"], "gundavali");
    assert_eq!(body["entry_gate"]["name"], "Gate 1");
    assert!(body["exit_gate"].is_null());
    assert_eq!(body["hop_count"], 3);
    assert_eq!(body["route"].as_array().unwrap().len(), 4);

    let texts: Vec<_> = body["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        texts,
        vec![
            "Ride the Blue line from Versova to Andheri (2 stops).",
            "Change from the Blue line to the Red line at Andheri.",
            "Ride the Red line from Andheri to Gundavali (1 stop).",
        ]
    );
    assert_eq!(body["steps"][1]["kind"], "interchange");
}

#[tokio::test]
async fn journey_within_one_station() {
    let (status, body): (_, JourneyResponse) = get_json(
        "/api/journey?from_lat=19.1318&from_lon=72.8215&to_lat=19.1319&to_lon=72.8216",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.boarding.id, "versova");
    assert_eq!(body.alighting.id, "versova");
    assert_eq!(body.route.len(), 1);
    assert!(body.steps.is_empty());
}

#[tokio::test]
async fn journey_input_validation() {
    let (status, error) = get_error("/api/journey?from_lat=19.1&from_lon=72.8&to_lat=19.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error.contains("to_lat"));
}

#[tokio::test]
async fn pois_filtered_by_station() {
    let (status, all): (_, Vec<Poi>) = get_json("/api/pois").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.len(), 2);

    let (_, filtered): (_, Vec<Poi>) = get_json("/api/pois?stationId=versova").await;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Juhu Beach");

    let (_, none): (_, Vec<Poi>) = get_json("/api/pois?stationId=andheri").await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn ar_route_instructions() {
    let (status, steps): (_, Vec<String>) =
        get_json("/api/ar-route?from=doc_gate&to=doc_platform").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        steps,
        vec![
            "Walk through the gate to the hall.",
            "Proceed to Platform 1 (30m).",
        ]
    );
}

#[tokio::test]
async fn ar_route_errors() {
    let (status, _) = get_error("/api/ar-route?from=doc_gate").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, error) = get_error("/api/ar-route?from=ghost&to=doc_platform").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error, "Starting waypoint not found.");

    let (status, _) = get_error("/api/ar-route?from=doc_orphan&to=doc_platform").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, error) = get_error("/api/ar-route?from=doc_gate&to=doc_stray").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error, "No AR route found.");

    // Destination in another station is outside the search.
    let (status, _) = get_error("/api/ar-route?from=doc_gate&to=doc_other").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ar_path_over_node_ids() {
    let (status, body): (_, ArPathResponse) =
        get_json("/api/ar-path?from=doc_gate&to=doc_platform").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.found);

    let docs: Vec<_> = body.path.iter().map(|n| n.doc_id.as_str()).collect();
    assert_eq!(docs, vec!["doc_gate", "doc_hall", "doc_platform"]);
    assert_eq!(body.path[0].kind, "gate");
    assert_eq!(body.path[2].x, 2.0);
}

#[tokio::test]
async fn ar_path_unreachable_is_not_found_flag() {
    let (status, body): (_, ArPathResponse) =
        get_json("/api/ar-path?from=doc_gate&to=doc_stray").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.found);
    assert!(body.path.is_empty());
}

#[tokio::test]
async fn ar_path_unresolvable_ids() {
    let (status, _) = get_error("/api/ar-path?from=doc_gate&to=doc_orphan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_error("/api/ar-path?from=ghost&to=doc_gate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn destinations_exclude_structural_nodes() {
    let (status, body): (_, Vec<Destination>) =
        get_json("/api/destinations?stationId=versova").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<_> = body.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Gate 1", "Platform 1", "Lost Property"]);
    assert_eq!(body[0].doc_id, "doc_gate");
    assert_eq!(body[0].kind, "gate");

    let (status, _) = get_error("/api/destinations").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Store whose every read fails.
struct FailingStore;

impl DocumentStore for FailingStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        Err(StoreError::Api {
            status: 503,
            message: "unavailable".into(),
        })
    }

    async fn line_stops(&self) -> Result<Vec<LineStop>, StoreError> {
        Ok(Vec::new())
    }

    async fn waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        Err(StoreError::NotConfigured("no waypoints".into()))
    }

    async fn pois(&self) -> Result<Vec<Poi>, StoreError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = create_router(AppState::new(FailingStore, EntryConfig::default()));

    for uri in [
        "/api/stations",
        "/api/route?from=a&to=b",
        "/api/nearest-station?lat=19.1&lon=72.8",
        "/api/ar-route?from=a&to=b",
        "/api/ar-path?from=a&to=b",
    ] {
        let (status, body) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(!error.error.is_empty());
    }
}

#[test]
fn nearest_response_shape() {
    let nearest = NearestStation {
        station: Station::new("s", "S", &["Blue"]).summary(),
        gate: None,
        distance_km: 1.5,
    };
    let json = serde_json::to_value(&nearest).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "station": {"station_id": "s", "name": "S", "lines": ["Blue"]},
            "gate": null,
            "distance_km": 1.5,
        })
    );
}
