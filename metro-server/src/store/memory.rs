//! In-memory store over an injected dataset.

use std::sync::Arc;

use serde::Deserialize;

use super::{DocumentStore, StoreError};
use crate::domain::{LineStop, Poi, Station, Waypoint};

/// A complete set of records, loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub network: Vec<LineStop>,
    pub waypoints: Vec<Waypoint>,
    pub pois: Vec<Poi>,
}

impl Dataset {
    pub fn with_stations(mut self, stations: Vec<Station>) -> Self {
        self.stations = stations;
        self
    }

    pub fn with_network(mut self, network: Vec<LineStop>) -> Self {
        self.network = network;
        self
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_pois(mut self, pois: Vec<Poi>) -> Self {
        self.pois = pois;
        self
    }
}

/// Serves clones of a fixed [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct StaticStore {
    data: Arc<Dataset>,
}

impl StaticStore {
    pub fn new(data: Dataset) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }
}

impl DocumentStore for StaticStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        Ok(self.data.stations.clone())
    }

    async fn line_stops(&self) -> Result<Vec<LineStop>, StoreError> {
        Ok(self.data.network.clone())
    }

    async fn waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        Ok(self.data.waypoints.clone())
    }

    async fn pois(&self) -> Result<Vec<Poi>, StoreError> {
        Ok(self.data.pois.clone())
    }
}
