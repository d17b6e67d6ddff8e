//! Backing document store.
//!
//! Stations, line stops, waypoints and POIs are loaded fresh for every
//! request through [`DocumentStore`]. Three backends are provided: JSON
//! files in a data directory, a REST document service, and an in-memory
//! dataset injected at construction.

mod error;
mod file;
mod http;
mod memory;

use std::future::Future;

pub use error::StoreError;
pub use file::FileStore;
pub use http::{HttpStore, HttpStoreConfig};
pub use memory::{Dataset, StaticStore};

use crate::domain::{LineStop, Poi, Station, Waypoint};

/// Collection names shared by the file and HTTP backends.
pub(crate) mod collections {
    pub const STATIONS: &str = "stations";
    pub const NETWORK: &str = "network";
    pub const WAYPOINTS: &str = "waypoints";
    pub const POIS: &str = "pois";
}

/// Read-only access to the records the engine routes over.
///
/// Implementations are shared across request handlers, hence `Send + Sync`.
pub trait DocumentStore: Send + Sync + 'static {
    /// All stations.
    fn stations(&self) -> impl Future<Output = Result<Vec<Station>, StoreError>> + Send;

    /// Line-ordered stops used to derive adjacency. Empty when the store
    /// only carries explicit `adjacent_stations`.
    fn line_stops(&self) -> impl Future<Output = Result<Vec<LineStop>, StoreError>> + Send;

    /// All waypoints across every station.
    fn waypoints(&self) -> impl Future<Output = Result<Vec<Waypoint>, StoreError>> + Send;

    fn pois(&self) -> impl Future<Output = Result<Vec<Poi>, StoreError>> + Send;

    /// A single waypoint by document id.
    fn waypoint(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Waypoint>, StoreError>> + Send {
        async move {
            Ok(self
                .waypoints()
                .await?
                .into_iter()
                .find(|wp| wp.id == id))
        }
    }

    /// Waypoints belonging to one station.
    fn waypoints_in_station(
        &self,
        station_id: &str,
    ) -> impl Future<Output = Result<Vec<Waypoint>, StoreError>> + Send {
        async move {
            Ok(self
                .waypoints()
                .await?
                .into_iter()
                .filter(|wp| wp.station_id.as_deref() == Some(station_id))
                .collect())
        }
    }
}
