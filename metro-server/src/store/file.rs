//! Store backed by JSON files in a data directory.
//!
//! Each collection lives in `{data_dir}/{collection}.json` as a JSON array.
//! A missing file is an empty collection; a malformed one is an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::collections::{NETWORK, POIS, STATIONS, WAYPOINTS};
use super::{DocumentStore, StoreError};
use crate::domain::{LineStop, Poi, Station, Waypoint};

#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn load<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>, StoreError> {
        let path = self.data_dir.join(format!("{collection}.json"));

        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|e| StoreError::Json {
            collection,
            message: e.to_string(),
        })
    }
}

impl DocumentStore for FileStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        self.load(STATIONS).await
    }

    async fn line_stops(&self) -> Result<Vec<LineStop>, StoreError> {
        self.load(NETWORK).await
    }

    async fn waypoints(&self) -> Result<Vec<Waypoint>, StoreError> {
        self.load(WAYPOINTS).await
    }

    async fn pois(&self) -> Result<Vec<Poi>, StoreError> {
        self.load(POIS).await
    }
}
