//! Core domain types for the metro navigator.
//!
//! These types are the typed boundary between the duck-typed records held
//! in the document store and the routing engine. Defaulting rules for
//! missing fields live here, so the engine never sees a partial record.

mod point;
mod poi;
mod station;
mod waypoint;

pub use point::{GeoPoint, IndoorPoint};
pub use poi::Poi;
pub use station::{Gate, LineStop, Station, StationSummary};
pub use waypoint::Waypoint;
