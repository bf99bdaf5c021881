//! Operational station aggregate
//!
//! Contains the OperationalStation entity, its status state machine,
//! and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Coordinates, OperationalStation, StationStatus};
pub use repository::StationRepository;
