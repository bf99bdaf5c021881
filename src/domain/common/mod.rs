//! Shared kernel value objects
//!
//! Identifiers and validated primitives used by both the discovery
//! (stations) and reporting (malfunction reports) parts of the domain.

pub mod ids;
pub mod postal_code;
pub mod station_id;

pub use ids::{ReportId, TicketId};
pub use postal_code::PostalCode;
pub use station_id::StationId;
