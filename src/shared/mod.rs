pub mod errors;
pub mod validations;

pub use errors::{AppError, ConfigError, DomainError};
pub use validations::*;
