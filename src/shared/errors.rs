use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Station {0} not found")]
    StationNotFound(String),

    #[error("Station {0} is already marked as defective")]
    StationAlreadyDefective(String),

    #[error("Station {0} is in use and cannot be restored")]
    StationInUse(String),

    #[error("Report {0} not found")]
    ReportNotFound(String),

    #[error("No report found with ticket ID {0}")]
    TicketNotFound(String),

    #[error("Report for ticket {0} is already resolved")]
    ReportAlreadyResolved(String),

    #[error("Cannot {action} a report in state {from}")]
    InvalidTransition { from: &'static str, action: &'static str },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error is an expected business outcome the caller
    /// should branch on, as opposed to bad input or a storage failure.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::StationNotFound(_)
                | Self::StationAlreadyDefective(_)
                | Self::StationInUse(_)
                | Self::ReportNotFound(_)
                | Self::TicketNotFound(_)
                | Self::ReportAlreadyResolved(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid seed station {id}: {reason}")]
    InvalidStation { id: String, reason: String },

    #[error("Duplicate seed station id: {0}")]
    DuplicateStation(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defective_message_is_matchable() {
        let err = DomainError::StationAlreadyDefective("STATION-001".into());
        assert!(err.to_string().contains("already marked as defective"));
        assert!(err.is_business_rule());
    }

    #[test]
    fn validation_is_not_a_business_rule() {
        assert!(!DomainError::validation("Postal code cannot be empty").is_business_rule());
        assert!(!DomainError::Storage("lock poisoned".into()).is_business_rule());
    }

    #[test]
    fn ticket_not_found_mentions_no_report() {
        let err = DomainError::TicketNotFound("abc".into());
        assert!(err.to_string().to_lowercase().contains("no report found"));
    }
}
