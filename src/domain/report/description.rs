//! Free-text malfunction description

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Description of a malfunction, trimmed and bounded to 10..=500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportDescription(String);

impl ReportDescription {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let normalized = text.trim();

        if normalized.is_empty() {
            return Err(DomainError::validation("Description cannot be empty"));
        }

        let len = normalized.chars().count();
        if len < MIN_DESCRIPTION_LEN {
            return Err(DomainError::validation(format!(
                "Description too short (min {} characters)",
                MIN_DESCRIPTION_LEN
            )));
        }
        if len > MAX_DESCRIPTION_LEN {
            return Err(DomainError::validation(format!(
                "Description too long (max {} characters)",
                MAX_DESCRIPTION_LEN
            )));
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ReportDescription {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReportDescription> for String {
    fn from(d: ReportDescription) -> Self {
        d.0
    }
}
