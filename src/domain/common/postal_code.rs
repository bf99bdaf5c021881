//! Berlin postal code value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// A Berlin postal code (10xxx - 14xxx).
///
/// Construction is the only validation point: an invalid string never
/// produces a `PostalCode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::validation("Postal code cannot be empty"));
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation("Postal code must be numeric only"));
        }
        if value.len() != 5 {
            return Err(DomainError::validation("Postal code must be exactly 5 digits"));
        }
        if !value.starts_with('1') {
            return Err(DomainError::validation(
                "Must be a Berlin postal code (starts with 1)",
            ));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes_round_trip() {
        for raw in ["10115", "10178", "12043", "13353", "14199"] {
            let code = PostalCode::new(raw).unwrap();
            assert_eq!(code.value(), raw);
        }
    }

    #[test]
    fn empty_is_rejected() {
        for raw in ["", "   "] {
            let err = PostalCode::new(raw).unwrap_err();
            assert!(err.to_string().contains("cannot be empty"));
        }
    }

    #[test]
    fn non_numeric_is_rejected() {
        for raw in ["ABCDE", "1017a", "10 78", "-1017"] {
            let err = PostalCode::new(raw).unwrap_err();
            assert!(err.to_string().contains("must be numeric only"), "{}", raw);
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        for raw in ["1017", "101789", "1"] {
            let err = PostalCode::new(raw).unwrap_err();
            assert!(err.to_string().contains("exactly 5 digits"), "{}", raw);
        }
    }

    #[test]
    fn non_berlin_is_rejected() {
        for raw in ["20095", "80331", "01067"] {
            let err = PostalCode::new(raw).unwrap_err();
            assert!(err.to_string().contains("Berlin"), "{}", raw);
        }
    }

    #[test]
    fn parses_from_str() {
        let code: PostalCode = "10178".parse().unwrap();
        assert_eq!(code.to_string(), "10178");
    }
}
