//! Helpers shared by request DTO validation

use validator::{ValidationError, ValidationErrors};

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten field errors into human-readable messages.
///
/// Uses the explicit message when one is set, `field: code` otherwise.
/// Output is sorted so callers get stable results.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .collect();
    messages.sort();
    messages.dedup();

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }
    messages
}
