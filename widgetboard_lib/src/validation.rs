//! Input validation for query parameters and catalog entries.

use crate::error::WidgetError;

pub const MAX_DISCRIMINATOR_LENGTH: usize = 200;
pub const MAX_ENDPOINT_LENGTH: usize = 100;

/// Validates a caller-supplied component value.
///
/// The value is returned unchanged when accepted: it is matched byte for
/// byte against the CSV, so nothing is trimmed or case-folded here. An empty
/// value is allowed and selects rows whose `component` is blank.
pub fn validate_discriminator(input: &str) -> Result<&str, WidgetError> {
    if input.len() > MAX_DISCRIMINATOR_LENGTH {
        return Err(WidgetError::InvalidInput(format!(
            "component type exceeds maximum length of {} bytes",
            MAX_DISCRIMINATOR_LENGTH
        )));
    }
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(WidgetError::InvalidInput(
            "component type contains control characters".to_string(),
        ));
    }
    Ok(input)
}

/// Validates a widget endpoint name: non-empty, `[A-Za-z0-9_-]` only.
pub fn validate_endpoint(input: &str) -> Result<(), WidgetError> {
    if input.is_empty() || input.len() > MAX_ENDPOINT_LENGTH {
        return Err(WidgetError::Catalog(format!(
            "endpoint '{}' must be 1-{} characters",
            input, MAX_ENDPOINT_LENGTH
        )));
    }
    if !input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(WidgetError::Catalog(format!(
            "endpoint '{}' may only contain letters, digits, '_' and '-'",
            input
        )));
    }
    Ok(())
}
