//! Shared validation for bounded text fields.

use super::TaskDomainError;

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub(super) fn bounded_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyField(field));
    }
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(TaskDomainError::FieldTooLong { field, max, actual });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}
