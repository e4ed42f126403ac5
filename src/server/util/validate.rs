//! Input length checks shared by the param constructors.

use crate::server::error::AppError;

/// Trims `value` and checks its length in characters lies in `min..=max`.
///
/// # Returns
/// - `Ok(String)` - The trimmed value
/// - `Err(AppError::BadRequest)` - Too short or too long, naming `field`
pub fn trimmed_length(field: &str, value: &str, min: usize, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if length < min {
        return Err(AppError::BadRequest(if min == 1 {
            format!("{} must not be empty", field)
        } else {
            format!("{} must be at least {} characters", field, min)
        }));
    }

    if length > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional value; blank values become `None`.
///
/// # Returns
/// - `Ok(Option<String>)` - The trimmed value, if any
/// - `Err(AppError::BadRequest)` - Longer than `max` characters
pub fn optional_trimmed(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => trimmed_length(field, &value, 1, max).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_before_measuring() {
        assert_eq!(trimmed_length("term", "  word ", 1, 4).unwrap(), "word");
        assert!(trimmed_length("term", "   ", 1, 4).is_err());
        assert!(trimmed_length("term", "words", 1, 4).is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(trimmed_length("term", "café", 1, 4).is_ok());
    }

    #[test]
    fn blank_optional_is_none() {
        assert_eq!(optional_trimmed("example", Some("  ".to_string()), 10).unwrap(), None);
        assert_eq!(optional_trimmed("example", None, 10).unwrap(), None);
        assert_eq!(
            optional_trimmed("example", Some(" hi ".to_string()), 10).unwrap(),
            Some("hi".to_string())
        );
    }
}
