//! Common numeric validation helpers.
//!
//! Every helper rejects NaN and infinities before checking bounds, and never
//! panics.

use std::fmt;

/// Error type for common validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonValidationError {
    /// Human-readable error message.
    pub message: String,
}

impl CommonValidationError {
    /// Creates a new validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommonValidationError {}

fn require_finite(name: &str, value: f64) -> Result<(), CommonValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CommonValidationError::new(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Validate that a value is in [0, 1] (the unit interval).
///
/// # Example
/// ```
/// use chiptone_spec::validation::common::validate_unit_interval;
///
/// assert!(validate_unit_interval("amplitude", 0.5).is_ok());
/// assert!(validate_unit_interval("amplitude", 1.5).is_err());
/// ```
pub fn validate_unit_interval(name: &str, value: f64) -> Result<(), CommonValidationError> {
    require_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(CommonValidationError::new(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is positive (> 0).
///
/// # Example
/// ```
/// use chiptone_spec::validation::common::validate_positive;
///
/// assert!(validate_positive("bpm", 120.0).is_ok());
/// assert!(validate_positive("bpm", 0.0).is_err());
/// assert!(validate_positive("bpm", f64::NAN).is_err());
/// ```
pub fn validate_positive(name: &str, value: f64) -> Result<(), CommonValidationError> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(CommonValidationError::new(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Validate that a value is within a specified range [min, max].
///
/// # Example
/// ```
/// use chiptone_spec::validation::common::validate_range;
///
/// assert!(validate_range("sample_rate", 22050.0, 8000.0, 192000.0).is_ok());
/// assert!(validate_range("sample_rate", 4000.0, 8000.0, 192000.0).is_err());
/// ```
pub fn validate_range(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), CommonValidationError> {
    require_finite(name, value)?;
    if value < min || value > max {
        return Err(CommonValidationError::new(format!(
            "{} must be in [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds() {
        assert!(validate_unit_interval("amplitude", 0.0).is_ok());
        assert!(validate_unit_interval("amplitude", 1.0).is_ok());
        let err = validate_unit_interval("amplitude", -0.1).unwrap_err();
        assert!(err.message.contains("[0, 1]"));
    }

    #[test]
    fn test_positive_rejects_non_finite() {
        let err = validate_positive("bpm", f64::INFINITY).unwrap_err();
        assert!(err.message.contains("finite"));
        let err = validate_positive("bpm", -3.0).unwrap_err();
        assert!(err.message.contains("positive"));
    }

    #[test]
    fn test_range_message() {
        let err = validate_range("sample_rate", 200000.0, 8000.0, 192000.0).unwrap_err();
        assert!(err.message.contains("sample_rate"));
        assert!(err.message.contains("[8000, 192000]"));
    }
}
