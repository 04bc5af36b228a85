//! Configuration validation framework

use crate::{ConfigError, ConfigResult};

/// Trait for validating configuration values
pub trait Validate {
    /// Validate this configuration object
    ///
    /// # Errors
    /// Returns validation errors if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Validate a value is within a range
///
/// # Errors
/// Returns `ConfigError::OutOfRange` if value is outside the specified range
pub fn validate_range(value: u64, min: u64, max: u64, field_name: &str) -> ConfigResult<()> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field: field_name.to_string(),
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate a string is not empty
///
/// # Errors
/// Returns `ConfigError::MissingField` if the string is empty or whitespace-only
pub fn validate_non_empty(value: &str, field_name: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField {
            field: field_name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate a float is a fraction in `0.0..=1.0`
///
/// # Errors
/// Returns `ConfigError::InvalidFraction` outside that range (or for NaN)
pub fn validate_fraction(value: f64, field_name: &str) -> ConfigResult<()> {
    if value.is_nan() || !(0.0..=1.0).contains(&value) {
        Err(ConfigError::InvalidFraction {
            field: field_name.to_string(),
            value,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(validate_range(1, 1, 10, "f").is_ok());
        assert!(validate_range(10, 1, 10, "f").is_ok());
        assert!(validate_range(0, 1, 10, "f").is_err());
        assert!(validate_range(11, 1, 10, "f").is_err());
    }

    #[test]
    fn whitespace_only_strings_are_rejected() {
        assert!(validate_non_empty("cl100k_base", "encoding").is_ok());
        assert!(validate_non_empty("   ", "encoding").is_err());
    }

    #[test]
    fn fractions_outside_unit_interval_are_rejected() {
        assert!(validate_fraction(0.0, "f").is_ok());
        assert!(validate_fraction(1.0, "f").is_ok());
        assert!(validate_fraction(-0.1, "f").is_err());
        assert!(validate_fraction(1.5, "f").is_err());
        assert!(validate_fraction(f64::NAN, "f").is_err());
    }
}
