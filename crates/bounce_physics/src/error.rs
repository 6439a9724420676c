//! Error types for the physics core
//!
//! Only parameter validation can fail. Numeric edge cases during stepping
//! (huge velocities, negative elapsed time) are accepted as-is.

use std::fmt;

/// Error type for physics operations
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A parameter was outside its accepted range
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human readable description of the accepted range
        expected: &'static str,
        /// The rejected value
        value: f64,
    },
}

impl PhysicsError {
    pub(crate) fn invalid(name: &'static str, expected: &'static str, value: impl Into<f64>) -> Self {
        PhysicsError::InvalidParameter {
            name,
            expected,
            value: value.into(),
        }
    }
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidParameter { name, expected, value } => {
                write!(f, "Invalid parameter `{}`: expected {}, got {}", name, expected, value)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}

/// Reject values that are not finite and strictly positive
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::invalid(name, "a finite value > 0", value))
    }
}

/// Reject values that are not finite or are negative
pub(crate) fn require_non_negative(name: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::invalid(name, "a finite value >= 0", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PhysicsError::invalid("mass", "a finite value > 0", -1.0f32);
        let msg = format!("{}", err);
        assert!(msg.contains("mass"));
        assert!(msg.contains("> 0"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("radius", 0.5), Ok(0.5));
        assert!(require_positive("radius", 0.0).is_err());
        assert!(require_positive("radius", -2.0).is_err());
        assert!(require_positive("radius", f32::NAN).is_err());
        assert!(require_positive("radius", f32::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("width", 0.0), Ok(0.0));
        assert_eq!(require_non_negative("width", 12.0), Ok(12.0));
        assert!(require_non_negative("width", -0.1).is_err());
        assert!(require_non_negative("width", f32::NAN).is_err());
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&PhysicsError::invalid("zoom", "a finite value > 0", 0.0f32));
    }

    #[test]
    fn test_debug_format() {
        let err = PhysicsError::invalid("num_samples", "at least 1", 0u32);
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidParameter"));
        assert!(debug.contains("num_samples"));
    }
}
