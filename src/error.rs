//! Configuration errors
//!
//! Everything that can go wrong is caught when the world is built; stepping
//! and drawing never fail.

use thiserror::Error;

/// Rejected arena, stepper or settings configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A dimension, mass, speed or timestep that must be strictly positive.
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    /// A value that may be zero but not negative.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    /// The ball cannot fit between opposite walls.
    #[error("ball radius {radius} does not fit a {width}x{height} arena")]
    BallTooLarge { radius: f32, width: f32, height: f32 },
    /// Settings JSON could not be parsed.
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject NaN, infinities, zero and negatives.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Reject NaN, infinities and negatives.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_and_nan() {
        assert!(positive("width", 1.0).is_ok());
        assert!(matches!(
            positive("width", 0.0),
            Err(ConfigError::NonPositive { field: "width", .. })
        ));
        assert!(positive("width", f32::NAN).is_err());
        assert!(positive("width", f32::INFINITY).is_err());
    }

    #[test]
    fn test_non_negative_allows_zero() {
        assert!(non_negative("margin", 0.0).is_ok());
        assert!(non_negative("margin", -0.5).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NonPositive { field: "height", value: -2.0 };
        assert_eq!(err.to_string(), "height must be positive (got -2)");
    }
}
