//! Error types for entity construction, simulation calls and persistence.
//!
//! Per-entity failures inside a frame are caught by the tick loop and logged;
//! only construction and persistence writes surface these to the host.

use std::fmt;

/// Top-level error enum for the simulation.
#[derive(Debug)]
pub enum SimError {
    /// A constructor or runtime call received an unusable numeric argument
    /// (non-finite, negative, or zero where a positive value is required).
    InvalidParameter {
        /// Name of the rejected parameter (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// The pickup factory was asked for a variant it does not know.
    UnknownPickupKind(String),

    /// Reading or writing a persisted record failed.
    Io(std::io::Error),

    /// A persisted record could not be serialized.
    Json(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter { name, value } => {
                write!(f, "invalid value for '{}': {}", name, value)
            }
            SimError::UnknownPickupKind(kind) => write!(f, "unknown pickup kind '{}'", kind),
            SimError::Io(e) => write!(f, "i/o error: {}", e),
            SimError::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

/// Reject non-finite values.
pub fn ensure_finite(name: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Reject non-finite or negative values.
pub fn ensure_non_negative(name: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Reject non-finite, zero or negative values.
pub fn ensure_positive(name: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(ensure_finite("x", -3.0).is_ok());
        assert!(ensure_finite("x", f32::NAN).is_err());
        assert!(ensure_non_negative("dt", 0.0).is_ok());
        assert!(ensure_non_negative("dt", -0.1).is_err());
        assert!(ensure_positive("size", 0.0).is_err());
        assert!(ensure_positive("size", f32::INFINITY).is_err());
    }

    #[test]
    fn test_display_names_parameter() {
        let err = SimError::InvalidParameter {
            name: "size",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "invalid value for 'size': -1");
        let err = SimError::UnknownPickupKind("gold".into());
        assert!(err.to_string().contains("gold"));
    }
}
