//! Error types for the checked integration front end.
//!
//! The adaptive integrators themselves never fail; they report a
//! non-finite integrand by returning NaN. These errors are produced by
//! [`integrate`](super::integrate) when it turns that sentinel, or an
//! unusable argument, into a `Result`.

use thiserror::Error;

/// Result type for integration operations.
pub type IntegrateResult<T> = Result<T, IntegrateError>;

/// Errors that can occur during numerical integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrateError {
    /// A bound is infinite or NaN.
    #[error("Invalid interval [{a}, {b}] in {context}: bounds must be finite")]
    InvalidInterval { a: f64, b: f64, context: String },

    /// Invalid parameter value.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// The integrand was not finite at a sampled point.
    #[error("{method}: integrand is not finite on {context}")]
    NonFiniteIntegrand { method: String, context: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IntegrateError::InvalidInterval {
            a: f64::NEG_INFINITY,
            b: 3.0,
            context: "integrate".to_string(),
        };
        assert!(err.to_string().contains("Invalid interval"));
        assert!(err.to_string().contains("-inf"));

        let err = IntegrateError::InvalidParameter {
            parameter: "tolerance".to_string(),
            message: "must not be NaN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'tolerance': must not be NaN"
        );

        let err = IntegrateError::NonFiniteIntegrand {
            method: "lobatto".to_string(),
            context: "[0, 1]".to_string(),
        };
        assert_eq!(err.to_string(), "lobatto: integrand is not finite on [0, 1]");
    }
}
