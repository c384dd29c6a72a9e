//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: the recoverable conditions raised by the numerical core
//!   (window selection, line fit, parameter estimation, series validation).
//! - [`AppError`]: the binary boundary. Carries a process exit code and a
//!   human-readable message.

use thiserror::Error;

/// Conditions the core reports to its caller.
///
/// Every variant is recoverable: the caller can pick another window, fix the
/// input data, or change the test geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// The (clamped) window holds fewer than two observations.
    #[error(
        "Insufficient data: window [{}, {}) clamps to [{}, {}) on {len} points; a line needs at least 2",
        .requested.0, .requested.1, .clamped.0, .clamped.1
    )]
    InsufficientData {
        requested: (usize, usize),
        clamped: (usize, usize),
        len: usize,
    },

    /// All log10(time) values in the window are numerically identical.
    #[error("Singular fit: log10(time) has no spread over window [{start}, {end})")]
    SingularFit { start: usize, end: usize },

    /// The fitted slope is zero (or too close to zero) to derive T.
    #[error("Invalid fit: slope {slope:e} is too close to zero to derive transmissivity")]
    InvalidFit { slope: f64 },

    /// Raw observation data failed validation.
    #[error("Invalid observation series: {0}")]
    InvalidSeries(String),

    /// Pumping rate or observation distance is not a positive finite number.
    #[error("Invalid test geometry: {0}")]
    InvalidGeometry(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::InsufficientData { .. } | FitError::InvalidSeries(_) => 3,
            FitError::InvalidGeometry(_) => 2,
            FitError::SingularFit { .. } | FitError::InvalidFit { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let insufficient = FitError::InsufficientData {
            requested: (0, 1),
            clamped: (0, 1),
            len: 16,
        };
        assert_eq!(AppError::from(insufficient).exit_code(), 3);
        assert_eq!(AppError::from(FitError::SingularFit { start: 0, end: 2 }).exit_code(), 4);
        assert_eq!(AppError::from(FitError::InvalidFit { slope: 0.0 }).exit_code(), 4);
        assert_eq!(AppError::from(FitError::InvalidGeometry("r".into())).exit_code(), 2);
    }

    #[test]
    fn insufficient_data_message_names_the_window() {
        let err = FitError::InsufficientData {
            requested: (3, 4),
            clamped: (3, 4),
            len: 16,
        };
        let msg = err.to_string();
        assert!(msg.contains("[3, 4)"), "{msg}");
        assert!(msg.contains("16 points"), "{msg}");
    }
}
