// Typed errors with thiserror. Surface meaningful messages to JS.
// Inert sliders and deferred layout are outcomes, not errors.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Host call failed: {0}")]
    Host(String),

    #[error("Degenerate geometry: {width}x{height}")]
    DegenerateGeometry { width: f64, height: f64 },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::InvalidConfig("missing field".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn geometry_error_reports_box() {
        let err = EngineError::DegenerateGeometry {
            width: 300.0,
            height: 0.0,
        };
        assert_eq!(err.to_string(), "Degenerate geometry: 300x0");
    }

    #[test]
    fn json_errors_convert() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
