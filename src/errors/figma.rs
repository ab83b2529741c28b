//! Figma API error types
//!
//! Failures of primitive color generation. Missing configuration is raised
//! before any request is made.

use thiserror::Error;

/// Figma API and primitive color generation errors
#[derive(Error, Debug)]
pub enum FigmaError {
    /// Required environment variable is not set
    #[error("Set an environment variable: {0}")]
    MissingEnv(&'static str),

    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("Figma API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    Json(#[from] serde_json::Error),

    /// Style node has no fill paint to take a color from
    #[error("Style '{0}' has no fills")]
    MissingFill(String),

    /// Collation data for ordering style names could not be loaded
    #[error("Collation error: {0}")]
    Collation(String),

    /// Writing the token file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FigmaError {
    /// True when the run failed before any request was attempted
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, FigmaError::MissingEnv(_))
    }

    /// True for transport, status and decoding failures
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            FigmaError::Http(_) | FigmaError::Status { .. } | FigmaError::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_message_names_the_variable() {
        let err = FigmaError::MissingEnv("FIGMA_PERSONAL_ACCESS_TOKEN");
        assert_eq!(
            err.to_string(),
            "Set an environment variable: FIGMA_PERSONAL_ACCESS_TOKEN"
        );
        assert!(err.is_configuration_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn status_error_is_network_error() {
        let err = FigmaError::Status {
            status: 403,
            body: "Invalid token".to_string(),
        };
        assert!(err.is_network_error());
        assert_eq!(err.to_string(), "Figma API returned 403: Invalid token");
    }
}
