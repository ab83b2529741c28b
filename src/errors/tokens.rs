//! Token build error types
//!
//! ```rust
//! use design_tokens::errors::TokenError;
//!
//! let err = TokenError::CircularReference("color.a -> color.b -> color.a".to_string());
//! assert!(err.is_reference_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Token dictionary and output errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Source pattern is not a valid glob
    #[error("Invalid source pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Token source file is not valid JSON
    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        /// Offending source file
        path: PathBuf,
        /// Parser error
        source: serde_json::Error,
    },

    /// Token source file is valid JSON but not an object
    #[error("Token file {} must contain a JSON object", .0.display())]
    NotAnObject(PathBuf),

    /// Reference points at a token that does not exist
    #[error("Token '{token}' references unknown token '{reference}'")]
    UnknownReference {
        /// Token holding the reference
        token: String,
        /// Path that could not be found
        reference: String,
    },

    /// References form a cycle
    #[error("Circular reference: {0}")]
    CircularReference(String),

    /// Handlebars rendering failed
    #[error("Template rendering failed: {0}")]
    Template(String),

    /// Build configuration is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TokenError {
    /// True for errors raised while resolving `{a.b.c}` references
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            TokenError::UnknownReference { .. } | TokenError::CircularReference(_)
        )
    }
}

impl From<handlebars::RenderError> for TokenError {
    fn from(err: handlebars::RenderError) -> Self {
        TokenError::Template(err.to_string())
    }
}
