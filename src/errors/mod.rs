//! Domain-specific error types for the design-tokens tool
//!
//! # Error Categories
//!
//! - **FigmaError**: Figma API access and primitive color generation
//! - **TokenError**: Token source loading, reference resolution and output rendering
//!
//! ```rust
//! use design_tokens::errors::{FigmaError, TokenError};
//!
//! let err = FigmaError::MissingEnv("FIGMA_FILE_KEY");
//! assert!(err.is_configuration_error());
//!
//! let err = TokenError::UnknownReference {
//!     token: "color.primary".to_string(),
//!     reference: "color.base.missing".to_string(),
//! };
//! assert!(err.is_reference_error());
//! ```

pub mod figma;
pub mod tokens;

pub use figma::FigmaError;
pub use tokens::TokenError;

/// Result type alias for Figma operations
pub type FigmaResult<T> = Result<T, FigmaError>;

/// Result type alias for token build operations
pub type TokenResult<T> = Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figma_result_alias() {
        let result: FigmaResult<()> = Err(FigmaError::MissingFill("Blue".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_result_alias() {
        let result: TokenResult<()> = Err(TokenError::Config("no platforms".to_string()));
        assert!(result.is_err());
    }
}
