//! Token dictionary and platform transforms for the build pipeline.

pub mod dictionary;
pub mod transforms;

pub use dictionary::{Dictionary, Token};
pub use transforms::TransformedToken;
