//! Figma REST API access.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod types;

pub use client::{FigmaClient, FigmaCredentials, ReqwestTransport, Transport};
