pub mod build_execution;
pub mod color;
pub mod common;
pub mod config;
pub mod errors;
pub mod export;
pub mod figma;
pub mod primitive;
pub mod tokens;
