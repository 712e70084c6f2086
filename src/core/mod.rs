//! Core building blocks shared by every legend-release command
//!
//! - **config**: legend-release.toml parsing and validation
//! - **context**: project root + config, resolved once in main.rs
//! - **error**: categorised error type with contextual help messages

pub mod config;
pub mod context;
pub mod error;
