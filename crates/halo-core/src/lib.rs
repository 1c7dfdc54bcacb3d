//! # halo-core
//!
//! Core library for create-halo-app providing:
//! - Scaffold configuration types
//! - Layered configuration loading (embedded defaults, file, environment)

pub mod config;
pub mod error;
pub mod types;

pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use types::{ExtractionPolicy, ScaffoldConfig};
