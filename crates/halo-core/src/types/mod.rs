//! Type definitions for create-halo-app configuration

mod scaffold_config;

pub use scaffold_config::{
    ExtractionConfig, ExtractionPolicy, PackageManagerConfig, ProgressConfig, ScaffoldConfig,
    TemplateConfig,
};
