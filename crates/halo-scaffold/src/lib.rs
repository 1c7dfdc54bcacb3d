//! # halo-scaffold
//!
//! Project scaffolding pipeline for create-halo-app:
//! - Precondition checks on the project name and target directory
//! - Template version resolution, pack and extraction
//! - Promotion of the staged template into the project root
//! - Cleanup of temporary artifacts
//! - Dependency install with a progress spinner
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use halo_core::ScaffoldConfig;
//! use halo_scaffold::{NpmSource, Scaffolder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScaffoldConfig::default();
//! let source = NpmSource::from_config(&config.package_manager);
//! let scaffolder = Scaffolder::new(source, config);
//!
//! let report = scaffolder
//!     .scaffold(Some("myapp"), Utf8Path::new("/tmp/work"))
//!     .await?;
//! println!("Created {} from {}", report.project_dir, report.version);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod pipeline;
pub mod preconditions;
pub mod process;
pub mod progress;
pub mod source;
pub mod steps;

pub use context::{archive_file_name, ProjectContext, TemplateVersion};
pub use error::{Error, Result};
pub use pipeline::{ScaffoldOptions, ScaffoldReport, Scaffolder};
pub use preconditions::check_preconditions;
pub use source::{NpmSource, PackageSource};
