//! Scaffold pipeline
//!
//! Runs the steps strictly in order, each one awaited before the next:
//!
//! 1. preconditions (synchronous, before any mutation)
//! 2. version resolution (skipped when a version is pinned)
//! 3. project directory creation
//! 4. template pack into the working directory
//! 5. archive extraction into the project directory
//! 6. promotion of the staging folder's entries
//! 7. removal of the staging folder and archive
//! 8. dependency install with a spinner
//!
//! Any error ends the run, except an extraction error under the default
//! `tolerate` policy. Nothing created before a failure is rolled back.

use camino::{Utf8Path, Utf8PathBuf};
use halo_core::ScaffoldConfig;
use tracing::{debug, info};

use crate::context::{ProjectContext, TemplateVersion};
use crate::error::Result;
use crate::preconditions::check_preconditions;
use crate::source::PackageSource;
use crate::steps;

/// Per-run switches on top of configuration
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Use this version instead of asking the package source
    pub pinned_version: Option<String>,
    /// Stop after cleanup
    pub skip_install: bool,
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// The created project
    pub project_dir: Utf8PathBuf,
    /// Template version that was provisioned
    pub version: TemplateVersion,
    /// Entries promoted out of the staging folder
    pub moved_entries: usize,
    /// Extraction error let through by the tolerate policy
    pub extraction_error: Option<String>,
    /// Whether dependencies were installed
    pub installed: bool,
}

/// Drives one provisioning run against a package source
pub struct Scaffolder<S: PackageSource> {
    source: S,
    config: ScaffoldConfig,
    options: ScaffoldOptions,
}

impl<S: PackageSource> Scaffolder<S> {
    /// Create a scaffolder with default options
    pub fn new(source: S, config: ScaffoldConfig) -> Self {
        Self {
            source,
            config,
            options: ScaffoldOptions::default(),
        }
    }

    /// Replace the per-run options
    pub fn with_options(mut self, options: ScaffoldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Check every precondition and build the run context
    ///
    /// Touches nothing on disk.
    pub fn prepare(&self, name: Option<&str>, working_dir: &Utf8Path) -> Result<ProjectContext> {
        let ctx = check_preconditions(name, working_dir)?;
        self.config.validate()?;
        if let Some(pinned) = &self.options.pinned_version {
            TemplateVersion::parse(pinned)?;
        }
        self.source.check_available()?;
        Ok(ctx)
    }

    /// Check preconditions, then run every step
    pub async fn scaffold(&self, name: Option<&str>, working_dir: &Utf8Path) -> Result<ScaffoldReport> {
        let ctx = self.prepare(name, working_dir)?;
        self.run(&ctx).await
    }

    /// Run every step for a context returned by [`Scaffolder::prepare`]
    pub async fn run(&self, ctx: &ProjectContext) -> Result<ScaffoldReport> {
        let package = self.config.template.package.as_str();
        let staging_name = self.config.template.staging_dir.as_str();

        let version = match &self.options.pinned_version {
            Some(pinned) => {
                let version = TemplateVersion::parse(pinned)?;
                info!("Using pinned starter kit version {}", version);
                version
            }
            None => steps::resolve_version(&self.source, package, ctx.working_dir()).await?,
        };

        steps::provision_directory(ctx).await?;

        let archive = steps::fetch_template(&self.source, ctx, package, &version).await?;

        let extraction =
            steps::extract_archive(ctx, &archive, self.config.extraction.policy).await?;

        let layout = steps::normalize_layout(ctx, staging_name).await?;

        steps::clean_up(ctx, &layout.staging_dir, &archive).await?;

        let installed = if self.options.skip_install {
            debug!("Skipping dependency installation");
            false
        } else {
            steps::install_dependencies(&self.source, ctx, &self.config.progress).await?;
            true
        };

        Ok(ScaffoldReport {
            project_dir: ctx.project_dir().to_path_buf(),
            version,
            moved_entries: layout.moved,
            extraction_error: extraction.tolerated_error().map(str::to_string),
            installed,
        })
    }
}
