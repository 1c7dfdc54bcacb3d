//! Package source collaborator
//!
//! The pipeline never talks to a registry itself. All three external
//! operations (version query, pack, install) go through [`PackageSource`],
//! with [`NpmSource`] as the production implementation.

use async_trait::async_trait;
use camino::Utf8Path;
use halo_core::types::PackageManagerConfig;
use tracing::debug;

use crate::context::TemplateVersion;
use crate::error::{Error, Result};
use crate::process::run_command;

/// External package source used by the pipeline
///
/// # Example
///
/// ```ignore
/// use camino::Utf8Path;
/// use halo_scaffold::{NpmSource, PackageSource};
///
/// let source = NpmSource::new("npm");
/// source.check_available()?;
/// let raw = source
///     .show_version("@halo/starter-kit", Utf8Path::new("/work"))
///     .await?;
/// ```
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Name of the underlying tool (e.g. "npm")
    fn name(&self) -> &str;

    /// Check that the underlying tool can be invoked
    fn check_available(&self) -> Result<()>;

    /// Query the published version of `package` from `cwd`
    ///
    /// `cwd` is the same directory the archive is packed in, so both see the
    /// same registry settings. Returns the raw answer; callers trim and
    /// validate it.
    async fn show_version(&self, package: &str, cwd: &Utf8Path) -> Result<String>;

    /// Materialize the archive of `package` at `version` inside `dest_dir`
    async fn pack(&self, package: &str, version: &TemplateVersion, dest_dir: &Utf8Path)
        -> Result<()>;

    /// Install the dependencies declared by the manifest in `project_dir`
    async fn install(&self, project_dir: &Utf8Path) -> Result<()>;
}

/// npm-compatible package manager CLI
#[derive(Debug, Clone)]
pub struct NpmSource {
    command: String,
    install_args: Vec<String>,
}

impl NpmSource {
    /// Create a source that invokes `command` with default install args
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            install_args: vec!["install".to_string()],
        }
    }

    /// Create a source from package manager configuration
    pub fn from_config(config: &PackageManagerConfig) -> Self {
        Self {
            command: config.command.clone(),
            install_args: config.install_args.clone(),
        }
    }

    /// Arguments passed for the install operation
    pub fn install_args(&self) -> &[String] {
        &self.install_args
    }
}

#[async_trait]
impl PackageSource for NpmSource {
    fn name(&self) -> &str {
        &self.command
    }

    fn check_available(&self) -> Result<()> {
        let path = which::which(&self.command)
            .map_err(|_| Error::command_not_found(&self.command))?;
        debug!("Using {} at {}", self.command, path.display());
        Ok(())
    }

    async fn show_version(&self, package: &str, cwd: &Utf8Path) -> Result<String> {
        let output = run_command(&self.command, &["show", package, "version"], cwd).await?;
        if !output.success() {
            return Err(Error::version_query(package, output.failure_message()));
        }
        Ok(output.stdout)
    }

    async fn pack(
        &self,
        package: &str,
        version: &TemplateVersion,
        dest_dir: &Utf8Path,
    ) -> Result<()> {
        let spec = format!("{}@{}", package, version);
        let output = run_command(&self.command, &["pack", &spec], dest_dir).await?;
        if !output.success() {
            return Err(Error::pack(package, output.failure_message()));
        }
        Ok(())
    }

    async fn install(&self, project_dir: &Utf8Path) -> Result<()> {
        let args: Vec<&str> = self.install_args.iter().map(String::as_str).collect();
        let output = run_command(&self.command, &args, project_dir).await?;
        if !output.success() {
            return Err(Error::install(output.failure_message()));
        }
        Ok(())
    }
}
