//! Dependency Installer

use halo_core::types::ProgressConfig;
use tracing::info;

use super::ensure_project_dir;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::progress::Spinner;
use crate::source::PackageSource;

const SPINNER_MESSAGE: &str = "Installing dependencies...";

/// Run the package manager's install in the project directory
///
/// The spinner starts before the install is issued and is stopped before
/// this returns, whatever the outcome.
pub async fn install_dependencies<S>(
    source: &S,
    ctx: &ProjectContext,
    progress: &ProgressConfig,
) -> Result<()>
where
    S: PackageSource + ?Sized,
{
    ensure_project_dir(ctx).await?;
    info!("Installing starter kit packages");

    let spinner = Spinner::start(SPINNER_MESSAGE, progress);
    let result = source.install(ctx.project_dir()).await;
    spinner.finish();

    result?;
    info!("Dependencies installed with {}", source.name());
    Ok(())
}
