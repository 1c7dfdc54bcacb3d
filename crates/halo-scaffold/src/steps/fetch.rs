//! Template Fetcher

use camino::Utf8PathBuf;
use tracing::{debug, info};

use super::ensure_project_dir;
use crate::context::{ProjectContext, TemplateVersion};
use crate::error::{Error, Result};
use crate::source::PackageSource;

/// Pack the template into the working directory and return the archive path
///
/// Resolves only once the archive is on disk under its expected name.
pub async fn fetch_template<S>(
    source: &S,
    ctx: &ProjectContext,
    package: &str,
    version: &TemplateVersion,
) -> Result<Utf8PathBuf>
where
    S: PackageSource + ?Sized,
{
    ensure_project_dir(ctx).await?;
    info!("Packing starter kit {}@{}", package, version);

    source.pack(package, version, ctx.working_dir()).await?;

    let archive = ctx.archive_path(package, version);
    if !tokio::fs::try_exists(&archive).await.unwrap_or(false) {
        return Err(Error::archive_not_found(archive.as_str()));
    }

    debug!("Archive ready at {}", archive);
    Ok(archive)
}
