//! Version Resolver

use camino::Utf8Path;
use tracing::{debug, info};

use crate::context::TemplateVersion;
use crate::error::{Error, Result};
use crate::source::PackageSource;

/// Ask the package source for the published version of `package`
///
/// The query runs in `cwd`, the working directory the archive is later
/// packed in. Single attempt; any failure stops the run before anything is created.
pub async fn resolve_version<S>(
    source: &S,
    package: &str,
    cwd: &Utf8Path,
) -> Result<TemplateVersion>
where
    S: PackageSource + ?Sized,
{
    info!("Retrieving latest starter kit version");
    let raw = source.show_version(package, cwd).await?;

    let version = TemplateVersion::parse(&raw).map_err(|_| {
        Error::version_query(
            package,
            format!("unusable version output '{}'", raw.trim()),
        )
    })?;

    debug!("Resolved {}@{}", package, version);
    Ok(version)
}
