//! Cleanup Agent

use camino::Utf8Path;
use std::io::ErrorKind;
use tracing::{debug, info};

use super::ensure_project_dir;
use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Remove the staging folder and the template archive
///
/// Targets that are already gone are not errors.
pub async fn clean_up(
    ctx: &ProjectContext,
    staging_dir: &Utf8Path,
    archive: &Utf8Path,
) -> Result<()> {
    ensure_project_dir(ctx).await?;
    info!("Removing temporary files");

    match tokio::fs::remove_dir_all(staging_dir).await {
        Ok(()) => debug!("Removed {}", staging_dir),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::cleanup(staging_dir.as_str(), e)),
    }

    match tokio::fs::remove_file(archive).await {
        Ok(()) => debug!("Removed {}", archive),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(Error::cleanup(archive.as_str(), e)),
    }

    Ok(())
}
