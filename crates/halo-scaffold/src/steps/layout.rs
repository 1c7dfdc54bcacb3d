//! Layout Normalizer

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use super::ensure_project_dir;
use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Result of promoting the staged entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOutcome {
    /// Where the (now empty) staging folder ended up
    pub staging_dir: Utf8PathBuf,
    /// Number of entries moved into the project directory
    pub moved: usize,
}

/// Move every entry of the staging folder up into the project directory
///
/// Hidden entries are moved too. Existing entries are never overwritten.
/// When the staging folder holds an entry with its own name, the folder is
/// parked under a hidden name first so that entry can take its place.
pub async fn normalize_layout(ctx: &ProjectContext, staging_name: &str) -> Result<LayoutOutcome> {
    ensure_project_dir(ctx).await?;

    let project_dir = ctx.project_dir();
    let mut staging_dir = ctx.staging_dir(staging_name);
    info!("Copying files to {}", project_dir);

    match tokio::fs::metadata(&staging_dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(Error::staging_missing(staging_dir.as_str())),
    }

    let entries = list_entries(&staging_dir).await?;

    if entries.iter().any(|name| name == staging_name) {
        let parked = parking_path(project_dir, staging_name, &entries).await;
        debug!("Parking {} at {}", staging_dir, parked);
        tokio::fs::rename(&staging_dir, &parked)
            .await
            .map_err(|e| Error::layout(staging_dir.as_str(), e.to_string()))?;
        staging_dir = parked;
    }

    let mut moved = 0;
    for name in &entries {
        let from = staging_dir.join(name);
        let to = project_dir.join(name);

        if tokio::fs::symlink_metadata(&to).await.is_ok() {
            return Err(Error::layout(
                from.as_str(),
                format!("{} already exists", to),
            ));
        }

        tokio::fs::rename(&from, &to)
            .await
            .map_err(|e| Error::layout(from.as_str(), e.to_string()))?;
        moved += 1;
    }

    debug!("Moved {} entries out of {}", moved, staging_dir);
    Ok(LayoutOutcome { staging_dir, moved })
}

/// Entry names of `dir`, sorted for a stable move order
async fn list_entries(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut reader = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::layout(dir.as_str(), e.to_string()))?;

    let mut names = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| Error::layout(dir.as_str(), e.to_string()))?
    {
        let name = entry
            .file_name()
            .into_string()
            .map_err(|raw| Error::invalid_path(raw.to_string_lossy()))?;
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// A free hidden name in the project directory for the staging folder
async fn parking_path(project_dir: &Utf8Path, staging_name: &str, entries: &[String]) -> Utf8PathBuf {
    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            format!(".{}-staging", staging_name)
        } else {
            format!(".{}-staging-{}", staging_name, attempt)
        };
        let path = project_dir.join(&candidate);
        let taken = entries.contains(&candidate)
            || tokio::fs::symlink_metadata(&path).await.is_ok();
        if !taken {
            return path;
        }
        attempt += 1;
    }
}
