//! Archive Extractor

use camino::Utf8Path;
use flate2::read::GzDecoder;
use halo_core::ExtractionPolicy;
use std::fs::File;
use tar::Archive;
use tracing::{info, warn};

use super::ensure_project_dir;
use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// What happened during extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The whole archive was unpacked
    Extracted,
    /// Unpacking failed and the policy let the run continue
    Tolerated(String),
}

impl ExtractOutcome {
    /// Message of the tolerated error, if any
    pub fn tolerated_error(&self) -> Option<&str> {
        match self {
            Self::Extracted => None,
            Self::Tolerated(message) => Some(message),
        }
    }
}

/// Unpack the gzip tarball at `archive` into the project directory
///
/// With [`ExtractionPolicy::Tolerate`] an unpack error is logged and
/// returned as [`ExtractOutcome::Tolerated`]; with
/// [`ExtractionPolicy::Fail`] it stops the run.
pub async fn extract_archive(
    ctx: &ProjectContext,
    archive: &Utf8Path,
    policy: ExtractionPolicy,
) -> Result<ExtractOutcome> {
    ensure_project_dir(ctx).await?;
    info!("Unzipping starter kit");

    match unpack(archive, ctx.project_dir()).await {
        Ok(()) => Ok(ExtractOutcome::Extracted),
        Err(e) if policy.is_fatal() => Err(e),
        Err(e) => {
            warn!("{} (continuing, extraction policy is {})", e, policy);
            Ok(ExtractOutcome::Tolerated(e.to_string()))
        }
    }
}

async fn unpack(archive: &Utf8Path, destination: &Utf8Path) -> Result<()> {
    let archive = archive.to_path_buf();
    let dest = destination.to_path_buf();
    let label = archive.to_string();

    tokio::task::spawn_blocking(move || {
        let file =
            File::open(&archive).map_err(|e| Error::extract(archive.as_str(), e.to_string()))?;
        let decoder = GzDecoder::new(file);
        let mut tar = Archive::new(decoder);

        tar.unpack(&dest)
            .map_err(|e| Error::extract(archive.as_str(), e.to_string()))
    })
    .await
    .map_err(|e| Error::extract(label, format!("extraction task failed: {}", e)))?
}
