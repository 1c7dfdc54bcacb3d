//! Pipeline steps, in execution order
//!
//! Each step takes what it needs explicitly; none reads process-wide state.

mod cleanup;
mod extract;
mod fetch;
mod install;
mod layout;
mod provision;
mod version;

pub use cleanup::clean_up;
pub use extract::{extract_archive, ExtractOutcome};
pub use fetch::fetch_template;
pub use install::install_dependencies;
pub use layout::{normalize_layout, LayoutOutcome};
pub use provision::provision_directory;
pub use version::resolve_version;

use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Fail unless the project directory is still present
async fn ensure_project_dir(ctx: &ProjectContext) -> Result<()> {
    match tokio::fs::metadata(ctx.project_dir()).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(Error::project_dir_missing(ctx.project_dir().as_str())),
    }
}
