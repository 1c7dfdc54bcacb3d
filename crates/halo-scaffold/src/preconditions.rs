//! Input checks that run before anything touches the filesystem

use camino::Utf8Path;
use tracing::debug;

use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Validate the project name and target directory
///
/// Runs before any asynchronous step is scheduled.
pub fn check_preconditions(name: Option<&str>, working_dir: &Utf8Path) -> Result<ProjectContext> {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(Error::MissingProjectName),
    };

    validate_project_name(name)?;

    let ctx = ProjectContext::new(name, working_dir);
    // symlink_metadata so a dangling link also counts as taken
    if ctx.project_dir().symlink_metadata().is_ok() {
        return Err(Error::project_exists(ctx.project_dir().as_str()));
    }

    debug!("Preconditions passed for {}", ctx.project_dir());
    Ok(ctx)
}

/// A project name must be a single, ordinary path component
fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_project_name(name, "name is blank"));
    }
    if name == "." || name == ".." {
        return Err(Error::invalid_project_name(
            name,
            "name must not be a relative directory reference",
        ));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::invalid_project_name(
            name,
            "name must not contain path separators",
        ));
    }
    if name.contains('\0') {
        return Err(Error::invalid_project_name(name, "name contains a NUL byte"));
    }
    Ok(())
}
