//! Directory Provisioner

use std::io::ErrorKind;
use tracing::info;

use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Create the project directory
///
/// Non-recursive: the working directory must exist and the project directory
/// must not. A directory that appeared since the precondition check is
/// reported as a collision.
pub async fn provision_directory(ctx: &ProjectContext) -> Result<()> {
    let dir = ctx.project_dir();
    info!("Creating project directory {}", dir);

    match tokio::fs::create_dir(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(Error::project_exists(dir.as_str()))
        }
        Err(e) => Err(Error::create_directory(dir.as_str(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn context(temp: &TempDir, name: &str) -> ProjectContext {
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        ProjectContext::new(name, dir)
    }

    #[tokio::test]
    async fn test_creates_directory() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "myapp");

        provision_directory(&ctx).await.unwrap();
        assert!(ctx.project_dir().is_dir());
    }

    #[tokio::test]
    async fn test_existing_directory_is_collision() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "myapp");
        std::fs::create_dir(ctx.project_dir()).unwrap();

        let err = provision_directory(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::ProjectExists { .. }));
    }

    #[tokio::test]
    async fn test_missing_working_dir_fails() {
        let temp = TempDir::new().unwrap();
        let missing = Utf8PathBuf::from_path_buf(temp.path().join("gone")).unwrap();
        let ctx = ProjectContext::new("myapp", missing);

        let err = provision_directory(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::CreateDirectory { .. }));
    }
}
