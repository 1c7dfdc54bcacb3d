//! Error types for halo-scaffold

use thiserror::Error;

/// Result type alias using halo-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// No project name given
    #[error("Missing project name. Usage: create-halo-app <project-name>")]
    MissingProjectName,

    /// Project name cannot be used as a directory name
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Target directory already exists
    #[error("Project directory already exists: {path}")]
    ProjectExists { path: String },

    /// Project directory vanished mid-run
    #[error("Project directory does not exist: {path}")]
    ProjectDirMissing { path: String },

    /// Package manager not on PATH
    #[error("Required command not found: {command}. Please ensure it is installed and in PATH")]
    CommandNotFound { command: String },

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Version query failed
    #[error("Failed to resolve latest version of {package}: {message}")]
    VersionQuery { package: String, message: String },

    /// Version string unusable
    #[error("Invalid template version '{version}'")]
    InvalidVersion { version: String },

    /// Project directory creation failed
    #[error("Failed to create project directory {path}: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Pack operation failed
    #[error("Failed to pack {package}: {message}")]
    Pack { package: String, message: String },

    /// Pack reported success but the archive is absent
    #[error("Template archive not found after packing: {path}")]
    ArchiveNotFound { path: String },

    /// Archive extraction failed
    #[error("Failed to extract {archive}: {message}")]
    Extract { archive: String, message: String },

    /// Staging folder absent after extraction
    #[error("Staging folder not found: {path}")]
    StagingMissing { path: String },

    /// Promoting staged entries failed
    #[error("Failed to move {path} into the project directory: {message}")]
    Layout { path: String, message: String },

    /// Removing temporary artifacts failed
    #[error("Failed to remove {path}: {source}")]
    Cleanup {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dependency install failed
    #[error("Dependency installation failed: {message}")]
    Install { message: String },

    /// Subprocess could not be started
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] halo_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>) -> Self {
        Self::ProjectExists { path: path.into() }
    }

    /// Create a project directory missing error
    pub fn project_dir_missing(path: impl Into<String>) -> Self {
        Self::ProjectDirMissing { path: path.into() }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a version query error
    pub fn version_query(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::VersionQuery {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }

    /// Create a directory creation error
    pub fn create_directory(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            source,
        }
    }

    /// Create a pack error
    pub fn pack(package: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pack {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Create an archive not found error
    pub fn archive_not_found(path: impl Into<String>) -> Self {
        Self::ArchiveNotFound { path: path.into() }
    }

    /// Create an extraction error
    pub fn extract(archive: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extract {
            archive: archive.into(),
            message: message.into(),
        }
    }

    /// Create a staging missing error
    pub fn staging_missing(path: impl Into<String>) -> Self {
        Self::StagingMissing { path: path.into() }
    }

    /// Create a layout error
    pub fn layout(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Layout {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a cleanup error
    pub fn cleanup(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Cleanup {
            path: path.into(),
            source,
        }
    }

    /// Create an install error
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Whether this error was raised before any filesystem mutation
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectName
                | Self::InvalidProjectName { .. }
                | Self::ProjectExists { .. }
                | Self::CommandNotFound { .. }
                | Self::InvalidPath { .. }
        )
    }
}
