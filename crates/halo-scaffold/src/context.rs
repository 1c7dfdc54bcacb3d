//! Per-run project context and template version

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

use crate::error::{Error, Result};

/// Everything a step needs to know about the project being scaffolded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: String,
    working_dir: Utf8PathBuf,
    project_dir: Utf8PathBuf,
}

impl ProjectContext {
    /// Build a context for `name` inside `working_dir`
    ///
    /// No validation happens here; see [`crate::preconditions::check_preconditions`].
    pub fn new(name: impl Into<String>, working_dir: impl Into<Utf8PathBuf>) -> Self {
        let name = name.into();
        let working_dir = working_dir.into();
        let project_dir = working_dir.join(&name);
        Self {
            name,
            working_dir,
            project_dir,
        }
    }

    /// Project name as given by the invoker
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the tool was started in; receives the template archive
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }

    /// Directory being created
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Folder the archive unpacks into
    pub fn staging_dir(&self, staging_name: &str) -> Utf8PathBuf {
        self.project_dir.join(staging_name)
    }

    /// Location of the packed archive for `package` at `version`
    pub fn archive_path(&self, package: &str, version: &TemplateVersion) -> Utf8PathBuf {
        self.working_dir.join(archive_file_name(package, version))
    }
}

/// A resolved template version: trimmed and non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateVersion(String);

impl TemplateVersion {
    /// Validate and wrap a raw version string
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(Error::invalid_version(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name `npm pack` gives the archive of `package` at `version`
///
/// A scope's leading `@` is dropped and `/` becomes `-`:
/// `@halo/starter-kit` at `2.3.1` packs to `halo-starter-kit-2.3.1.tgz`.
pub fn archive_file_name(package: &str, version: &TemplateVersion) -> String {
    let stem = package.strip_prefix('@').unwrap_or(package).replace('/', "-");
    format!("{}-{}.tgz", stem, version)
}
