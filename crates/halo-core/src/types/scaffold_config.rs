//! Scaffold configuration types
//!
//! These types control which template is provisioned, which package manager
//! drives the external operations, how install progress is rendered and how
//! extraction failures are treated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Complete scaffold configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScaffoldConfig {
    /// Template package settings
    #[serde(default)]
    pub template: TemplateConfig,

    /// Package manager invocation settings
    #[serde(default)]
    pub package_manager: PackageManagerConfig,

    /// Install progress indicator settings
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Extraction failure policy
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl ScaffoldConfig {
    /// Check values that deserialize fine but cannot drive a run
    pub fn validate(&self) -> Result<()> {
        if self.template.package.trim().is_empty() {
            return Err(Error::invalid_config("template.package must not be empty"));
        }

        let staging = self.template.staging_dir.as_str();
        if staging.is_empty() || staging == "." || staging == ".." || staging.contains(['/', '\\'])
        {
            return Err(Error::invalid_config(format!(
                "template.staging-dir must be a single directory name, got '{}'",
                staging
            )));
        }

        if self.package_manager.command.trim().is_empty() {
            return Err(Error::invalid_config(
                "package-manager.command must not be empty",
            ));
        }

        if self.progress.interval_ms == 0 {
            return Err(Error::invalid_config(
                "progress.interval-ms must be greater than zero",
            ));
        }

        if self.progress.frames.is_empty() {
            return Err(Error::invalid_config(
                "progress.frames must contain at least one frame",
            ));
        }

        Ok(())
    }
}

/// Template package settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Package identifier passed to the package manager
    #[serde(default = "default_template_package")]
    pub package: String,

    /// Folder the archive unpacks into inside the project directory
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            package: default_template_package(),
            staging_dir: default_staging_dir(),
        }
    }
}

fn default_template_package() -> String {
    "@halo/starter-kit".to_string()
}
fn default_staging_dir() -> String {
    "package".to_string()
}

/// Package manager invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageManagerConfig {
    /// Binary to invoke (looked up on PATH)
    #[serde(default = "default_package_manager")]
    pub command: String,

    /// Arguments for the dependency install operation
    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            command: default_package_manager(),
            install_args: default_install_args(),
        }
    }
}

fn default_package_manager() -> String {
    "npm".to_string()
}
fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

/// Install progress indicator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProgressConfig {
    /// Draw the spinner at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Delay between frames in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Frames cycled through in order
    #[serde(default = "default_frames")]
    pub frames: Vec<String>,
}

impl ProgressConfig {
    /// Frame interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: default_interval_ms(),
            frames: default_frames(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    80
}
fn default_frames() -> Vec<String> {
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

/// Extraction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtractionConfig {
    /// What to do when unpacking the archive reports an error
    #[serde(default)]
    pub policy: ExtractionPolicy,
}

/// How extraction errors are treated
///
/// Extraction is the only step whose errors are tolerated by default; every
/// other step stops the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPolicy {
    /// Log the error and continue with the next step
    #[default]
    Tolerate,
    /// Stop the run
    Fail,
}

impl ExtractionPolicy {
    /// Whether an extraction error stops the run
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tolerate => write!(f, "tolerate"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for ExtractionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tolerate" => Ok(Self::Tolerate),
            "fail" => Ok(Self::Fail),
            other => Err(Error::invalid_config(format!(
                "unknown extraction policy '{}' (expected tolerate or fail)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.template.package, "@halo/starter-kit");
        assert_eq!(config.template.staging_dir, "package");
        assert_eq!(config.package_manager.command, "npm");
        assert_eq!(config.package_manager.install_args, vec!["install"]);
        assert_eq!(config.progress.frames.len(), 10);
        assert_eq!(config.progress.interval(), Duration::from_millis(80));
        assert_eq!(config.extraction.policy, ExtractionPolicy::Tolerate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_field_defaults() {
        let yaml = r#"
progress:
  interval-ms: 120
extraction:
  policy: fail
"#;
        let config: ScaffoldConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.progress.interval_ms, 120);
        assert!(config.progress.enabled);
        assert_eq!(config.progress.frames.len(), 10);
        assert!(config.extraction.policy.is_fatal());
        assert_eq!(config.template.package, "@halo/starter-kit");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = ScaffoldConfig::default();
        config.progress.interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_frames() {
        let mut config = ScaffoldConfig::default();
        config.progress.frames.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nested_staging_dir() {
        let mut config = ScaffoldConfig::default();
        config.template.staging_dir = "a/b".to_string();
        assert!(config.validate().is_err());

        config.template.staging_dir = "..".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_package() {
        let mut config = ScaffoldConfig::default();
        config.template.package = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extraction_policy_parse() {
        assert_eq!(
            "tolerate".parse::<ExtractionPolicy>().unwrap(),
            ExtractionPolicy::Tolerate
        );
        assert_eq!(
            " FAIL ".parse::<ExtractionPolicy>().unwrap(),
            ExtractionPolicy::Fail
        );
        assert!("ignore".parse::<ExtractionPolicy>().is_err());
        assert_eq!(ExtractionPolicy::Fail.to_string(), "fail");
    }
}
