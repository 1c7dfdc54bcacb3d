//! Layered configuration loader
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Explicit overrides file (`--config <FILE>`)
//! 3. Environment variables (HALO_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{
    ExtractionConfig, PackageManagerConfig, ProgressConfig, ScaffoldConfig, TemplateConfig,
};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "scaffold-defaults.yaml";

/// Sections present in an overrides file. Absent sections keep the lower layer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConfigOverlay {
    template: Option<TemplateConfig>,
    package_manager: Option<PackageManagerConfig>,
    progress: Option<ProgressConfig>,
    extraction: Option<ExtractionConfig>,
}

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Optional overrides file
    file: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader using embedded defaults and environment only
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader that also applies an overrides file
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Load scaffold configuration with layered precedence
    pub fn load(&self) -> Result<ScaffoldConfig> {
        let mut config = Self::load_embedded_defaults()?;

        if let Some(path) = &self.file {
            let overlay = Self::load_overlay_file(path)?;
            config = Self::merge(config, overlay);
        }

        config = Self::apply_env_overrides(config)?;
        config.validate()?;

        debug!(
            "Loaded configuration: template={} package-manager={}",
            config.template.package, config.package_manager.command
        );
        Ok(config)
    }

    /// Load the embedded defaults file
    fn load_embedded_defaults() -> Result<ScaffoldConfig> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                DEFAULTS_FILE, e
            ))
        })
    }

    /// Load an overrides file
    fn load_overlay_file(path: &Utf8Path) -> Result<ConfigOverlay> {
        if !path.exists() {
            return Err(Error::config_not_found(path.as_str()));
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ConfigOverlay::default());
        }

        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge an overlay onto a base config, section by section
    fn merge(mut base: ScaffoldConfig, overlay: ConfigOverlay) -> ScaffoldConfig {
        if let Some(template) = overlay.template {
            base.template = template;
        }
        if let Some(package_manager) = overlay.package_manager {
            base.package_manager = package_manager;
        }
        if let Some(progress) = overlay.progress {
            base.progress = progress;
        }
        if let Some(extraction) = overlay.extraction {
            base.extraction = extraction;
        }
        base
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: ScaffoldConfig) -> Result<ScaffoldConfig> {
        if let Ok(val) = env::var("HALO_TEMPLATE_PACKAGE") {
            config.template.package = val;
        }

        if let Ok(val) = env::var("HALO_STAGING_DIR") {
            config.template.staging_dir = val;
        }

        if let Ok(val) = env::var("HALO_PACKAGE_MANAGER") {
            config.package_manager.command = val;
        }

        if let Ok(val) = env::var("HALO_SPINNER_INTERVAL_MS") {
            config.progress.interval_ms = val.trim().parse().map_err(|_| {
                Error::invalid_config("HALO_SPINNER_INTERVAL_MS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("HALO_NO_PROGRESS") {
            config.progress.enabled = !parse_flag(&val);
        }

        if let Ok(val) = env::var("HALO_EXTRACTION_POLICY") {
            config.extraction.policy = val.parse()?;
        }

        Ok(config)
    }
}

/// Interpret an environment flag value
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractionPolicy;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 6] = [
        "HALO_TEMPLATE_PACKAGE",
        "HALO_STAGING_DIR",
        "HALO_PACKAGE_MANAGER",
        "HALO_SPINNER_INTERVAL_MS",
        "HALO_NO_PROGRESS",
        "HALO_EXTRACTION_POLICY",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    fn write_overlay(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("halo.yaml"))
            .expect("Invalid UTF-8 path");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_load_embedded_defaults() {
        clear_env();
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, ScaffoldConfig::default());
    }

    #[test]
    #[serial]
    fn test_overlay_replaces_only_given_sections() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_overlay(
            &temp,
            r#"
template:
  package: "@acme/web-kit"
package-manager:
  command: pnpm
  install-args: ["install", "--frozen-lockfile"]
"#,
        );

        let config = ConfigLoader::with_file(path).load().unwrap();
        assert_eq!(config.template.package, "@acme/web-kit");
        assert_eq!(config.template.staging_dir, "package");
        assert_eq!(config.package_manager.command, "pnpm");
        assert_eq!(
            config.package_manager.install_args,
            vec!["install", "--frozen-lockfile"]
        );
        assert_eq!(config.progress, ProgressConfig::default());
    }

    #[test]
    #[serial]
    fn test_empty_overlay_file_is_accepted() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_overlay(&temp, "\n");
        let config = ConfigLoader::with_file(path).load().unwrap();
        assert_eq!(config, ScaffoldConfig::default());
    }

    #[test]
    #[serial]
    fn test_missing_overlay_file() {
        clear_env();
        let err = ConfigLoader::with_file("/nonexistent/halo.yaml")
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_malformed_overlay_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_overlay(&temp, "progress: [not, a, map]\n");
        let err = ConfigLoader::with_file(path).load().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("HALO_TEMPLATE_PACKAGE", "template");
        env::set_var("HALO_PACKAGE_MANAGER", "yarn");
        env::set_var("HALO_SPINNER_INTERVAL_MS", "250");
        env::set_var("HALO_NO_PROGRESS", "1");
        env::set_var("HALO_EXTRACTION_POLICY", "fail");

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.template.package, "template");
        assert_eq!(config.package_manager.command, "yarn");
        assert_eq!(config.progress.interval_ms, 250);
        assert!(!config.progress.enabled);
        assert_eq!(config.extraction.policy, ExtractionPolicy::Fail);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_beats_overlay_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = write_overlay(&temp, "template:\n  package: from-file\n");
        env::set_var("HALO_TEMPLATE_PACKAGE", "from-env");

        let config = ConfigLoader::with_file(path).load().unwrap();
        assert_eq!(config.template.package, "from-env");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_interval() {
        clear_env();
        env::set_var("HALO_SPINNER_INTERVAL_MS", "fast");
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(err.to_string().contains("HALO_SPINNER_INTERVAL_MS"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_interval_fails_validation() {
        clear_env();
        env::set_var("HALO_SPINNER_INTERVAL_MS", "0");
        assert!(ConfigLoader::new().load().is_err());
        clear_env();
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
