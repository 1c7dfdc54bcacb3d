//! Shared test utilities for halo-scaffold integration tests
//!
//! Provides a recording in-memory package source that builds real `.tgz`
//! archives so the pipeline runs end to end without a package manager.

#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use flate2::write::GzEncoder;
use flate2::Compression;
use halo_core::ScaffoldConfig;
use halo_scaffold::{archive_file_name, progress, Error, PackageSource, Result, TemplateVersion};
use indicatif::ProgressBar;
use std::fs::File;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Template package name used throughout the tests
pub const TEMPLATE: &str = "template";

/// Version the fake registry publishes by default
pub const LATEST: &str = "2.3.1";

/// Record of a call made to the fake source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ShowVersion {
        package: String,
        cwd: Utf8PathBuf,
    },
    Pack {
        package: String,
        version: String,
        dest_dir: Utf8PathBuf,
    },
    Install(Utf8PathBuf),
}

/// How the fake pack operation behaves
#[derive(Debug, Clone)]
pub enum PackBehavior {
    /// Write a valid archive with these (path, content) entries
    Archive(Vec<(String, String)>),
    /// Write garbage under the expected archive name
    Corrupt,
    /// Report success without writing anything
    Nothing,
    /// Report failure
    Fail(String),
}

#[derive(Debug)]
struct FakeState {
    available: bool,
    version: std::result::Result<String, String>,
    pack: PackBehavior,
    install: std::result::Result<(), String>,
    calls: Vec<Call>,
    spinner_during_install: Option<ProgressBar>,
}

/// Recording package source
#[derive(Debug, Clone)]
pub struct FakeSource {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSource {
    /// A source publishing `LATEST` whose archive holds a small template
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                available: true,
                version: Ok(format!("{}\n", LATEST)),
                pack: PackBehavior::Archive(default_template_files()),
                install: Ok(()),
                calls: Vec::new(),
                spinner_during_install: None,
            })),
        }
    }

    pub fn unavailable(self) -> Self {
        self.state.lock().unwrap().available = false;
        self
    }

    pub fn with_version_output(self, raw: &str) -> Self {
        self.state.lock().unwrap().version = Ok(raw.to_string());
        self
    }

    pub fn with_version_failure(self, message: &str) -> Self {
        self.state.lock().unwrap().version = Err(message.to_string());
        self
    }

    pub fn with_pack(self, behavior: PackBehavior) -> Self {
        self.state.lock().unwrap().pack = behavior;
        self
    }

    pub fn with_install_failure(self, message: &str) -> Self {
        self.state.lock().unwrap().install = Err(message.to_string());
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Spinner that was active while install ran
    pub fn spinner_during_install(&self) -> Option<ProgressBar> {
        self.state.lock().unwrap().spinner_during_install.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl PackageSource for FakeSource {
    fn name(&self) -> &str {
        "fake-npm"
    }

    fn check_available(&self) -> Result<()> {
        if self.state.lock().unwrap().available {
            Ok(())
        } else {
            Err(Error::command_not_found("fake-npm"))
        }
    }

    async fn show_version(&self, package: &str, cwd: &Utf8Path) -> Result<String> {
        self.record(Call::ShowVersion {
            package: package.to_string(),
            cwd: cwd.to_path_buf(),
        });
        let version = self.state.lock().unwrap().version.clone();
        version.map_err(|message| Error::version_query(package, message))
    }

    async fn pack(
        &self,
        package: &str,
        version: &TemplateVersion,
        dest_dir: &Utf8Path,
    ) -> Result<()> {
        self.record(Call::Pack {
            package: package.to_string(),
            version: version.to_string(),
            dest_dir: dest_dir.to_path_buf(),
        });

        let archive = dest_dir.join(archive_file_name(package, version));
        let behavior = self.state.lock().unwrap().pack.clone();
        match behavior {
            PackBehavior::Archive(files) => {
                write_template_archive(&archive, &files);
                Ok(())
            }
            PackBehavior::Corrupt => {
                std::fs::write(&archive, b"not a gzip stream").unwrap();
                Ok(())
            }
            PackBehavior::Nothing => Ok(()),
            PackBehavior::Fail(message) => Err(Error::pack(package, message)),
        }
    }

    async fn install(&self, project_dir: &Utf8Path) -> Result<()> {
        self.record(Call::Install(project_dir.to_path_buf()));
        let mut state = self.state.lock().unwrap();
        state.spinner_during_install = progress::active();
        state.install.clone().map_err(Error::install)
    }
}

/// Files of the default fake template, relative to the staging folder
pub fn default_template_files() -> Vec<(String, String)> {
    vec![
        (
            "package.json".to_string(),
            r#"{"name":"template","version":"2.3.1"}"#.to_string(),
        ),
        ("README.md".to_string(), "# Starter kit".to_string()),
        ("src/index.js".to_string(), "export {}".to_string()),
        (".eslintrc.json".to_string(), "{}".to_string()),
    ]
}

/// Write a gzip tarball laid out the way `npm pack` does (under `package/`)
pub fn write_template_archive(path: &Utf8Path, files: &[(String, String)]) {
    let file = File::create(path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("package/{}", name), content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Config pointing at the `template` package with the spinner hidden
pub fn test_config() -> ScaffoldConfig {
    let mut config = ScaffoldConfig::default();
    config.template.package = TEMPLATE.to_string();
    config.progress.enabled = false;
    config
}

/// Fresh working directory
pub fn working_dir() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("Invalid UTF-8 path");
    (temp, path)
}

/// Sorted relative paths of everything under `root`
pub fn snapshot(root: &Utf8Path) -> Vec<String> {
    fn walk(dir: &std::path::Path, root: &std::path::Path, out: &mut Vec<String>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            out.push(
                path.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/"),
            );
            if path.is_dir() {
                walk(&path, root, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(root.as_std_path(), root.as_std_path(), &mut out);
    out.sort();
    out
}
