//! Scaffold command

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use halo_core::ConfigLoader;
use halo_scaffold::{NpmSource, PackageSource, ScaffoldOptions, ScaffoldReport, Scaffolder};
use tracing::debug;

use crate::cli::Cli;
use crate::output;

pub async fn run(cli: Cli) -> Result<()> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_file(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load().context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let working_dir = current_dir()?;
    debug!("Working directory: {}", working_dir);

    let source = NpmSource::from_config(&config.package_manager);
    let options = ScaffoldOptions {
        pinned_version: cli.template_version.clone(),
        skip_install: cli.skip_install,
    };
    let scaffolder = Scaffolder::new(source, config).with_options(options);

    // Nothing is touched on disk until every precondition holds
    let ctx = scaffolder.prepare(cli.project_name.as_deref(), &working_dir)?;

    if !cli.quiet {
        output::header(&format!("Creating {}", ctx.name()));
        output::kv("Template", &scaffolder.config().template.package);
        output::kv("Location", ctx.project_dir().as_str());
        println!();
    }

    let report = scaffolder.run(&ctx).await?;

    if !cli.quiet {
        print_summary(&report, ctx.name(), scaffolder.source().name());
    }

    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("Failed to read current directory")?;
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|p| anyhow::anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}

fn print_summary(report: &ScaffoldReport, name: &str, package_manager: &str) {
    println!();
    if let Some(err) = &report.extraction_error {
        output::warning(&format!("Archive extraction reported an error: {}", err));
    }

    output::success(&format!(
        "Created {} from starter kit {}",
        report.project_dir, report.version
    ));

    output::header("Next steps");
    let mut steps = vec![format!("cd {}", name)];
    if !report.installed {
        steps.push(format!("{} install", package_manager));
    }
    steps.push(format!("{} start", package_manager));
    for (n, step) in steps.iter().enumerate() {
        println!("  {}. {}", n + 1, step);
    }
}
