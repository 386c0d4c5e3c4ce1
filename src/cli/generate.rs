use crate::core::GenResult;
use crate::nuget::{fetcher, NugetClient};
use crate::restore::{restore_tasks, RestoreRunner};
use crate::runtime_version;
use crate::sandbox::Sandbox;
use crate::sources::{manifest, scanner};
use std::path::PathBuf;
use tempfile::TempDir;

/// Everything the generate pipeline needs, collected from the CLI.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub projects: Vec<PathBuf>,
    pub runtimes: Vec<String>,
    pub freedesktop: String,
    pub dotnet_major: String,
    pub destdir: String,
    pub only_arches: Option<String>,
    pub fallback_version: Option<String>,
    pub dotnet_args: Vec<String>,
}

/// Restore, fetch, scan, emit.
///
/// The scratch directory lives in the current working directory so the
/// sandbox reaches it through `--filesystem=host`, and is removed on every
/// exit path when the guard drops.
pub async fn run(options: GenerateOptions) -> GenResult<()> {
    Sandbox::preflight()?;

    let sandbox = Sandbox::new(&options.freedesktop, &options.dotnet_major);
    let scratch = TempDir::with_prefix_in("nuget-restore-", std::env::current_dir()?)?;

    let tasks = restore_tasks(&options.projects, &options.runtimes);
    RestoreRunner::new(sandbox.clone(), None)
        .run_all(scratch.path(), tasks, &options.dotnet_args)
        .await?;

    let version = runtime_version::detect(
        &sandbox,
        &options.dotnet_major,
        options.fallback_version.as_deref(),
    )
    .await;

    let client = NugetClient::new();
    fetcher::ensure_runtime_packages(&client, scratch.path(), &options.runtimes, &version).await?;

    let records = scanner::scan_sources(
        scratch.path(),
        &options.destdir,
        options.only_arches.as_deref(),
    )?;
    let count = records.len();
    manifest::write_manifest(&options.output, records)?;

    println!("✓ Wrote {} sources to {}", count, options.output.display());
    Ok(())
}
