use crate::checksum;
use crate::core::GenResult;
use crate::nuget::client::NugetClient;
use crate::nuget::coordinate::PackageCoordinate;
use std::path::Path;
use tracing::warn;

/// Shared-runtime and AOT-compiler packages that `dotnet restore` does not
/// reliably pull for every requested runtime, so they are fetched from the
/// registry directly.
const RUNTIME_PACKAGE_TEMPLATES: [&str; 3] = [
    "microsoft.netcore.app.runtime.{rid}",
    "microsoft.aspnetcore.app.runtime.{rid}",
    "microsoft.netcore.app.crossgen2.{rid}",
];

/// Expand the fixed template list for one runtime identifier.
pub fn runtime_package_coordinates(runtime: &str, version: &str) -> Vec<PackageCoordinate> {
    RUNTIME_PACKAGE_TEMPLATES
        .iter()
        .map(|template| PackageCoordinate::new(&template.replace("{rid}", runtime), version))
        .collect()
}

/// True when both the artifact and its sidecar are already on disk, in
/// which case the fetch step must not touch the network.
pub fn already_present(packages_dir: &Path, coordinate: &PackageCoordinate) -> bool {
    let dir = coordinate.dir_under(packages_dir);
    dir.join(coordinate.nupkg_filename()).exists()
        && dir.join(coordinate.sidecar_filename()).exists()
}

/// Ensure the fixed runtime-package set exists under `packages_dir` for
/// every requested runtime.
///
/// Failures are contained per package: a package that cannot be fetched is
/// reported and skipped, and will simply be absent from the manifest.
pub async fn ensure_runtime_packages(
    client: &NugetClient,
    packages_dir: &Path,
    runtimes: &[String],
    version: &str,
) -> GenResult<()> {
    if runtimes.is_empty() {
        return Ok(());
    }

    println!("Downloading runtime packages for specified runtimes...");

    for runtime in runtimes {
        for coordinate in runtime_package_coordinates(runtime, version) {
            if already_present(packages_dir, &coordinate) {
                println!(
                    "  ✓ {} {} already present",
                    coordinate.name, coordinate.version
                );
                continue;
            }

            if let Err(e) = fetch_package(client, packages_dir, &coordinate).await {
                warn!(package = %coordinate.name, error = %e, "runtime package fetch failed");
                println!(
                    "    ✗ Failed to download {}: {}",
                    coordinate.nupkg_filename(),
                    e
                );
            }
        }
    }

    Ok(())
}

/// Download one artifact plus its checksum sidecar, computing the digest
/// locally when the registry does not publish one.
async fn fetch_package(
    client: &NugetClient,
    packages_dir: &Path,
    coordinate: &PackageCoordinate,
) -> GenResult<()> {
    let dir = coordinate.dir_under(packages_dir);
    tokio::fs::create_dir_all(&dir).await?;

    let nupkg_path = dir.join(coordinate.nupkg_filename());
    let sidecar_path = dir.join(coordinate.sidecar_filename());

    println!("  Downloading {} {}...", coordinate.name, coordinate.version);
    client.download_nupkg(coordinate, &nupkg_path).await?;

    if !client.download_sidecar(coordinate, &sidecar_path).await? {
        // The registry publishes no .sha512 for some packages; hash the
        // artifact we just wrote, in the same base64 format.
        println!("    Computing SHA512 hash (file not provided by the registry)...");
        let digest = checksum::sha512_base64(&nupkg_path)?;
        tokio::fs::write(&sidecar_path, digest).await?;
    }

    println!("    ✓ Downloaded {}", coordinate.nupkg_filename());
    Ok(())
}
