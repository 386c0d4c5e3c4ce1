use crate::checksum;
use crate::core::GenResult;
use crate::nuget::coordinate::PackageCoordinate;
use crate::sources::manifest::SourceRecord;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Suffix NuGet gives checksum sidecars next to each downloaded package.
const SIDECAR_SUFFIX: &str = ".nupkg.sha512";

/// Build one source record per checksum sidecar found under `packages_dir`.
///
/// The scan trusts the cache layout: a sidecar at
/// `<name>/<version>/<name>.<version>.nupkg.sha512` identifies its package,
/// and the download URL is rebuilt from that identity whether the artifact
/// came from `dotnet restore` or from the direct registry fetch. Artifacts
/// without a sidecar are invisible here.
pub fn scan_sources(
    packages_dir: &Path,
    destdir: &str,
    only_arches: Option<&str>,
) -> GenResult<Vec<SourceRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(packages_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !entry.file_name().to_string_lossy().ends_with(SIDECAR_SUFFIX) {
            continue;
        }

        let coordinate = PackageCoordinate::from_sidecar_path(entry.path())?;
        let contents = fs::read_to_string(entry.path())?;
        let sha512 = checksum::sidecar_to_hex(entry.path(), &contents)?;

        records.push(SourceRecord {
            source_type: "file".to_string(),
            url: coordinate.download_url(),
            sha512,
            dest: destdir.to_string(),
            dest_filename: coordinate.nupkg_filename(),
            only_arches: only_arches.map(|arch| vec![arch.to_string()]),
        });
    }

    Ok(records)
}
