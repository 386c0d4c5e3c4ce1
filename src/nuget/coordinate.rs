use crate::core::{GenError, GenResult};
use std::path::{Path, PathBuf};

/// Base URL of the NuGet v3 flat-container, which serves
/// `{id}/{version}/{id}.{version}.nupkg` and the `.sha512` companion file.
pub const NUGET_FLATCONTAINER: &str = "https://api.nuget.org/v3-flatcontainer";

/// A package identity as NuGet lays it out on disk and on the registry:
/// lowercase package id plus a concrete version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCoordinate {
    pub name: String,
    pub version: String,
}

impl PackageCoordinate {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            version: version.to_string(),
        }
    }

    pub fn nupkg_filename(&self) -> String {
        format!("{}.{}.nupkg", self.name, self.version)
    }

    pub fn sidecar_filename(&self) -> String {
        format!("{}.{}.nupkg.sha512", self.name, self.version)
    }

    /// Canonical download URL on nuget.org.
    pub fn download_url(&self) -> String {
        self.url_under(NUGET_FLATCONTAINER)
    }

    /// Artifact URL under an arbitrary flat-container root.
    pub fn url_under(&self, base: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            base,
            self.name,
            self.version,
            self.nupkg_filename()
        )
    }

    /// Sidecar URL under an arbitrary flat-container root.
    pub fn sidecar_url_under(&self, base: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            base,
            self.name,
            self.version,
            self.sidecar_filename()
        )
    }

    /// Directory this package occupies under a package cache root.
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        root.join(&self.name).join(&self.version)
    }

    /// Derive the coordinate from a sidecar path. The cache nests every
    /// package as `<name>/<version>/<name>.<version>.nupkg.sha512`, so the
    /// version is the parent directory's name and the package id is the
    /// grandparent's. Anything shallower is a layout error.
    pub fn from_sidecar_path(sidecar: &Path) -> GenResult<Self> {
        let version = sidecar
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str());
        let name = sidecar
            .parent()
            .and_then(|dir| dir.parent())
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str());

        match (name, version) {
            (Some(name), Some(version)) => Ok(Self::new(name, version)),
            _ => Err(GenError::Layout(sidecar.to_path_buf())),
        }
    }
}
