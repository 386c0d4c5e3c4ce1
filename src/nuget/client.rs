use crate::core::GenResult;
use crate::nuget::coordinate::{PackageCoordinate, NUGET_FLATCONTAINER};
use reqwest::{Client, Response, StatusCode};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Thin client over the NuGet v3 flat-container endpoints.
pub struct NugetClient {
    client: Client,
    base_url: String,
}

impl Default for NugetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NugetClient {
    /// Client against the canonical nuget.org flat-container.
    pub fn new() -> Self {
        Self::with_base_url(NUGET_FLATCONTAINER)
    }

    /// Client against a different flat-container root (used by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Stream a package artifact to `dest`.
    pub async fn download_nupkg(
        &self,
        coordinate: &PackageCoordinate,
        dest: &Path,
    ) -> GenResult<()> {
        let url = coordinate.url_under(&self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        write_body(response, dest).await
    }

    /// Fetch the registry-published checksum sidecar. Returns `Ok(false)`
    /// when the registry has none (404), so the caller can compute the
    /// digest itself. Any other error status is an error.
    pub async fn download_sidecar(
        &self,
        coordinate: &PackageCoordinate,
        dest: &Path,
    ) -> GenResult<bool> {
        let url = coordinate.sidecar_url_under(&self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        write_body(response.error_for_status()?, dest).await?;
        Ok(true)
    }
}

async fn write_body(mut response: Response, dest: &Path) -> GenResult<()> {
    let mut file = File::create(dest).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
