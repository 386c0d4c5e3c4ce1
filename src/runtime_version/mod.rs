use crate::sandbox::Sandbox;
use tracing::warn;

/// Marker for the base runtime line in `dotnet --list-runtimes` output,
/// e.g. `Microsoft.NETCore.App 8.0.11 [/usr/lib/sdk/dotnet8/shared/...]`.
const NETCORE_APP_MARKER: &str = "Microsoft.NETCore.App";

/// Patch suffix assumed when the installed runtime version cannot be
/// detected. Approximate: downloads built from it may 404.
const FALLBACK_SUFFIX: &str = "0.3";

/// Extract the installed runtime version from `dotnet --list-runtimes`
/// output: the second whitespace-separated token of the first line that
/// mentions the base runtime.
pub fn parse_runtime_version(output: &str) -> Option<String> {
    for line in output.lines() {
        if line.contains(NETCORE_APP_MARKER) {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                return Some(parts[1].to_string());
            }
        }
    }
    None
}

/// Version string to assume when detection fails.
pub fn fallback_version(dotnet_major: &str, configured: Option<&str>) -> String {
    match configured {
        Some(version) => version.to_string(),
        None => format!("{}.{}", dotnet_major, FALLBACK_SUFFIX),
    }
}

/// Detect the installed .NET runtime version (distinct from the SDK
/// version). Never fails: any detection problem falls back to an assumed
/// version, which later registry downloads may reject.
pub async fn detect(sandbox: &Sandbox, dotnet_major: &str, configured: Option<&str>) -> String {
    println!("Detecting .NET runtime version...");

    match sandbox.list_runtimes().await {
        Ok(output) => match parse_runtime_version(&output) {
            Some(version) => {
                println!("Detected .NET runtime version: {}", version);
                version
            }
            None => {
                let fallback = fallback_version(dotnet_major, configured);
                warn!("no {} line in runtime listing", NETCORE_APP_MARKER);
                println!("Failed to parse runtime version, using fallback: {}", fallback);
                fallback
            }
        },
        Err(e) => {
            let fallback = fallback_version(dotnet_major, configured);
            warn!(error = %e, "runtime listing failed");
            println!("Failed to detect version, using fallback: {}", fallback);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_version() {
        let output = "\
Microsoft.AspNetCore.App 8.0.11 [/usr/lib/sdk/dotnet8/shared/Microsoft.AspNetCore.App]
Microsoft.NETCore.App 8.0.11 [/usr/lib/sdk/dotnet8/shared/Microsoft.NETCore.App]";
        assert_eq!(parse_runtime_version(output), Some("8.0.11".to_string()));
    }

    #[test]
    fn test_parse_runtime_version_single_line() {
        let output = "Microsoft.NETCore.App 10.0.3 [/usr/lib/sdk/dotnet10/shared/Microsoft.NETCore.App]";
        assert_eq!(parse_runtime_version(output), Some("10.0.3".to_string()));
    }

    #[test]
    fn test_parse_runtime_version_no_match() {
        assert_eq!(parse_runtime_version("Microsoft.WindowsDesktop.App 8.0.11 [x]"), None);
        assert_eq!(parse_runtime_version(""), None);
    }

    #[test]
    fn test_parse_runtime_version_short_line_is_skipped() {
        let output = "Microsoft.NETCore.App\nMicrosoft.NETCore.App 8.0.2 [x]";
        assert_eq!(parse_runtime_version(output), Some("8.0.2".to_string()));
    }

    #[test]
    fn test_fallback_version_default() {
        assert_eq!(fallback_version("8", None), "8.0.3");
        assert_eq!(fallback_version("10", None), "10.0.3");
    }

    #[test]
    fn test_fallback_version_configured() {
        assert_eq!(fallback_version("8", Some("8.0.2")), "8.0.2");
    }
}
