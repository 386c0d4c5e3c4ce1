use crate::core::{GenError, GenResult};
use std::path::Path;
use std::process::ExitStatus;
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands inside the freedesktop SDK sandbox with the dotnet
/// extension mounted on PATH.
#[derive(Debug, Clone)]
pub struct Sandbox {
    freedesktop: String,
    dotnet_major: String,
}

impl Sandbox {
    pub fn new(freedesktop: &str, dotnet_major: &str) -> Self {
        Self {
            freedesktop: freedesktop.to_string(),
            dotnet_major: dotnet_major.to_string(),
        }
    }

    /// Fail early when flatpak is not installed, rather than once per
    /// restore task.
    pub fn preflight() -> GenResult<()> {
        which::which("flatpak")
            .map(|_| ())
            .map_err(|_| GenError::Sandbox("flatpak not found on PATH".to_string()))
    }

    fn runtime_ref(&self) -> String {
        format!("org.freedesktop.Sdk//{}", self.freedesktop)
    }

    fn extension_ref(&self) -> String {
        format!(
            "org.freedesktop.Sdk.Extension.dotnet{}//{}",
            self.dotnet_major, self.freedesktop
        )
    }

    /// Shell fragment that puts the dotnet extension on PATH before
    /// exec'ing `command`. Restore also needs the extension's shared
    /// libraries visible.
    fn shell_script(&self, command: &str, with_lib_path: bool) -> String {
        let path = format!(
            "PATH=\"${{PATH}}:/usr/lib/sdk/dotnet{}/bin\"",
            self.dotnet_major
        );
        if with_lib_path {
            format!(
                "{} LD_LIBRARY_PATH=\"$LD_LIBRARY_PATH:/usr/lib/sdk/dotnet{}/lib\" {}",
                path, self.dotnet_major, command
            )
        } else {
            format!("{} {}", path, command)
        }
    }

    /// `flatpak run` arguments for one `dotnet restore` invocation that
    /// writes downloaded packages into `packages_dir`.
    pub fn restore_args(
        &self,
        packages_dir: &Path,
        project: &Path,
        runtime: Option<&str>,
        extra: &[String],
    ) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--env=DOTNET_CLI_TELEMETRY_OPTOUT=true".to_string(),
            "--env=DOTNET_SKIP_FIRST_TIME_EXPERIENCE=true".to_string(),
            "--command=sh".to_string(),
            format!("--runtime={}", self.runtime_ref()),
            "--share=network".to_string(),
            "--filesystem=host".to_string(),
            self.extension_ref(),
            "-c".to_string(),
            self.shell_script("exec dotnet restore \"$@\"", true),
            "--".to_string(),
            "--packages".to_string(),
            packages_dir.display().to_string(),
            project.display().to_string(),
        ];

        if let Some(rid) = runtime {
            args.push("-r".to_string());
            args.push(rid.to_string());
        }

        args.extend(extra.iter().cloned());
        args
    }

    /// Run one restore to completion, inheriting stdout/stderr so the
    /// restore tool's own progress output reaches the user.
    pub async fn run_restore(
        &self,
        packages_dir: &Path,
        project: &Path,
        runtime: Option<&str>,
        extra: &[String],
    ) -> GenResult<ExitStatus> {
        let status = Command::new("flatpak")
            .args(self.restore_args(packages_dir, project, runtime, extra))
            .status()
            .await?;
        Ok(status)
    }

    /// `flatpak run` arguments for listing installed runtimes. No network
    /// or host filesystem access is needed just to query the extension.
    pub fn list_runtimes_args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            "--env=DOTNET_CLI_TELEMETRY_OPTOUT=true".to_string(),
            "--command=sh".to_string(),
            format!("--runtime={}", self.runtime_ref()),
            self.extension_ref(),
            "-c".to_string(),
            self.shell_script("exec dotnet --list-runtimes", false),
        ]
    }

    /// Run `dotnet --list-runtimes` in the sandbox and capture its output.
    pub async fn list_runtimes(&self) -> GenResult<String> {
        let output = Command::new("flatpak")
            .args(self.list_runtimes_args())
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(GenError::Sandbox(format!(
                "dotnet --list-runtimes exited with {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
