use crate::core::GenResult;
use crate::sandbox::Sandbox;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tokio::task::JoinSet;
use tracing::warn;

/// One `dotnet restore` invocation: a project file restored for an
/// optional target runtime.
#[derive(Debug, Clone)]
pub struct RestoreTask {
    pub project: PathBuf,
    pub runtime: Option<String>,
}

impl RestoreTask {
    fn label(&self) -> String {
        match &self.runtime {
            Some(rid) => format!("{} ({})", self.project.display(), rid),
            None => self.project.display().to_string(),
        }
    }
}

/// Build the project × runtime cross product. An empty runtime list means
/// one restore per project with no runtime selector.
pub fn restore_tasks(projects: &[PathBuf], runtimes: &[String]) -> Vec<RestoreTask> {
    let mut tasks = Vec::new();
    for project in projects {
        if runtimes.is_empty() {
            tasks.push(RestoreTask {
                project: project.clone(),
                runtime: None,
            });
        } else {
            for runtime in runtimes {
                tasks.push(RestoreTask {
                    project: project.clone(),
                    runtime: Some(runtime.clone()),
                });
            }
        }
    }
    tasks
}

/// Runs restore tasks concurrently through the sandbox.
pub struct RestoreRunner {
    sandbox: Sandbox,
    max_concurrent: usize,
}

impl RestoreRunner {
    /// Create a runner; concurrency defaults to the available hardware
    /// parallelism.
    pub fn new(sandbox: Sandbox, max_concurrent: Option<usize>) -> Self {
        let default = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            sandbox,
            max_concurrent: max_concurrent.unwrap_or(default),
        }
    }

    /// Run every task to completion, all writing into `packages_dir`.
    ///
    /// Individual failures are reported and swallowed: a runtime that fails
    /// to restore simply contributes no artifacts to the later scan.
    pub async fn run_all(
        &self,
        packages_dir: &Path,
        tasks: Vec<RestoreTask>,
        extra_args: &[String],
    ) -> GenResult<()> {
        let mut join_set = JoinSet::new();

        for task in tasks {
            if join_set.len() >= self.max_concurrent {
                // Wait for one task to complete before adding another
                if let Some(Ok((task, outcome))) = join_set.join_next().await {
                    report(&task, outcome);
                }
            }

            let sandbox = self.sandbox.clone();
            let packages_dir = packages_dir.to_path_buf();
            let extra = extra_args.to_vec();
            join_set.spawn(async move {
                let outcome = sandbox
                    .run_restore(
                        &packages_dir,
                        &task.project,
                        task.runtime.as_deref(),
                        &extra,
                    )
                    .await;
                (task, outcome)
            });
        }

        // Wait for all remaining tasks
        while let Some(result) = join_set.join_next().await {
            if let Ok((task, outcome)) = result {
                report(&task, outcome);
            }
        }

        Ok(())
    }
}

fn report(task: &RestoreTask, outcome: GenResult<ExitStatus>) {
    match outcome {
        Ok(status) if status.success() => println!("  ✓ Restored {}", task.label()),
        Ok(status) => {
            warn!(task = %task.label(), %status, "restore exited with failure");
            println!("  ✗ Restore failed for {} ({})", task.label(), status);
        }
        Err(e) => {
            warn!(task = %task.label(), error = %e, "restore could not be started");
            println!("  ✗ Restore failed for {}: {}", task.label(), e);
        }
    }
}
