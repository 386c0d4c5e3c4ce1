use clap::Parser;
use flatpak_dotnet_generator::cli::generate::{self, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flatpak-dotnet-generator")]
#[command(about = "Generate flatpak-builder NuGet sources for offline .NET builds")]
#[command(version)]
struct Cli {
    /// The output JSON sources file
    output: PathBuf,

    /// The project file(s) to restore
    #[arg(required = true)]
    project: Vec<PathBuf>,

    /// The target runtime(s) to restore packages for
    #[arg(short, long, num_args = 1..)]
    runtime: Vec<String>,

    /// The target version of the freedesktop sdk to use
    #[arg(short, long, default_value = "24.08")]
    freedesktop: String,

    /// The target major version of dotnet to use
    #[arg(short, long, default_value = "8")]
    dotnet: String,

    /// The directory the generated sources file will save sources to
    #[arg(long, default_value = "nuget-sources")]
    destdir: String,

    /// Limit the sources to this Flatpak arch
    #[arg(long)]
    only_arches: Option<String>,

    /// Runtime version to assume when detection fails (default: <dotnet>.0.3)
    #[arg(long)]
    fallback_version: Option<String>,

    /// Additional arguments to pass to the dotnet restore command
    #[arg(short = 'a', long, num_args = 1.., allow_hyphen_values = true)]
    dotnet_args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let options = GenerateOptions {
        output: cli.output,
        projects: cli.project,
        runtimes: cli.runtime,
        freedesktop: cli.freedesktop,
        dotnet_major: cli.dotnet,
        destdir: cli.destdir,
        only_arches: cli.only_arches,
        fallback_version: cli.fallback_version,
        dotnet_args: cli.dotnet_args,
    };

    match generate::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {}", e);
            ExitCode::FAILURE
        }
    }
}
