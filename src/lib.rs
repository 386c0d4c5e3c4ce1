//! Flatpak sources generator for .NET projects.
//!
//! Restores a project's NuGet dependencies once inside the freedesktop SDK
//! sandbox (with network access), then records every downloaded package's
//! registry URL and SHA-512 checksum as a flatpak-builder sources manifest,
//! so the real build can fetch and verify them without touching the network.

pub use crate::core::{GenError, GenResult};

/// Shared error types.
pub mod core;

/// Command-line pipeline.
pub mod cli;

/// SHA-512 helpers shared by the fetcher and the scanner.
pub mod checksum;

/// NuGet registry coordinates, client, and runtime-package fetcher.
pub mod nuget;

/// Concurrent `dotnet restore` fan-out.
pub mod restore;

/// Installed .NET runtime version detection.
pub mod runtime_version;

/// Flatpak sandbox command construction.
pub mod sandbox;

/// Source records: package-cache scan and manifest emission.
pub mod sources;
