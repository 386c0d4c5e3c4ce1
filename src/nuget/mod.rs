pub mod client;
pub mod coordinate;
pub mod fetcher;

pub use client::NugetClient;
pub use coordinate::PackageCoordinate;
