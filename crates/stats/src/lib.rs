//! npm download statistics: registry client, concurrent fan-out, and totals.

pub mod aggregate;
pub mod npm;

/// Fan-out helpers, totals, and number formatting.
pub use aggregate::{
    MY_PACKAGES, StatsReport, calculate_total_downloads, fetch_all_packages_info,
    fetch_all_packages_report, fetch_all_packages_stats, fetch_package_downloads,
    fetch_package_stats, format_number,
};
/// Registry seam and its reqwest implementation.
pub use npm::{DEFAULT_DOWNLOADS_URL, DEFAULT_REGISTRY_URL, NpmClient, RegistrySource};
