use futures_util::future::join_all;
use proto::{DownloadTotals, PackageInfo, PackageStats, Period};
use tracing::{debug, warn};

use crate::npm::RegistrySource;

/// Packages shown by the `packages` command unless configured otherwise.
pub const MY_PACKAGES: &[&str] = &[
    "image-auth",
    "url-validation-query",
    "react-video-capture",
    "frontend-stack-cli",
    "react-providers-tree",
    "react-performanalyzer",
    "sse-shared-worker-react-hook",
    "vite-plugin-react-splash",
];

/// Stats for a set of packages plus how many count requests actually succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub stats: Vec<PackageStats>,
    pub requested: usize,
    pub succeeded: usize,
}

impl StatsReport {
    /// True when requests were made and none of them came back.
    pub fn all_failed(&self) -> bool {
        self.requested > 0 && self.succeeded == 0
    }
}

async fn try_fetch_downloads(
    source: &dyn RegistrySource,
    package: &str,
    period: Period,
) -> Option<u64> {
    match source.downloads(package, period).await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Failed to fetch {period} downloads for {package}: {e}");
            None
        }
    }
}

/// Download count for one package and period; any failure counts as zero.
pub async fn fetch_package_downloads(
    source: &dyn RegistrySource,
    package: &str,
    period: Period,
) -> u64 {
    try_fetch_downloads(source, package, period)
        .await
        .unwrap_or(0)
}

/// Stats for one package and the number of its three requests that succeeded.
async fn fetch_package_stats_counted(
    source: &dyn RegistrySource,
    package: &str,
) -> (PackageStats, usize) {
    let (year, month, week) = tokio::join!(
        try_fetch_downloads(source, package, Period::LastYear),
        try_fetch_downloads(source, package, Period::LastMonth),
        try_fetch_downloads(source, package, Period::LastWeek),
    );
    let succeeded = [year, month, week].iter().filter(|c| c.is_some()).count();

    let stats = PackageStats {
        name: package.to_string(),
        downloads: year.unwrap_or(0),
        downloads_last_month: month.unwrap_or(0),
        downloads_last_week: week.unwrap_or(0),
    };
    (stats, succeeded)
}

/// Year, month, and week counts for one package, fetched concurrently.
pub async fn fetch_package_stats(source: &dyn RegistrySource, package: &str) -> PackageStats {
    fetch_package_stats_counted(source, package).await.0
}

/// Like [`fetch_all_packages_stats`], but also reports request outcomes so a
/// registry that answered with zeros can be told apart from one that is down.
pub async fn fetch_all_packages_report<S: AsRef<str>>(
    source: &dyn RegistrySource,
    packages: &[S],
) -> StatsReport {
    if packages.is_empty() {
        return StatsReport::default();
    }

    debug!(count = packages.len(), "Fetching package statistics");
    let results = join_all(
        packages
            .iter()
            .map(|package| fetch_package_stats_counted(source, package.as_ref())),
    )
    .await;

    let succeeded = results.iter().map(|(_, ok)| ok).sum::<usize>();
    StatsReport {
        stats: results.into_iter().map(|(stats, _)| stats).collect(),
        requested: packages.len() * 3,
        succeeded,
    }
}

/// Stats for every package, in input order. An empty list makes no requests.
pub async fn fetch_all_packages_stats<S: AsRef<str>>(
    source: &dyn RegistrySource,
    packages: &[S],
) -> Vec<PackageStats> {
    fetch_all_packages_report(source, packages).await.stats
}

/// Registry metadata for every package; `None` where the lookup failed.
pub async fn fetch_all_packages_info<S: AsRef<str>>(
    source: &dyn RegistrySource,
    packages: &[S],
) -> Vec<(String, Option<PackageInfo>)> {
    join_all(packages.iter().map(|package| async move {
        let name = package.as_ref();
        match source.package_info(name).await {
            Ok(info) => (name.to_string(), Some(info)),
            Err(e) => {
                warn!("Failed to fetch registry info for {name}: {e}");
                (name.to_string(), None)
            }
        }
    }))
    .await
}

/// Sums each period across all packages.
pub fn calculate_total_downloads(stats: &[PackageStats]) -> DownloadTotals {
    stats
        .iter()
        .fold(DownloadTotals::default(), |acc, pkg| DownloadTotals {
            total: acc.total + pkg.downloads,
            last_month: acc.last_month + pkg.downloads_last_month,
            last_week: acc.last_week + pkg.downloads_last_week,
        })
}

/// Formats `n` with comma thousands separators (`1234567` → `1,234,567`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use proto::NetworkError;

    use super::*;

    /// Counts calls; `flaky` fails its last-month count and its registry lookup.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RegistrySource for CountingSource {
        async fn downloads(&self, package: &str, period: Period) -> Result<u64, NetworkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if package == "flaky" && period == Period::LastMonth {
                return Err(NetworkError::Status {
                    status: 503,
                    url: format!("/downloads/point/{period}/{package}"),
                });
            }
            Ok(match period {
                Period::LastYear => 1200,
                Period::LastMonth => 100,
                Period::LastWeek => 25,
                Period::LastDay => 3,
            })
        }

        async fn package_info(&self, package: &str) -> Result<PackageInfo, NetworkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if package == "flaky" {
                return Err(NetworkError::Request("connection reset".to_string()));
            }
            Ok(PackageInfo {
                name: package.to_string(),
                version: "1.0.0".to_string(),
                description: "test".to_string(),
            })
        }
    }

    #[test]
    fn totals_sum_each_period() {
        let stats = vec![
            PackageStats {
                name: "a".to_string(),
                downloads: 10,
                downloads_last_month: 2,
                downloads_last_week: 1,
            },
            PackageStats {
                name: "b".to_string(),
                downloads: 5,
                downloads_last_month: 1,
                downloads_last_week: 0,
            },
        ];
        assert_eq!(
            calculate_total_downloads(&stats),
            DownloadTotals {
                total: 15,
                last_month: 3,
                last_week: 1,
            }
        );
        assert_eq!(calculate_total_downloads(&[]), DownloadTotals::default());
    }

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(123456), "123,456");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[tokio::test]
    async fn empty_package_list_makes_no_requests() {
        let source = CountingSource::default();
        let stats = fetch_all_packages_stats::<&str>(&source, &[]).await;
        assert!(stats.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn three_requests_per_package_in_input_order() {
        let source = CountingSource::default();
        let stats = fetch_all_packages_stats(&source, &["one", "two"]).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 6);
        assert_eq!(stats[0].name, "one");
        assert_eq!(stats[1].name, "two");
        assert_eq!(stats[1].downloads, 1200);
        assert_eq!(stats[1].downloads_last_month, 100);
        assert_eq!(stats[1].downloads_last_week, 25);
    }

    #[tokio::test]
    async fn failed_count_degrades_to_zero_only_for_that_period() {
        let source = CountingSource::default();
        let stats = fetch_package_stats(&source, "flaky").await;
        assert_eq!(stats.downloads, 1200);
        assert_eq!(stats.downloads_last_month, 0);
        assert_eq!(stats.downloads_last_week, 25);
    }

    #[tokio::test]
    async fn report_counts_successful_requests() {
        let source = CountingSource::default();
        let report = fetch_all_packages_report(&source, &["one", "flaky"]).await;
        assert_eq!(report.requested, 6);
        assert_eq!(report.succeeded, 5);
        assert!(!report.all_failed());
        assert_eq!(report.stats[1].downloads_last_month, 0);

        let empty = fetch_all_packages_report::<&str>(&source, &[]).await;
        assert_eq!(empty, StatsReport::default());
        assert!(!empty.all_failed());
    }

    #[tokio::test]
    async fn info_failures_are_reported_per_package() {
        let source = CountingSource::default();
        let infos = fetch_all_packages_info(&source, &["ok", "flaky"]).await;
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].1.as_ref().map(|i| i.version.as_str()), Some("1.0.0"));
        assert_eq!(infos[1].0, "flaky");
        assert!(infos[1].1.is_none());
    }
}
