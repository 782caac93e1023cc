use serde::{Deserialize, Serialize};

/// Download-count window supported by the npm point endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    LastDay,
    LastWeek,
    LastMonth,
    LastYear,
}

impl Period {
    /// Path segment used by the registry API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastDay => "last-day",
            Self::LastWeek => "last-week",
            Self::LastMonth => "last-month",
            Self::LastYear => "last-year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download counts for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    pub name: String,
    /// Last-year downloads.
    pub downloads: u64,
    pub downloads_last_month: u64,
    pub downloads_last_week: u64,
}

/// Sums across all packages, per period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadTotals {
    pub total: u64,
    pub last_month: u64,
    pub last_week: u64,
}

/// Registry metadata for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_path_segments_match_registry() {
        assert_eq!(Period::LastYear.as_str(), "last-year");
        assert_eq!(Period::LastMonth.to_string(), "last-month");
        assert_eq!(Period::LastWeek.as_str(), "last-week");
        assert_eq!(Period::LastDay.as_str(), "last-day");
    }

    #[test]
    fn package_stats_use_camel_case_keys() {
        let stats = PackageStats {
            name: "image-auth".to_string(),
            downloads: 10,
            downloads_last_month: 2,
            downloads_last_week: 1,
        };
        let json = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(json["downloadsLastMonth"], 2);
        assert_eq!(json["downloadsLastWeek"], 1);
    }
}
