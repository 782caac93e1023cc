//! npm registry seam and its reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use proto::{NetworkError, PackageInfo, Period};
use serde::Deserialize;
use tracing::debug;

/// Public download-counts API.
pub const DEFAULT_DOWNLOADS_URL: &str = "https://api.npmjs.org";
/// Public package metadata registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Source of per-package download counts and metadata.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Download count for `package` over `period`.
    async fn downloads(&self, package: &str, period: Period) -> Result<u64, NetworkError>;

    /// Latest version and description of `package`.
    async fn package_info(&self, package: &str) -> Result<PackageInfo, NetworkError>;
}

#[derive(Debug, Deserialize)]
struct PointResponse {
    #[serde(default)]
    downloads: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageDocument {
    name: Option<String>,
    #[serde(rename = "dist-tags")]
    dist_tags: Option<DistTags>,
    description: Option<String>,
}

/// HTTP client for the npm downloads API and registry.
pub struct NpmClient {
    client: reqwest::Client,
    downloads_url: String,
    registry_url: String,
}

impl NpmClient {
    /// Creates a client against the public npm endpoints.
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        Self::with_base_urls(DEFAULT_DOWNLOADS_URL, DEFAULT_REGISTRY_URL, timeout)
    }

    /// Creates a client against custom endpoints (mirrors, tests).
    pub fn with_base_urls(
        downloads_url: impl Into<String>,
        registry_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NetworkError::Request(format!("build client: {err}")))?;

        Ok(Self {
            client,
            downloads_url: downloads_url.into().trim_end_matches('/').to_string(),
            registry_url: registry_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| NetworkError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|err| NetworkError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RegistrySource for NpmClient {
    async fn downloads(&self, package: &str, period: Period) -> Result<u64, NetworkError> {
        let url = format!("{}/downloads/point/{period}/{package}", self.downloads_url);
        debug!(%url, "Fetching download count");
        let body: PointResponse = self.get_json(&url).await?;
        Ok(body.downloads.unwrap_or(0))
    }

    async fn package_info(&self, package: &str) -> Result<PackageInfo, NetworkError> {
        let url = format!("{}/{package}", self.registry_url);
        debug!(%url, "Fetching package document");
        let doc: PackageDocument = self.get_json(&url).await?;
        Ok(PackageInfo {
            name: doc.name.unwrap_or_else(|| package.to_string()),
            version: doc
                .dist_tags
                .and_then(|tags| tags.latest)
                .unwrap_or_else(|| "unknown".to_string()),
            description: doc
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_drop_trailing_slash() {
        let client = NpmClient::with_base_urls(
            "http://127.0.0.1:9/",
            "http://127.0.0.1:9//",
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(client.downloads_url, "http://127.0.0.1:9");
        assert_eq!(client.registry_url, "http://127.0.0.1:9");
    }

    #[test]
    fn point_response_tolerates_missing_downloads() {
        let body: PointResponse = serde_json::from_str(r#"{"error":"not found"}"#).expect("parse");
        assert_eq!(body.downloads, None);
    }

    #[test]
    fn package_document_reads_dist_tags() {
        let doc: PackageDocument = serde_json::from_str(
            r#"{"name":"image-auth","dist-tags":{"latest":"1.2.3"},"description":"d"}"#,
        )
        .expect("parse");
        assert_eq!(doc.dist_tags.and_then(|t| t.latest).as_deref(), Some("1.2.3"));
    }

    #[tokio::test]
    async fn unreachable_host_reports_request_error() {
        let client = NpmClient::with_base_urls(
            "http://127.0.0.1:9",
            "http://127.0.0.1:9",
            Duration::from_millis(500),
        )
        .expect("client");
        let err = client
            .downloads("image-auth", Period::LastWeek)
            .await
            .expect_err("port 9 should refuse");
        assert!(matches!(err, NetworkError::Request(_)));
    }
}
