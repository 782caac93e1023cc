use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use proto::{NetworkError, Period};
use stats::{NpmClient, RegistrySource, calculate_total_downloads, fetch_all_packages_stats};

async fn point(Path((period, package)): Path<(String, String)>) -> Response {
    match package.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "garbled" => (StatusCode::OK, "<html>oops</html>").into_response(),
        _ => {
            let downloads = match period.as_str() {
                "last-year" => 5000,
                "last-month" => 400,
                "last-week" => 90,
                _ => 0,
            };
            Json(serde_json::json!({
                "downloads": downloads,
                "package": package,
            }))
            .into_response()
        }
    }
}

async fn document(Path(package): Path<String>) -> Response {
    match package.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "bare" => Json(serde_json::json!({"name": "bare"})).into_response(),
        _ => Json(serde_json::json!({
            "name": package,
            "dist-tags": {"latest": "2.4.1"},
            "description": "A package",
        }))
        .into_response(),
    }
}

async fn spawn_registry() -> String {
    let app = Router::new()
        .route("/downloads/point/{period}/{package}", get(point))
        .route("/{package}", get(document));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve registry");
    });
    format!("http://{addr}")
}

fn client_for(base: &str) -> NpmClient {
    NpmClient::with_base_urls(base, base, Duration::from_secs(5)).expect("build client")
}

#[tokio::test]
async fn downloads_reads_count_from_point_endpoint() {
    let base = spawn_registry().await;
    let client = client_for(&base);

    let year = client
        .downloads("image-auth", Period::LastYear)
        .await
        .expect("year count");
    let week = client
        .downloads("image-auth", Period::LastWeek)
        .await
        .expect("week count");
    assert_eq!(year, 5000);
    assert_eq!(week, 90);
}

#[tokio::test]
async fn downloads_reports_status_and_decode_failures() {
    let base = spawn_registry().await;
    let client = client_for(&base);

    let err = client
        .downloads("missing", Period::LastMonth)
        .await
        .expect_err("404 should fail");
    assert!(matches!(err, NetworkError::Status { status: 404, .. }));

    let err = client
        .downloads("garbled", Period::LastMonth)
        .await
        .expect_err("html body should fail");
    assert!(matches!(err, NetworkError::Decode(_)));
}

#[tokio::test]
async fn fetch_all_degrades_failing_packages_to_zero() {
    let base = spawn_registry().await;
    let client = client_for(&base);

    let stats = fetch_all_packages_stats(&client, &["image-auth", "missing"]).await;
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].downloads, 5000);
    assert_eq!(stats[0].downloads_last_month, 400);
    assert_eq!(stats[1].name, "missing");
    assert_eq!(stats[1].downloads, 0);

    let totals = calculate_total_downloads(&stats);
    assert_eq!(totals.total, 5000);
    assert_eq!(totals.last_week, 90);
}

#[tokio::test]
async fn package_info_applies_fallbacks() {
    let base = spawn_registry().await;
    let client = client_for(&base);

    let info = client.package_info("image-auth").await.expect("info");
    assert_eq!(info.version, "2.4.1");
    assert_eq!(info.description, "A package");

    let bare = client.package_info("bare").await.expect("bare info");
    assert_eq!(bare.version, "unknown");
    assert_eq!(bare.description, "No description");

    assert!(client.package_info("missing").await.is_err());
}
