//! Boundary dataset loading over HTTP and from disk

mod common;

use std::io::Write;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use binjip_core::config::MapSettings;
use binjip_core::error::BinjipError;
use binjip_map::BoundaryDataset;
use tempfile::NamedTempFile;

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_fetch_success() {
    let addr = serve(Router::new().route("/busan.geojson", get(|| async { common::BUSAN_BOUNDARY }))).await;

    let dataset = BoundaryDataset::fetch(&format!("http://{}/busan.geojson", addr), "sgg")
        .await
        .unwrap();

    assert_eq!(dataset.feature_count(), 3);
    assert_eq!(dataset.codes(), vec!["26110", "26140", "26350"]);
}

#[tokio::test]
async fn test_fetch_non_success_status_fails() {
    let addr = serve(Router::new().route(
        "/busan.geojson",
        get(|| async { (StatusCode::NOT_FOUND, "404: Not Found") }),
    ))
    .await;

    let url = format!("http://{}/busan.geojson", addr);
    match BoundaryDataset::fetch(&url, "sgg").await {
        Err(BinjipError::BoundaryFetch { url: failed, reason }) => {
            assert_eq!(failed, url);
            assert!(reason.contains("404"));
        }
        other => panic!("expected BoundaryFetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_unreachable_host_fails() {
    let result = BoundaryDataset::fetch("http://127.0.0.1:9/busan.geojson", "sgg").await;
    assert!(matches!(result, Err(BinjipError::BoundaryFetch { .. })));
}

#[tokio::test]
async fn test_settings_prefer_local_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", common::BUSAN_BOUNDARY).unwrap();

    let settings = MapSettings {
        boundary_url: "http://127.0.0.1:9/unused.geojson".to_string(),
        boundary_path: Some(file.path().to_path_buf()),
        ..MapSettings::default()
    };

    let dataset = BoundaryDataset::from_settings(&settings).await.unwrap();
    assert_eq!(dataset.feature_count(), 3);
}
