//! In-process tests of the dashboard router

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use binjip_api::{create_router, AppState};
use binjip_core::config::MapSettings;
use binjip_map::BoundaryDataset;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "sgg": "26110" },
            "geometry": { "type": "Polygon", "coordinates": [[[129.02, 35.09], [129.05, 35.09], [129.05, 35.12], [129.02, 35.12], [129.02, 35.09]]] }
        },
        {
            "type": "Feature",
            "properties": { "sgg": "26140" },
            "geometry": { "type": "Polygon", "coordinates": [[[128.99, 35.08], [129.02, 35.08], [129.02, 35.13], [128.99, 35.13], [128.99, 35.08]]] }
        }
    ]
}"#;

const MULTIPART_BOUNDARY: &str = "binjip-test-boundary";
const MAX_UPLOAD: usize = 8 * 1024 * 1024;

const VALID_ROWS: &str = "주소명,위도,경도,주택유형,면적,시군구,사진 경로
부산 중구 중앙대로 1,35.10,129.03,단독주택,84.5,중구,house1.jpg
부산 중구 중앙대로 2,35.11,129.04,다가구,60,중구,
부산 서구 구덕로 3,35.10,129.01,단독주택,45,서구,";

fn app() -> Router {
    let boundary = BoundaryDataset::from_geojson_str(BOUNDARY, "sgg").unwrap();
    create_router(Arc::new(AppState::loaded(boundary, MapSettings::default(), MAX_UPLOAD)))
}

fn degraded_app() -> Router {
    create_router(Arc::new(AppState::failed(
        "Server answered 404 Not Found",
        MapSettings::default(),
        MAX_UPLOAD,
    )))
}

enum Part<'a> {
    File(&'a str, &'a str, &'a [u8]),
    Text(&'a str, &'a str),
}

fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        match part {
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

fn post(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(multipart(parts)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "binjip-api");
}

#[tokio::test]
async fn test_dashboard_page() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = text(response).await;
    assert!(page.contains("부산광역시 빈집 분포도"));
    assert!(page.contains("부산시 전체"));
    assert!(page.contains("id=\"upload-form\""));
}

#[tokio::test]
async fn test_dashboard_reports_boundary_failure() {
    let page = text(degraded_app().oneshot(get("/")).await.unwrap()).await;

    assert!(page.contains("GeoJSON 파일을 불러오는 데 오류가 발생했습니다."));
    assert!(page.contains("Server answered 404 Not Found"));
    assert!(!page.contains("upload-form"));
    assert!(!page.contains("HTML 파일 다운로드"));
}

#[tokio::test]
async fn test_render_with_photo() {
    let photo = [0xffu8, 0xd8, 0xff, 0xe0];
    let request = post(
        "/api/v1/render",
        &[
            Part::File("spreadsheet", "buildings.csv", VALID_ROWS.as_bytes()),
            Part::File("photos", "house1.jpg", &photo),
        ],
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["status"], "rendered");
    assert_eq!(body["summary"]["retained_rows"], 3);
    assert_eq!(body["filtered_rows"], 3);
    assert_eq!(body["aggregates"].as_array().unwrap().len(), 2);
    assert_eq!(body["options"]["districts"][0], "부산시 전체");
    assert_eq!(body["file_name"], "map.html");

    let html = body["map_html"].as_str().unwrap();
    assert!(html.contains("L.markerClusterGroup"));
    assert!(html.contains("data:image/jpeg;base64,/9j/4A=="));
}

#[tokio::test]
async fn test_render_with_filters() {
    let request = post(
        "/api/v1/render",
        &[
            Part::File("spreadsheet", "buildings.csv", VALID_ROWS.as_bytes()),
            Part::Text("district", "중구"),
            Part::Text("housing_type", "단독주택"),
        ],
    );

    let body = json(app().oneshot(request).await.unwrap()).await;
    assert_eq!(body["filtered_rows"], 1);
    assert_eq!(body["aggregates"][0]["code"], "26110");
}

#[tokio::test]
async fn test_render_no_data() {
    let csv = "주소명,위도,경도,주택유형,면적,시군구,사진 경로\n부산 중구 중앙대로 1,abc,129.03,단독주택,84.5,중구,";
    let request = post("/api/v1/render", &[Part::File("spreadsheet", "buildings.csv", csv.as_bytes())]);

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert_eq!(body["status"], "empty");
    assert_eq!(body["message"], "선택한 조건에 대한 정보가 없습니다.");
    assert_eq!(body["summary"]["dropped_row_numbers"][0], 2);
    assert!(body.get("map_html").is_none());
}

#[tokio::test]
async fn test_render_missing_columns() {
    let csv = "주소명,위도,경도\n부산,35.1,129.0";
    let request = post("/api/v1/render", &[Part::File("spreadsheet", "buildings.csv", csv.as_bytes())]);

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json(response).await;
    assert!(body["details"].as_str().unwrap().contains("사진 경로"));
}

#[tokio::test]
async fn test_render_without_spreadsheet() {
    let request = post("/api/v1/render", &[Part::Text("district", "중구")]);
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_render_unsupported_format() {
    let request = post("/api/v1/render", &[Part::File("spreadsheet", "buildings.txt", b"hello")]);
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_degraded_server_refuses_render() {
    let request = post(
        "/api/v1/render",
        &[Part::File("spreadsheet", "buildings.csv", VALID_ROWS.as_bytes())],
    );
    let response = degraded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = json(response).await;
    assert_eq!(body["details"], "Server answered 404 Not Found");
}

#[tokio::test]
async fn test_export_matches_inline_document() {
    let parts = [Part::File("spreadsheet", "buildings.csv", VALID_ROWS.as_bytes())];

    let rendered = json(app().oneshot(post("/api/v1/render", &parts)).await.unwrap()).await;
    let response = app().oneshot(post("/api/v1/export", &parts)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"map.html\""
    );
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");

    let document = text(response).await;
    assert_eq!(document, rendered["map_html"].as_str().unwrap());
}

#[tokio::test]
async fn test_export_without_data() {
    let csv = "주소명,위도,경도,주택유형,면적,시군구,사진 경로\n부산,abc,129.03,단독주택,84.5,중구,";
    let request = post("/api/v1/export", &[Part::File("spreadsheet", "buildings.csv", csv.as_bytes())]);

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
