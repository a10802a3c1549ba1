//! End-to-end pipeline scenarios

mod common;

use std::sync::Arc;

use binjip_core::config::MapSettings;
use binjip_core::error::BinjipError;
use binjip_core::filter::FilterSelection;
use binjip_core::photos::PhotoStore;
use binjip_map::pipeline::RenderOutcome;
use binjip_map::render::MapRenderer;
use binjip_map::{RenderPipeline, Upload};

fn pipeline() -> RenderPipeline {
    RenderPipeline::new(Arc::new(common::boundary()), MapSettings::default())
}

fn upload(rows: &[&str]) -> Upload {
    Upload {
        file_name: "buildings.csv".to_string(),
        bytes: common::csv(rows),
        ..Upload::default()
    }
}

#[test]
fn test_three_rows_two_districts() {
    let outcome = pipeline()
        .execute(&upload(&[
            "부산 중구 중앙대로 1,35.10,129.03,단독주택,84.5,중구,",
            "부산 중구 중앙대로 2,35.11,129.04,다가구,60,중구,",
            "부산 서구 구덕로 3,35.10,129.01,단독주택,45,서구,",
        ]))
        .unwrap();

    assert_eq!(outcome.summary.retained_rows, 3);
    assert_eq!(outcome.filtered_rows, 3);

    let aggregation = outcome.aggregation().unwrap();
    assert_eq!(aggregation.districts.len(), 2);
    assert_eq!(aggregation.total(), 3);

    let artifact = outcome.artifact().unwrap();
    assert_eq!(artifact.file_name, "map.html");
    assert_eq!(artifact.mime, "text/html; charset=utf-8");
    assert!(artifact.html().contains("leaflet.markercluster"));
    assert!(artifact.html().contains("26110"));
}

#[test]
fn test_non_numeric_latitude_renders_no_data() {
    let outcome = pipeline()
        .execute(&upload(&["부산 중구 중앙대로 1,abc,129.03,단독주택,84.5,중구,house1.jpg"]))
        .unwrap();

    assert_eq!(outcome.summary.total_rows, 1);
    assert_eq!(outcome.summary.retained_rows, 0);
    assert_eq!(outcome.summary.dropped_row_numbers, vec![2]);
    assert!(outcome.is_empty());
    assert!(matches!(outcome.result, RenderOutcome::Empty));
    assert!(outcome.artifact().is_none());
}

#[test]
fn test_photo_embedded_only_when_uploaded() {
    let records = binjip_core::loader::load_upload(
        "buildings.csv",
        &common::csv(&[
            "부산 중구 중앙대로 1,35.10,129.03,단독주택,84.5,중구,house1.jpg",
            "부산 중구 중앙대로 2,35.11,129.04,단독주택,60,중구,missing.jpg",
        ]),
    )
    .unwrap()
    .records;

    let photos: PhotoStore = [("house1.jpg", vec![0xffu8, 0xd8, 0xff, 0xe0])].into_iter().collect();
    let settings = MapSettings::default();
    let boundary = common::boundary();
    let aggregation = binjip_core::aggregate::aggregate(&records).unwrap();

    let map = MapRenderer::new(&settings, &boundary)
        .render(&records, &aggregation, &photos)
        .unwrap();

    let markers = &map.cluster("26110").unwrap().markers;
    assert_eq!(markers.len(), 2);
    assert!(markers[0].popup.contains("<img src=\"data:image/jpeg;base64,/9j/4A==\""));
    assert!(!markers[1].popup.contains("<img"));
}

#[test]
fn test_district_filter_keeps_every_housing_type() {
    let mut upload = upload(&[
        "a,35.10,129.03,단독주택,84.5,중구,",
        "b,35.11,129.04,다가구,60,중구,",
        "c,35.10,129.01,단독주택,45,서구,",
        "d,35.16,129.16,아파트,99,해운대구,",
    ]);
    upload.selection = FilterSelection::from_raw(["중구"], Vec::<String>::new());

    let outcome = pipeline().execute(&upload).unwrap();

    assert_eq!(outcome.filtered_rows, 2);
    let aggregation = outcome.aggregation().unwrap();
    assert_eq!(aggregation.districts.len(), 1);
    assert_eq!(aggregation.districts[0].code, "26110");
    // Options always describe the whole upload, not the filtered view
    assert_eq!(outcome.options.districts, vec!["중구", "서구", "해운대구"]);
}

#[test]
fn test_filters_matching_nothing_render_no_data() {
    let mut upload = upload(&["a,35.10,129.03,단독주택,84.5,중구,"]);
    upload.selection = FilterSelection::from_raw(["서구"], ["아파트"]);

    let outcome = pipeline().execute(&upload).unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.summary.retained_rows, 1);
}

#[test]
fn test_missing_columns_fail_the_upload() {
    let upload = Upload {
        file_name: "buildings.csv".to_string(),
        bytes: "주소명,위도,경도\na,35.1,129.0".as_bytes().to_vec(),
        ..Upload::default()
    };

    match pipeline().execute(&upload) {
        Err(BinjipError::MissingColumns { missing }) => {
            assert_eq!(missing, vec!["주택유형", "면적", "시군구", "사진 경로"]);
        }
        other => panic!("expected MissingColumns, got {:?}", other),
    }
}

#[test]
fn test_unmapped_district_aborts() {
    let outcome = pipeline().execute(&upload(&["a,35.10,129.03,단독주택,84.5,울릉군,"]));
    assert!(matches!(outcome, Err(BinjipError::UnknownDistrict { .. })));
}

#[test]
fn test_inline_and_download_bytes_are_identical() {
    let outcome = pipeline()
        .execute(&upload(&["a,35.10,129.03,단독주택,84.5,중구,"]))
        .unwrap();
    let artifact = outcome.artifact().unwrap().clone();

    let inline = artifact.html().to_string();
    let download = artifact.bytes().to_vec();
    assert_eq!(inline.as_bytes(), download.as_slice());
    assert_eq!(artifact.into_html().into_bytes(), download);
}
