//! Shared fixtures for the integration tests
#![allow(dead_code)]

use binjip_map::BoundaryDataset;

pub const BUSAN_BOUNDARY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "sgg": "26110", "adm_nm": "부산광역시 중구 중앙동" },
            "geometry": { "type": "Polygon", "coordinates": [[[129.02, 35.09], [129.05, 35.09], [129.05, 35.12], [129.02, 35.12], [129.02, 35.09]]] }
        },
        {
            "type": "Feature",
            "properties": { "sgg": "26140", "adm_nm": "부산광역시 서구 동대신동" },
            "geometry": { "type": "Polygon", "coordinates": [[[128.99, 35.08], [129.02, 35.08], [129.02, 35.13], [128.99, 35.13], [128.99, 35.08]]] }
        },
        {
            "type": "Feature",
            "properties": { "sgg": "26350", "adm_nm": "부산광역시 해운대구 우동" },
            "geometry": { "type": "Polygon", "coordinates": [[[129.13, 35.15], [129.18, 35.15], [129.18, 35.19], [129.13, 35.19], [129.13, 35.15]]] }
        }
    ]
}"#;

pub const HEADER: &str = "주소명,위도,경도,주택유형,면적,시군구,사진 경로";

pub fn boundary() -> BoundaryDataset {
    BoundaryDataset::from_geojson_str(BUSAN_BOUNDARY, "sgg").unwrap()
}

pub fn csv(rows: &[&str]) -> Vec<u8> {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.into_bytes()
}
