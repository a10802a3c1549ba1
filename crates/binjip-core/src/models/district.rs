//! Busan administrative district (시군구) codes.
//!
//! Maps each of the 16 district names to the five-digit code carried by the
//! boundary dataset's `sgg` property.

use serde::Serialize;

/// Label of the district selector entry that stands for every district.
pub const ALL_DISTRICTS_LABEL: &str = "부산시 전체";

/// A district name and its administrative code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct District {
    pub name: &'static str,
    pub code: &'static str,
}

/// The 16 districts of Busan, in code order.
pub const DISTRICTS: &[District] = &[
    District { name: "중구", code: "26110" },
    District { name: "서구", code: "26140" },
    District { name: "동구", code: "26170" },
    District { name: "영도구", code: "26200" },
    District { name: "부산진구", code: "26230" },
    District { name: "동래구", code: "26260" },
    District { name: "남구", code: "26290" },
    District { name: "북구", code: "26320" },
    District { name: "해운대구", code: "26350" },
    District { name: "사하구", code: "26380" },
    District { name: "금정구", code: "26410" },
    District { name: "강서구", code: "26440" },
    District { name: "연제구", code: "26470" },
    District { name: "수영구", code: "26500" },
    District { name: "사상구", code: "26530" },
    District { name: "기장군", code: "26710" },
];

/// Maps a district name to its administrative code.
///
/// Returns `None` for names outside the fixed table.
#[must_use]
pub fn district_code(name: &str) -> Option<&'static str> {
    DISTRICTS.iter().find(|d| d.name == name).map(|d| d.code)
}

/// Maps an administrative code back to the district name.
#[must_use]
pub fn district_name(code: &str) -> Option<&'static str> {
    DISTRICTS.iter().find(|d| d.code == code).map(|d| d.name)
}
