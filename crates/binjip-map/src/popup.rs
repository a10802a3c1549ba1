//! Marker popup and tooltip markup

use askama::Template;
use binjip_core::error::{BinjipError, Result};
use binjip_core::models::Record;
use binjip_core::photos::PhotoStore;

#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    address: &'a str,
    housing_type: &'a str,
    area: String,
    photo_ref: &'a str,
    image_src: Option<String>,
}

#[derive(Template)]
#[template(source = "주소명: {{ address }}", ext = "html")]
struct TooltipTemplate<'a> {
    address: &'a str,
}

/// Popup HTML for a record. The photo is inlined as a data URI when the
/// store holds a file under the record's photo reference.
pub fn popup_html(record: &Record, photos: &PhotoStore) -> Result<String> {
    PopupTemplate {
        address: &record.address,
        housing_type: &record.housing_type,
        area: record.area_label(),
        photo_ref: &record.photo_ref,
        image_src: photos.data_uri(&record.photo_ref),
    }
    .render()
    .map_err(|e| BinjipError::Template(e.to_string()))
}

/// Hover label for a record
pub fn tooltip_html(record: &Record) -> Result<String> {
    TooltipTemplate { address: &record.address }
        .render()
        .map_err(|e| BinjipError::Template(e.to_string()))
}
