use binjip_core::filter::FilterSelection;
use binjip_core::photos::PhotoStore;
use binjip_map::Upload;

use crate::error::ApiError;

/// Multipart render form: one spreadsheet, any number of photos, and the
/// district and housing type selections
#[derive(Debug, Default)]
pub struct RenderForm {
    pub spreadsheet: Option<(String, Vec<u8>)>,
    pub photos: Vec<(String, Vec<u8>)>,
    pub districts: Vec<String>,
    pub housing_types: Vec<String>,
}

impl RenderForm {
    pub fn into_upload(self) -> Result<Upload, ApiError> {
        let (file_name, bytes) = self.spreadsheet.ok_or_else(|| {
            ApiError::bad_request("No spreadsheet provided")
                .with_details("Expected a 'spreadsheet' field in the multipart form")
        })?;

        Ok(Upload {
            file_name,
            bytes,
            photos: self.photos.into_iter().collect::<PhotoStore>(),
            selection: FilterSelection::from_raw(self.districts, self.housing_types),
        })
    }
}
