//! Export sink: the rendered map as one self-contained HTML document

use askama::Template;
use binjip_core::error::{BinjipError, Result};

use crate::render::RenderedMap;

pub const EXPORT_FILE_NAME: &str = "map.html";
pub const EXPORT_MIME: &str = "text/html; charset=utf-8";
pub const MAP_TITLE: &str = "부산광역시 빈집 분포도";

#[derive(Template)]
#[template(path = "map.html")]
struct MapDocument<'a> {
    title: &'a str,
    payload: String,
}

/// Downloadable map document. The same bytes back the inline view and the download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    html: String,
}

impl ExportArtifact {
    pub fn from_map(map: &RenderedMap<'_>) -> Result<Self> {
        let html = MapDocument {
            title: MAP_TITLE,
            payload: script_safe(&map.to_json()?),
        }
        .render()
        .map_err(|e| BinjipError::Template(e.to_string()))?;

        tracing::debug!(bytes = html.len(), "Exported map document");

        Ok(Self {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            html,
        })
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// JSON that can sit inside a `<script>` element. `<` only occurs inside
/// JSON strings, where `<` is an equivalent escape.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}
