//! Photo store: uploaded image bytes keyed by file name

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{BinjipError, Result};

/// Uploaded photos for a single render pass
#[derive(Debug, Clone, Default)]
pub struct PhotoStore {
    photos: HashMap<String, Vec<u8>>,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a photo; a later photo with the same name replaces the earlier one
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        if self.photos.insert(name.clone(), bytes).is_some() {
            tracing::debug!(name = %name, "Replaced photo with duplicate name");
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.photos.get(name).map(Vec::as_slice)
    }

    /// Data URI for the named photo, `None` when nothing was uploaded under that name
    pub fn data_uri(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        self.get(name).map(|bytes| encode_data_uri(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Load every regular file in a directory (non-recursive), keyed by file name
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| BinjipError::FileAccess {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut store = Self::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let bytes = fs::read(&path).map_err(|e| BinjipError::FileAccess {
                path: path.clone(),
                source: e,
            })?;
            store.insert(name, bytes);
        }

        tracing::info!(dir = %dir.display(), photos = store.len(), "Loaded photo directory");
        Ok(store)
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<u8>)> for PhotoStore {
    fn from_iter<I: IntoIterator<Item = (N, Vec<u8>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, bytes) in iter {
            store.insert(name, bytes);
        }
        store
    }
}

/// MIME type for an image file name, defaulting to JPEG
pub fn mime_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Base64 data URI embedding the image bytes
pub fn encode_data_uri(name: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(name), STANDARD.encode(bytes))
}
