//! District boundary dataset
//!
//! The boundary layer and the choropleth both draw from one GeoJSON
//! `FeatureCollection` whose features carry the district code under a key
//! property (`sgg` for the Busan administrative-dong dataset).

use std::path::Path;

use binjip_core::config::MapSettings;
use binjip_core::error::{BinjipError, Result};
use geo::BoundingRect;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value;

/// Validated boundary features plus their combined bounding box
#[derive(Debug, Clone)]
pub struct BoundaryDataset {
    collection: FeatureCollection,
    key_property: String,

    /// `[min_lon, min_lat, max_lon, max_lat]`, `None` when no feature has geometry
    bounds: Option<[f64; 4]>,
}

impl BoundaryDataset {
    /// Parse GeoJSON text
    pub fn from_geojson_str(text: &str, key_property: &str) -> Result<Self> {
        let geojson: GeoJson = text.parse().map_err(|e| BinjipError::BoundaryInvalid {
            reason: format!("Not valid GeoJSON: {}", e),
        })?;

        match geojson {
            GeoJson::FeatureCollection(collection) => Self::from_collection(collection, key_property),
            _ => Err(BinjipError::BoundaryInvalid {
                reason: "GeoJSON must be a FeatureCollection".to_string(),
            }),
        }
    }

    /// Validate a feature collection and compute its bounds
    pub fn from_collection(collection: FeatureCollection, key_property: &str) -> Result<Self> {
        if collection.features.is_empty() {
            return Err(BinjipError::BoundaryInvalid {
                reason: "FeatureCollection contains no features".to_string(),
            });
        }

        for (idx, feature) in collection.features.iter().enumerate() {
            if feature_code(feature, key_property).is_none() {
                return Err(BinjipError::BoundaryInvalid {
                    reason: format!(
                        "Feature {} has no string or numeric '{}' property",
                        idx, key_property
                    ),
                });
            }
        }

        let bounds = combined_bounds(&collection)?;

        tracing::debug!(
            features = collection.features.len(),
            key_property,
            "Validated boundary dataset"
        );

        Ok(Self {
            collection,
            key_property: key_property.to_string(),
            bounds,
        })
    }

    /// Read a GeoJSON file from disk
    pub fn load_file(path: &Path, key_property: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| BinjipError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_geojson_str(&text, key_property)
    }

    /// Download the dataset over HTTP. Any non-success status is a failure.
    pub async fn fetch(url: &str, key_property: &str) -> Result<Self> {
        let fetch_error = |reason: String| BinjipError::BoundaryFetch {
            url: url.to_string(),
            reason,
        };

        let response = reqwest::Client::new()
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("Server answered {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| fetch_error(format!("Failed to read body: {}", e)))?;

        let dataset = Self::from_geojson_str(&text, key_property)?;
        tracing::info!(url, features = dataset.feature_count(), "Fetched boundary dataset");
        Ok(dataset)
    }

    /// Load from the configured file when set, otherwise fetch the configured URL
    pub async fn from_settings(settings: &MapSettings) -> Result<Self> {
        match &settings.boundary_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading boundary dataset from file");
                Self::load_file(path, &settings.boundary_key_property)
            }
            None => Self::fetch(&settings.boundary_url, &settings.boundary_key_property).await,
        }
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn key_property(&self) -> &str {
        &self.key_property
    }

    pub fn feature_count(&self) -> usize {
        self.collection.features.len()
    }

    /// Distinct district codes in feature order
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for feature in &self.collection.features {
            if let Some(code) = feature_code(feature, &self.key_property) {
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
        }
        codes
    }

    /// Bounding box centre as `[lat, lon]`
    pub fn center(&self) -> Option<[f64; 2]> {
        self.bounds.map(|[min_lon, min_lat, max_lon, max_lat]| {
            [(min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0]
        })
    }
}

/// District code of a feature, from a string or numeric property
pub fn feature_code(feature: &Feature, key_property: &str) -> Option<String> {
    match feature.properties.as_ref()?.get(key_property)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn combined_bounds(collection: &FeatureCollection) -> Result<Option<[f64; 4]>> {
    let mut bounds: Option<[f64; 4]> = None;

    for (idx, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            continue;
        };

        let geometry: geo::Geometry<f64> =
            geometry.value.clone().try_into().map_err(|e| BinjipError::BoundaryInvalid {
                reason: format!("Feature {} has unusable geometry: {:?}", idx, e),
            })?;

        let Some(rect) = geometry.bounding_rect() else {
            continue;
        };

        let (min, max) = (rect.min(), rect.max());
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            return Err(BinjipError::BoundaryInvalid {
                reason: format!("Feature {} has non-finite coordinates", idx),
            });
        }

        bounds = Some(match bounds {
            None => [min.x, min.y, max.x, max.y],
            Some([x0, y0, x1, y1]) => [x0.min(min.x), y0.min(min.y), x1.max(max.x), y1.max(max.y)],
        });
    }

    Ok(bounds)
}
