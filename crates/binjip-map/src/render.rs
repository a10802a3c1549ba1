//! Map renderer
//!
//! Builds the in-memory `RenderedMap`: tile layers, the boundary layer, the
//! choropleth fills with their legend, and one marker cluster per district.
//! The result is plain data; `export` turns it into a Leaflet document.

use std::collections::{BTreeMap, HashMap};

use binjip_core::aggregate::Aggregation;
use binjip_core::config::{MapSettings, MAX_ZOOM};
use binjip_core::error::{BinjipError, Result};
use binjip_core::models::{district_code, Record};
use binjip_core::photos::PhotoStore;
use geojson::FeatureCollection;
use serde::Serialize;

use crate::boundary::BoundaryDataset;
use crate::palette::color_for_bin;
use crate::popup::{popup_html, tooltip_html};

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const VWORLD_ATTRIBUTION: &str = "Vworld";

pub const BOUNDARY_LAYER_NAME: &str = "자치구";
pub const LEGEND_TITLE: &str = "Count of Buildings";

const CHOROPLETH_FILL_OPACITY: f64 = 0.5;
const CHOROPLETH_LINE_OPACITY: f64 = 0.2;

/// vworld WMTS template for a key, layer and image format
pub fn vworld_tile_url(api_key: &str, layer: &str, format: &str) -> String {
    format!(
        "https://api.vworld.kr/req/wmts/1.0.0/{}/{}/{{z}}/{{y}}/{{x}}.{}",
        api_key, layer, format
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayerView {
    pub name: String,
    pub url: String,
    pub attribution: String,
    pub overlay: bool,
}

/// Leaflet path style, serialized with Leaflet's option names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub fill_opacity: f64,
}

impl PathStyle {
    pub fn boundary() -> Self {
        Self {
            fill_color: "white",
            color: "white",
            weight: 1.4,
            fill_opacity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethView {
    /// Feature property holding the district code
    pub key_property: String,

    /// Fill colour per district code; codes without records are absent
    pub fills: BTreeMap<String, &'static str>,
    pub fill_opacity: f64,
    pub line_opacity: f64,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub lat: f64,
    pub lon: f64,
    pub tooltip: String,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterView {
    pub code: String,
    pub district: String,
    pub markers: Vec<MarkerView>,
}

/// Composite map ready for export
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMap<'a> {
    /// `[lat, lon]`, always finite
    pub center: [f64; 2],
    pub zoom: u8,
    pub max_zoom: u8,
    pub tiles: Vec<TileLayerView>,
    pub boundary_name: &'static str,
    pub boundary: &'a FeatureCollection,
    pub boundary_style: PathStyle,
    pub choropleth: ChoroplethView,
    /// In order of first appearance in the records
    pub clusters: Vec<ClusterView>,
    pub cluster_radius: u32,
    pub popup_max_width: u32,
}

impl RenderedMap<'_> {
    pub fn marker_count(&self) -> usize {
        self.clusters.iter().map(|c| c.markers.len()).sum()
    }

    pub fn cluster(&self, code: &str) -> Option<&ClusterView> {
        self.clusters.iter().find(|c| c.code == code)
    }

    /// JSON payload consumed by the Leaflet page
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BinjipError::Serialization(e.to_string()))
    }
}

/// Renders filtered records against one boundary dataset
pub struct MapRenderer<'a> {
    settings: &'a MapSettings,
    boundary: &'a BoundaryDataset,
}

impl<'a> MapRenderer<'a> {
    pub fn new(settings: &'a MapSettings, boundary: &'a BoundaryDataset) -> Self {
        Self { settings, boundary }
    }

    pub fn render(
        &self,
        records: &[Record],
        aggregation: &Aggregation,
        photos: &PhotoStore,
    ) -> Result<RenderedMap<'a>> {
        let clusters = self.clusters(records, photos)?;
        let map = RenderedMap {
            center: self.center(records),
            zoom: self.settings.initial_zoom,
            max_zoom: MAX_ZOOM,
            tiles: self.tile_layers(),
            boundary_name: BOUNDARY_LAYER_NAME,
            boundary: self.boundary.collection(),
            boundary_style: PathStyle::boundary(),
            choropleth: self.choropleth(aggregation),
            clusters,
            cluster_radius: self.settings.cluster_radius,
            popup_max_width: self.settings.popup_max_width,
        };

        tracing::debug!(
            markers = map.marker_count(),
            clusters = map.clusters.len(),
            center = ?map.center,
            "Rendered map"
        );

        Ok(map)
    }

    /// Mean record position, then the boundary centre, then the configured fallback
    pub fn center(&self, records: &[Record]) -> [f64; 2] {
        mean_center(records)
            .or_else(|| self.boundary.center())
            .filter(|c| c.iter().all(|v| v.is_finite()))
            .unwrap_or(self.settings.fallback_center)
    }

    fn tile_layers(&self) -> Vec<TileLayerView> {
        let mut tiles = vec![TileLayerView {
            name: "OpenStreetMap".to_string(),
            url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            overlay: false,
        }];

        if let Some(key) = &self.settings.tile_api_key {
            tiles.push(TileLayerView {
                name: format!("Vworld {}", self.settings.tile_layer),
                url: vworld_tile_url(key, &self.settings.tile_layer, &self.settings.tile_format),
                attribution: VWORLD_ATTRIBUTION.to_string(),
                overlay: true,
            });
        }

        tiles
    }

    fn choropleth(&self, aggregation: &Aggregation) -> ChoroplethView {
        let bin_count = aggregation.binning.bin_count();

        let fills = aggregation
            .districts
            .iter()
            .map(|d| (d.code.clone(), color_for_bin(d.bin, bin_count)))
            .collect();

        let entries = (0..bin_count)
            .filter_map(|bin| {
                let (lower, upper) = aggregation.binning.range(bin)?;
                Some(LegendEntry {
                    color: color_for_bin(bin, bin_count),
                    lower,
                    upper,
                })
            })
            .collect();

        ChoroplethView {
            key_property: self.boundary.key_property().to_string(),
            fills,
            fill_opacity: CHOROPLETH_FILL_OPACITY,
            line_opacity: CHOROPLETH_LINE_OPACITY,
            legend: Legend {
                title: LEGEND_TITLE,
                entries,
            },
        }
    }

    /// One pass over the records, opening a cluster the first time a district appears
    fn clusters(&self, records: &[Record], photos: &PhotoStore) -> Result<Vec<ClusterView>> {
        let mut clusters: Vec<ClusterView> = Vec::new();
        let mut by_code: HashMap<&'static str, usize> = HashMap::new();

        for record in records {
            let code = district_code(&record.district).ok_or_else(|| {
                BinjipError::UnknownDistrict {
                    name: record.district.clone(),
                }
            })?;

            let idx = *by_code.entry(code).or_insert_with(|| {
                clusters.push(ClusterView {
                    code: code.to_string(),
                    district: record.district.clone(),
                    markers: Vec::new(),
                });
                clusters.len() - 1
            });

            clusters[idx].markers.push(MarkerView {
                lat: record.latitude,
                lon: record.longitude,
                tooltip: tooltip_html(record)?,
                popup: popup_html(record, photos)?,
            });
        }

        Ok(clusters)
    }
}

fn mean_center(records: &[Record]) -> Option<[f64; 2]> {
    if records.is_empty() {
        return None;
    }
    let n = records.len() as f64;
    let lat = records.iter().map(|r| r.latitude).sum::<f64>() / n;
    let lon = records.iter().map(|r| r.longitude).sum::<f64>() / n;
    Some([lat, lon])
}
