use crate::error::{BinjipError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Busan administrative-dong boundaries, keyed by the `sgg` district code
pub const DEFAULT_BOUNDARY_URL: &str = "https://raw.githubusercontent.com/raqoon886/Local_HangJeongDong/master/hangjeongdong_%EB%B6%80%EC%82%B0%EA%B4%91%EC%97%AD%EC%8B%9C.geojson";

/// Busan city hall
pub const DEFAULT_FALLBACK_CENTER: [f64; 2] = [35.1796, 129.0756];

/// Highest zoom level served by the tile providers
pub const MAX_ZOOM: u8 = 19;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Plain map settings resolved from a `LayeredConfig`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSettings {
    pub boundary_url: String,
    pub boundary_path: Option<PathBuf>,
    pub boundary_key_property: String,
    pub tile_api_key: Option<String>,
    pub tile_layer: String,
    pub tile_format: String,
    pub initial_zoom: u8,
    pub cluster_radius: u32,
    pub popup_max_width: u32,
    pub fallback_center: [f64; 2],
}

impl Default for MapSettings {
    fn default() -> Self {
        LayeredConfig::with_defaults().settings()
    }
}

/// Layered configuration for Binjip
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub boundary_url: ConfigValue<String>,
    pub boundary_path: ConfigValue<Option<PathBuf>>,
    pub boundary_key_property: ConfigValue<String>,
    pub tile_api_key: ConfigValue<Option<String>>,
    pub tile_layer: ConfigValue<String>,
    pub tile_format: ConfigValue<String>,
    pub initial_zoom: ConfigValue<u8>,
    pub cluster_radius: ConfigValue<u32>,
    pub popup_max_width: ConfigValue<u32>,
    pub fallback_center: ConfigValue<[f64; 2]>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            boundary_url: ConfigValue::new(DEFAULT_BOUNDARY_URL.to_string(), ConfigSource::Default),
            boundary_path: ConfigValue::new(None, ConfigSource::Default),
            boundary_key_property: ConfigValue::new("sgg".to_string(), ConfigSource::Default),
            tile_api_key: ConfigValue::new(None, ConfigSource::Default),
            tile_layer: ConfigValue::new("white".to_string(), ConfigSource::Default),
            tile_format: ConfigValue::new("png".to_string(), ConfigSource::Default),
            initial_zoom: ConfigValue::new(11, ConfigSource::Default),
            cluster_radius: ConfigValue::new(75, ConfigSource::Default),
            popup_max_width: ConfigValue::new(300, ConfigSource::Default),
            fallback_center: ConfigValue::new(DEFAULT_FALLBACK_CENTER, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| BinjipError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| BinjipError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        let source = ConfigSource::File;

        if let Some(url) = file_config.boundary_url {
            self.boundary_url.update(url, source);
        }
        if let Some(path) = file_config.boundary_path {
            self.boundary_path.update(Some(path), source);
        }
        if let Some(key) = file_config.boundary_key_property {
            self.boundary_key_property.update(key, source);
        }
        if let Some(key) = file_config.tile_api_key {
            self.tile_api_key.update(Some(key), source);
        }
        if let Some(layer) = file_config.tile_layer {
            self.tile_layer.update(layer, source);
        }
        if let Some(format) = file_config.tile_format {
            self.tile_format.update(format, source);
        }
        if let Some(zoom) = file_config.initial_zoom {
            self.initial_zoom.update(validate_zoom(zoom)?, source);
        }
        if let Some(radius) = file_config.cluster_radius {
            self.cluster_radius.update(radius, source);
        }
        if let Some(width) = file_config.popup_max_width {
            self.popup_max_width.update(width, source);
        }
        if let Some(center) = file_config.fallback_center {
            self.fallback_center.update(validate_center(center)?, source);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        let source = ConfigSource::Environment;

        if let Ok(url) = env::var("BINJIP_BOUNDARY_URL") {
            self.boundary_url.update(url, source);
        }

        if let Ok(path) = env::var("BINJIP_BOUNDARY_PATH") {
            self.boundary_path.update(Some(PathBuf::from(path)), source);
        }

        if let Ok(key) = env::var("BINJIP_BOUNDARY_KEY") {
            self.boundary_key_property.update(key, source);
        }

        if let Ok(key) = env::var("BINJIP_VWORLD_KEY") {
            if !key.trim().is_empty() {
                self.tile_api_key.update(Some(key.trim().to_string()), source);
            }
        }

        if let Ok(layer) = env::var("BINJIP_TILE_LAYER") {
            self.tile_layer.update(layer, source);
        }

        if let Ok(format) = env::var("BINJIP_TILE_FORMAT") {
            self.tile_format.update(format, source);
        }

        if let Ok(zoom_str) = env::var("BINJIP_INITIAL_ZOOM") {
            match zoom_str.parse::<u8>().ok().filter(|z| *z <= MAX_ZOOM) {
                Some(zoom) => self.initial_zoom.update(zoom, source),
                None => tracing::warn!(
                    "Invalid BINJIP_INITIAL_ZOOM value '{}': expected integer 0-19",
                    zoom_str
                ),
            }
        }

        if let Ok(radius_str) = env::var("BINJIP_CLUSTER_RADIUS") {
            match radius_str.parse::<u32>() {
                Ok(radius) => self.cluster_radius.update(radius, source),
                Err(_) => tracing::warn!(
                    "Invalid BINJIP_CLUSTER_RADIUS value '{}': expected pixel count",
                    radius_str
                ),
            }
        }

        if let Ok(width_str) = env::var("BINJIP_POPUP_MAX_WIDTH") {
            match width_str.parse::<u32>() {
                Ok(width) => self.popup_max_width.update(width, source),
                Err(_) => tracing::warn!(
                    "Invalid BINJIP_POPUP_MAX_WIDTH value '{}': expected pixel count",
                    width_str
                ),
            }
        }

        if let Ok(center_str) = env::var("BINJIP_FALLBACK_CENTER") {
            match parse_center(&center_str) {
                Ok(center) => self.fallback_center.update(center, source),
                Err(_) => tracing::warn!(
                    "Invalid BINJIP_FALLBACK_CENTER value '{}': expected 'lat,lon'",
                    center_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        let source = ConfigSource::Cli;

        if let Some(path) = overrides.boundary_path {
            self.boundary_path.update(Some(path), source);
        }

        if let Some(key) = overrides.tile_api_key {
            self.tile_api_key.update(Some(key), source);
        }

        if let Some(zoom) = overrides.initial_zoom {
            self.initial_zoom.update(validate_zoom(zoom)?, source);
        }

        Ok(())
    }

    /// Resolve the plain settings consumed by the renderer
    pub fn settings(&self) -> MapSettings {
        MapSettings {
            boundary_url: self.boundary_url.value.clone(),
            boundary_path: self.boundary_path.value.clone(),
            boundary_key_property: self.boundary_key_property.value.clone(),
            tile_api_key: self.tile_api_key.value.clone(),
            tile_layer: self.tile_layer.value.clone(),
            tile_format: self.tile_format.value.clone(),
            initial_zoom: self.initial_zoom.value,
            cluster_radius: self.cluster_radius.value,
            popup_max_width: self.popup_max_width.value,
            fallback_center: self.fallback_center.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "boundary_url".to_string(),
            (self.boundary_url.value.clone(), self.boundary_url.source),
        );
        map.insert(
            "boundary_path".to_string(),
            (
                self.boundary_path
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
                self.boundary_path.source,
            ),
        );
        map.insert(
            "boundary_key_property".to_string(),
            (self.boundary_key_property.value.clone(), self.boundary_key_property.source),
        );
        // Never echo the credential itself
        map.insert(
            "tile_api_key".to_string(),
            (
                if self.tile_api_key.value.is_some() { "(set)" } else { "(none)" }.to_string(),
                self.tile_api_key.source,
            ),
        );
        map.insert(
            "tile_layer".to_string(),
            (self.tile_layer.value.clone(), self.tile_layer.source),
        );
        map.insert(
            "tile_format".to_string(),
            (self.tile_format.value.clone(), self.tile_format.source),
        );
        map.insert(
            "initial_zoom".to_string(),
            (self.initial_zoom.value.to_string(), self.initial_zoom.source),
        );
        map.insert(
            "cluster_radius".to_string(),
            (self.cluster_radius.value.to_string(), self.cluster_radius.source),
        );
        map.insert(
            "popup_max_width".to_string(),
            (self.popup_max_width.value.to_string(), self.popup_max_width.source),
        );
        let [lat, lon] = self.fallback_center.value;
        map.insert(
            "fallback_center".to_string(),
            (format!("{},{}", lat, lon), self.fallback_center.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    boundary_url: Option<String>,
    boundary_path: Option<PathBuf>,
    boundary_key_property: Option<String>,
    tile_api_key: Option<String>,
    tile_layer: Option<String>,
    tile_format: Option<String>,
    initial_zoom: Option<u8>,
    cluster_radius: Option<u32>,
    popup_max_width: Option<u32>,
    fallback_center: Option<[f64; 2]>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub boundary_path: Option<PathBuf>,
    pub tile_api_key: Option<String>,
    pub initial_zoom: Option<u8>,
}

/// Parse a `lat,lon` pair
pub fn parse_center(s: &str) -> Result<[f64; 2]> {
    let invalid = || BinjipError::ConfigInvalid {
        key: "fallback_center".to_string(),
        reason: format!("Invalid center: {}. Use 'lat,lon'", s),
    };

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
    let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    validate_center([lat, lon])
}

fn validate_center(center: [f64; 2]) -> Result<[f64; 2]> {
    let [lat, lon] = center;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(BinjipError::ConfigInvalid {
            key: "fallback_center".to_string(),
            reason: format!("Center out of range: {},{}", lat, lon),
        });
    }
    Ok(center)
}

fn validate_zoom(zoom: u8) -> Result<u8> {
    if zoom > MAX_ZOOM {
        return Err(BinjipError::ConfigInvalid {
            key: "initial_zoom".to_string(),
            reason: format!("Zoom level {} is above the maximum of {}", zoom, MAX_ZOOM),
        });
    }
    Ok(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.boundary_key_property.value, "sgg");
        assert_eq!(config.initial_zoom.value, 11);
        assert_eq!(config.cluster_radius.value, 75);
        assert_eq!(config.popup_max_width.value, 300);
        assert_eq!(config.tile_api_key.value, None);
        assert_eq!(config.initial_zoom.source, ConfigSource::Default);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
boundary_path = "/data/busan.geojson"
tile_api_key = "test-key"
initial_zoom = 12
fallback_center = [35.1, 129.0]
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.boundary_path.value, Some(PathBuf::from("/data/busan.geojson")));
        assert_eq!(config.tile_api_key.value.as_deref(), Some("test-key"));
        assert_eq!(config.initial_zoom.value, 12);
        assert_eq!(config.initial_zoom.source, ConfigSource::File);
        assert_eq!(config.fallback_center.value, [35.1, 129.0]);
        // Untouched keys keep their defaults
        assert_eq!(config.cluster_radius.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_with_invalid_zoom() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "initial_zoom = 30").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(BinjipError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            boundary_path: Some(PathBuf::from("local.geojson")),
            tile_api_key: None,
            initial_zoom: Some(13),
        })
        .unwrap();

        assert_eq!(config.initial_zoom.value, 13);
        assert_eq!(config.initial_zoom.source, ConfigSource::Cli);
        assert_eq!(config.boundary_path.source, ConfigSource::Cli);
        assert_eq!(config.tile_api_key.source, ConfigSource::Default);
    }

    #[test]
    fn test_cli_zoom_above_maximum_is_rejected() {
        let mut config = LayeredConfig::with_defaults();

        let result = config.update_from_cli(CliConfigOverrides {
            initial_zoom: Some(200),
            ..Default::default()
        });

        assert!(matches!(result, Err(BinjipError::ConfigInvalid { .. })));
        assert_eq!(config.initial_zoom.value, 11);
        assert_eq!(config.initial_zoom.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_center() {
        assert_eq!(parse_center("35.18, 129.07").unwrap(), [35.18, 129.07]);
        assert!(parse_center("35.18").is_err());
        assert!(parse_center("abc,129").is_err());
        assert!(parse_center("95,129").is_err());
    }

    #[test]
    fn test_inspection_map_hides_api_key() {
        let mut config = LayeredConfig::with_defaults();
        config.tile_api_key.update(Some("secret".to_string()), ConfigSource::Cli);

        let map = config.to_inspection_map();
        let (key_value, key_source) = &map["tile_api_key"];
        assert_eq!(key_value, "(set)");
        assert_eq!(*key_source, ConfigSource::Cli);
        assert_eq!(map["initial_zoom"].0, "11");
    }

    #[test]
    fn test_settings_snapshot() {
        let settings = LayeredConfig::with_defaults().settings();
        assert_eq!(settings, MapSettings::default());
        assert_eq!(settings.fallback_center, DEFAULT_FALLBACK_CENTER);
    }
}
