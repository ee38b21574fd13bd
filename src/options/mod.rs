//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (proximity band, camera, tree frame, group sizes,
//! photo focus tuning) are consolidated here. Options serialize to/from TOML
//! for scene presets.

mod camera;
mod groups;
mod photos;
mod signal;
mod tree;

use std::path::Path;

pub use camera::CameraOptions;
pub use groups::GroupOptions;
pub use photos::PhotoOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use signal::SignalOptions;
pub use tree::TreeOptions;

use crate::error::EvergreenError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[signal]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Proximity band and smoothing.
    pub signal: SignalOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Tree frame placement and idle motion.
    pub tree: TreeOptions,
    /// Particle group population sizes.
    pub groups: GroupOptions,
    /// Photo focus tuning.
    pub photos: PhotoOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// JSON Schema serialized for a UI collaborator.
    pub fn json_schema_string() -> Result<String, EvergreenError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))
    }

    /// Current values as JSON, matching [`Self::json_schema`].
    pub fn to_json(&self) -> Result<String, EvergreenError> {
        serde_json::to_string(self)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EvergreenError> {
        let content = std::fs::read_to_string(path).map_err(EvergreenError::Io)?;
        toml::from_str(&content)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EvergreenError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EvergreenError::Io)?;
        }
        std::fs::write(path, content).map_err(EvergreenError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Reject configurations the scene cannot run with.
    ///
    /// An equal band start and end is allowed and acts as a step; an
    /// inverted band is not.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        let signal = &self.signal;
        if !(signal.band_start.is_finite() && signal.band_end.is_finite()) {
            return Err(EvergreenError::InvalidOptions(
                "proximity band must be finite".to_owned(),
            ));
        }
        if signal.band_start < signal.band_end {
            return Err(EvergreenError::InvalidOptions(format!(
                "proximity band is inverted: start {} < end {}",
                signal.band_start, signal.band_end
            )));
        }
        if !(signal.smoothing > 0.0 && signal.smoothing <= 1.0) {
            return Err(EvergreenError::InvalidOptions(format!(
                "smoothing {} outside (0, 1]",
                signal.smoothing
            )));
        }

        let camera = &self.camera;
        if !(camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance) {
            return Err(EvergreenError::InvalidOptions(format!(
                "camera distance range [{}, {}] is empty",
                camera.min_distance, camera.max_distance
            )));
        }

        if !(self.tree.scale.is_finite() && self.tree.scale > 0.0) {
            return Err(EvergreenError::InvalidOptions(format!(
                "tree scale {} must be positive",
                self.tree.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[signal]
band_start = 7.0

[groups]
snow = 0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.signal.band_start, 7.0);
        assert_eq!(opts.groups.snow, 0);
        // Everything else should be default
        assert_eq!(opts.signal.band_end, 4.5);
        assert_eq!(opts.groups.foliage, 1800);
        assert_eq!(opts.photos.ring_size, None);
    }

    #[test]
    fn ring_size_override_round_trips() {
        let mut opts = Options::default();
        opts.photos.ring_size = Some(6);
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.photos.ring_size, Some(6));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut opts = Options::default();
        opts.signal.band_start = 4.0;
        opts.signal.band_end = 5.0;
        assert!(matches!(opts.validate(), Err(EvergreenError::InvalidOptions(_))));

        opts.signal.band_end = 4.0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn smoothing_outside_unit_interval_is_rejected() {
        for smoothing in [0.0, -0.1, 1.5, f32::NAN] {
            let mut opts = Options::default();
            opts.signal.smoothing = smoothing;
            assert!(opts.validate().is_err(), "smoothing {smoothing}");
        }
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = Options::default();
        opts.tree.scale = 1.1;
        opts.save(&dir.path().join("presets/wide.toml")).unwrap();
        Options::default()
            .save(&dir.path().join("presets/base.toml"))
            .unwrap();
        std::fs::write(dir.path().join("presets/notes.txt"), "x").unwrap();

        let loaded = Options::load(&dir.path().join("presets/wide.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir.path().join("presets")),
            vec!["base".to_owned(), "wide".to_owned()]
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[signal\nband_start = ").unwrap();
        assert!(matches!(Options::load(&path), Err(EvergreenError::OptionsParse(_))));
        assert!(matches!(
            Options::load(&dir.path().join("missing.toml")),
            Err(EvergreenError::Io(_))
        ));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value = serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["signal", "camera", "tree", "groups", "photos"] {
            assert!(props.contains_key(section), "missing {section}");
        }

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("damping").is_some());
        assert!(camera.get("eye").is_none());
        assert!(camera.get("max_polar_angle").is_none());

        let photos = &props["photos"]["properties"];
        assert!(photos.get("focus_lead").is_some());
        assert!(photos.get("ring_size").is_none());
    }

    #[test]
    fn json_exports_parse_back() {
        let schema: serde_json::Value =
            serde_json::from_str(&Options::json_schema_string().unwrap()).unwrap();
        assert!(schema["properties"].get("signal").is_some());

        let values: serde_json::Value =
            serde_json::from_str(&Options::default().to_json().unwrap()).unwrap();
        assert_eq!(values["groups"]["foliage"], 1800);
        assert_eq!(values["tree"]["scale"].as_f64().map(|s| s as f32), Some(0.84));
    }
}
