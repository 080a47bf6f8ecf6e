//! Configurator Settings
//!
//! Asset locations and the name of the paintable node. The viewing
//! constants (camera presets, orbit limits, damping) are properties of the
//! model being shown and are intentionally absent here.
//!
//! ```rust,ignore
//! use configurator::settings::ConfiguratorSettings;
//!
//! let settings = ConfiguratorSettings::from_json_str(r#"{ "model_path": "/House.glb" }"#)?;
//! assert_eq!(settings.paintable_node, "main_change");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::ResourcePath;
use crate::errors::Result;

/// Default paintable node name authored into the house models.
pub const DEFAULT_PAINTABLE_NODE: &str = "main_change";

/// Viewport widths at or below this value are treated as compact screens.
pub const DEFAULT_COMPACT_MAX_WIDTH: f32 = 768.0;

/// Paths of the four fallback textures used when no override is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultTexturePaths {
    pub base_color: ResourcePath,
    pub arm: ResourcePath,
    pub normal: ResourcePath,
    pub height: ResourcePath,
}

impl Default for DefaultTexturePaths {
    fn default() -> Self {
        const ROOT: &str = "/Project_textures/01_beachport/textures";
        Self {
            base_color: ResourcePath::from(format!("{ROOT}/beachport_basecolor.jpg")),
            arm: ResourcePath::from(format!("{ROOT}/beachport_arm.jpg")),
            normal: ResourcePath::from(format!("{ROOT}/beachport_normal.jpg")),
            height: ResourcePath::from(format!("{ROOT}/beachport_height.jpg")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfiguratorSettings {
    /// Model shown by the configurator.
    pub model_path: ResourcePath,
    pub default_textures: DefaultTexturePaths,
    /// Name of the node whose material is replaced on texture selection.
    pub paintable_node: String,
    /// Breakpoint for [`DeviceClass::for_viewport_width`](crate::configurator::DeviceClass::for_viewport_width).
    pub compact_max_width: f32,
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            model_path: ResourcePath::from("/House.glb"),
            default_textures: DefaultTexturePaths::default(),
            paintable_node: DEFAULT_PAINTABLE_NODE.to_string(),
            compact_max_width: DEFAULT_COMPACT_MAX_WIDTH,
        }
    }
}

impl ConfiguratorSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = ConfiguratorSettings::from_json_str(r#"{ "model_path": "/Barn.glb" }"#).unwrap();
        assert_eq!(settings.model_path.as_str(), "/Barn.glb");
        assert_eq!(settings.paintable_node, DEFAULT_PAINTABLE_NODE);
        assert_eq!(settings.default_textures, DefaultTexturePaths::default());
        assert!((settings.compact_max_width - 768.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = ConfiguratorSettings::from_json_str(r#"{ "camera_fov": 45 }"#).unwrap_err();
        assert!(matches!(err, crate::errors::Error::Settings(_)));
    }

    #[test]
    fn test_nested_texture_override() {
        let json = r#"{ "default_textures": { "normal": "/t/n.png" } }"#;
        let settings = ConfiguratorSettings::from_json_str(json).unwrap();
        assert_eq!(settings.default_textures.normal.as_str(), "/t/n.png");
        assert_eq!(
            settings.default_textures.arm,
            DefaultTexturePaths::default().arm
        );
    }
}
