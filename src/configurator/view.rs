//! View Parameter Derivation
//!
//! Camera framing, orbit bounds and lighting are a pure function of
//! ([`DeviceClass`], zoom flag, [`RotationPreset`]). Both device classes go
//! through the same construction path; they differ only in the
//! [`DevicePreset`] table row they select.
//!
//! | Device  | Camera (base) | Camera z zoomed | Model position | Orbit target  | Dolly  |
//! |---------|---------------|-----------------|----------------|---------------|--------|
//! | Compact | (0, -1, -1)   | 2.0             | (0, -1.5, 0)   | (3, -0.5, -2) | [1, 5] |
//! | Regular | (0, 0.4, 0.8) | 1.5             | (0, -1.5, 0)   | (0, 0, 0)     | [0, 4] |

use std::f32::consts::PI;

use glam::{Vec3, Vec4};

use crate::errors::Error;
use crate::scene::host::{DollyRange, OrbitLimits};
use crate::scene::light::Light;

pub const WHITE: Vec4 = Vec4::ONE;

/// Smoothing applied to every orbit and dolly motion.
pub const ORBIT_DAMPING: f32 = 0.1;

/// Light intensity once a model is loaded.
pub const LIGHT_INTENSITY: f32 = 1.0;

/// Light intensity before any model is loaded.
pub const PRELOAD_LIGHT_INTENSITY: f32 = 2.5;

/// Fill light opposite the key light, present for every preset.
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-1.0, -1.0, -1.0);

/// Viewing cone of the house models once loaded, for both device classes.
///
/// Earlier desktop builds kept the narrower [`PRELOAD_ORBIT_LIMITS`] cone on
/// [`DeviceClass::Regular`] after load. That cone now applies only before a
/// model is loaded.
pub const ORBIT_LIMITS: OrbitLimits = OrbitLimits {
    min_azimuth: -PI,
    max_azimuth: 0.0,
    min_polar: PI / 3.0,
    max_polar: PI / 2.0,
};

/// Viewing cone before a model is loaded.
pub const PRELOAD_ORBIT_LIMITS: OrbitLimits = OrbitLimits {
    min_azimuth: -PI / 4.0,
    max_azimuth: PI / 4.0,
    min_polar: PI / 4.0,
    max_polar: PI / 1.5,
};

/// Model yaw of the left / right presets.
pub const SIDE_ROTATION: f32 = PI / 3.5;

/// Screen class of the viewing device, computed by the embedding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    Compact,
    #[default]
    Regular,
}

impl DeviceClass {
    /// Convenience for callers that only know the viewport width.
    #[must_use]
    pub fn for_viewport_width(width: f32, compact_max_width: f32) -> Self {
        if width <= compact_max_width {
            DeviceClass::Compact
        } else {
            DeviceClass::Regular
        }
    }

    #[must_use]
    pub fn preset(self) -> &'static DevicePreset {
        match self {
            DeviceClass::Compact => &COMPACT_PRESET,
            DeviceClass::Regular => &REGULAR_PRESET,
        }
    }

    #[inline]
    #[must_use]
    pub fn dolly_range(self) -> DollyRange {
        self.preset().dolly_range
    }
}

/// Per-device framing constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePreset {
    pub camera_position: Vec3,
    /// Camera depth replacing `camera_position.z` when the zoom flag is set.
    pub zoomed_camera_z: f32,
    pub primitive_position: Vec3,
    pub orbit_target: Vec3,
    pub background_color: Vec4,
    pub dolly_range: DollyRange,
    pub ambient_light: Option<Light>,
}

pub const COMPACT_PRESET: DevicePreset = DevicePreset {
    camera_position: Vec3::new(0.0, -1.0, -1.0),
    zoomed_camera_z: 2.0,
    primitive_position: Vec3::new(0.0, -1.5, 0.0),
    orbit_target: Vec3::new(3.0, -0.5, -2.0),
    background_color: WHITE,
    dolly_range: DollyRange { min: 1.0, max: 5.0 },
    // CSS "green"
    ambient_light: Some(Light::new_ambient(Vec3::new(0.0, 128.0 / 255.0, 0.0), 0.5)),
};

pub const REGULAR_PRESET: DevicePreset = DevicePreset {
    camera_position: Vec3::new(0.0, 0.4, 0.8),
    zoomed_camera_z: 1.5,
    primitive_position: Vec3::new(0.0, -1.5, 0.0),
    orbit_target: Vec3::ZERO,
    background_color: WHITE,
    dolly_range: DollyRange { min: 0.0, max: 4.0 },
    ambient_light: None,
};

/// Discrete model orientation; also moves the key light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationPreset {
    #[default]
    Front,
    Left,
    Right,
}

impl RotationPreset {
    /// Fail-closed conversion for untrusted input: anything outside
    /// `0..=2` is treated as [`RotationPreset::Front`].
    #[must_use]
    pub fn from_raw(value: i64) -> Self {
        Self::try_from(value).unwrap_or_else(|err| {
            log::warn!("{err}, falling back to Front");
            RotationPreset::Front
        })
    }

    #[must_use]
    pub fn index(self) -> i64 {
        match self {
            RotationPreset::Front => 0,
            RotationPreset::Left => 1,
            RotationPreset::Right => 2,
        }
    }

    #[must_use]
    pub fn model_rotation_y(self) -> f32 {
        match self {
            RotationPreset::Front => 0.0,
            RotationPreset::Left => SIDE_ROTATION,
            RotationPreset::Right => -SIDE_ROTATION,
        }
    }

    #[must_use]
    pub fn key_light_position(self) -> Vec3 {
        match self {
            RotationPreset::Front => Vec3::ONE,
            RotationPreset::Left | RotationPreset::Right => Vec3::new(0.0, 1.0, 1.0),
        }
    }
}

impl TryFrom<i64> for RotationPreset {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RotationPreset::Front),
            1 => Ok(RotationPreset::Left),
            2 => Ok(RotationPreset::Right),
            other => Err(Error::InvalidRotationPreset(other)),
        }
    }
}

/// Everything the scene host needs to frame and light the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParameters {
    pub camera_position: Vec3,
    pub primitive_position: Vec3,
    pub orbit_target: Vec3,
    pub background_color: Vec4,
    pub orbit_limits: OrbitLimits,
    pub light_intensity: f32,
    pub light_position: Vec3,
    pub model_rotation_y: f32,
    pub ambient_light: Option<Light>,
}

impl ViewParameters {
    /// State held before a model has loaded. Never pushed to the host.
    #[must_use]
    pub fn preload(device: DeviceClass) -> Self {
        let preset = device.preset();
        Self {
            camera_position: preset.camera_position,
            primitive_position: preset.primitive_position,
            orbit_target: preset.orbit_target,
            background_color: preset.background_color,
            orbit_limits: PRELOAD_ORBIT_LIMITS,
            light_intensity: PRELOAD_LIGHT_INTENSITY,
            light_position: Vec3::ONE,
            model_rotation_y: 0.0,
            ambient_light: preset.ambient_light,
        }
    }

    /// Key light, fill light and (on compact screens) ambient light.
    #[must_use]
    pub fn lights(&self) -> Vec<Light> {
        let mut lights = vec![
            Light::new_directional(self.light_position, self.light_intensity).with_shadows(),
            Light::new_directional(FILL_LIGHT_POSITION, self.light_intensity),
        ];
        lights.extend(self.ambient_light);
        lights
    }
}

/// Derives the view of a loaded model.
#[must_use]
pub fn derive_view_parameters(
    device: DeviceClass,
    zoom: bool,
    rotation: RotationPreset,
) -> ViewParameters {
    let preset = device.preset();

    let mut camera_position = preset.camera_position;
    if zoom {
        camera_position.z = preset.zoomed_camera_z;
    }

    ViewParameters {
        camera_position,
        primitive_position: preset.primitive_position,
        orbit_target: preset.orbit_target,
        background_color: preset.background_color,
        orbit_limits: ORBIT_LIMITS,
        light_intensity: LIGHT_INTENSITY,
        light_position: rotation.key_light_position(),
        model_rotation_y: rotation.model_rotation_y(),
        ambient_light: preset.ambient_light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(DeviceClass::for_viewport_width(768.0, 768.0), DeviceClass::Compact);
        assert_eq!(DeviceClass::for_viewport_width(320.0, 768.0), DeviceClass::Compact);
        assert_eq!(DeviceClass::for_viewport_width(769.0, 768.0), DeviceClass::Regular);
    }

    #[test]
    fn test_rotation_preset_round_trip_indices() {
        for preset in [RotationPreset::Front, RotationPreset::Left, RotationPreset::Right] {
            assert_eq!(RotationPreset::try_from(preset.index()).unwrap(), preset);
        }
    }

    #[test]
    fn test_invalid_rotation_preset_fails_closed() {
        assert!(matches!(
            RotationPreset::try_from(7),
            Err(Error::InvalidRotationPreset(7))
        ));
        assert_eq!(RotationPreset::from_raw(7), RotationPreset::Front);
        assert_eq!(RotationPreset::from_raw(-1), RotationPreset::Front);
        assert_eq!(RotationPreset::from_raw(2), RotationPreset::Right);
    }

    #[test]
    fn test_lights_include_ambient_only_on_compact() {
        let compact = derive_view_parameters(DeviceClass::Compact, false, RotationPreset::Front);
        let regular = derive_view_parameters(DeviceClass::Regular, false, RotationPreset::Front);

        assert_eq!(compact.lights().len(), 3);
        assert_eq!(regular.lights().len(), 2);

        let key = regular.lights()[0];
        assert!(key.cast_shadows);
        assert_eq!(key.position(), Some(Vec3::ONE));
        let fill = regular.lights()[1];
        assert!(!fill.cast_shadows);
        assert_eq!(fill.position(), Some(FILL_LIGHT_POSITION));
        assert!((fill.intensity - LIGHT_INTENSITY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_preload_values() {
        let preload = ViewParameters::preload(DeviceClass::Regular);
        assert!((preload.light_intensity - 2.5).abs() < f32::EPSILON);
        assert_eq!(preload.orbit_limits, PRELOAD_ORBIT_LIMITS);
        assert_eq!(preload.camera_position, REGULAR_PRESET.camera_position);
    }
}
