//! Scene Host Interface
//!
//! The rendering backend (GPU scene graph, canvas, orbit-control widget) is
//! an external collaborator. The configurator drives it exclusively through
//! [`SceneHost`].
//!
//! Every parameter change is delivered as one batch bracketed by
//! [`SceneHost::begin_update`] and [`SceneHost::commit_update`]. A host that
//! renders concurrently should stage calls and publish them on commit, so a
//! frame never mixes a new camera with stale lighting.

use glam::{Vec3, Vec4};
use slotmap::new_key_type;

use crate::scene::light::Light;
use crate::scene::model::Model;

new_key_type! {
    pub struct SceneHandle;
}

/// Angular bounds of user orbit interaction, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitLimits {
    #[must_use]
    pub fn clamp_azimuth(&self, azimuth: f32) -> f32 {
        azimuth.clamp(self.min_azimuth, self.max_azimuth)
    }

    #[must_use]
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.min_polar, self.max_polar)
    }
}

/// Distance bounds of user dolly (continuous zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DollyRange {
    pub min: f32,
    pub max: f32,
}

impl DollyRange {
    #[must_use]
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.clamp(self.min, self.max)
    }
}

pub trait SceneHost {
    /// Creates the rendering surface and returns its handle.
    fn create_scene(&mut self, background: Vec4) -> SceneHandle;

    fn set_background(&mut self, scene: SceneHandle, background: Vec4);

    fn set_camera(&mut self, scene: SceneHandle, position: Vec3, target: Vec3);

    fn set_orbit_limits(&mut self, scene: SceneHandle, limits: OrbitLimits);

    fn set_orbit_distance(&mut self, scene: SceneHandle, range: DollyRange);

    fn set_orbit_damping(&mut self, scene: SceneHandle, factor: f32);

    fn set_pan_enabled(&mut self, scene: SceneHandle, enabled: bool);

    /// Replaces every light of the scene.
    fn set_lights(&mut self, scene: SceneHandle, lights: &[Light]);

    /// Attaches (or re-attaches) the model with its current materials.
    fn attach_model(&mut self, scene: SceneHandle, model: &Model, position: Vec3, rotation_y: f32);

    fn teardown(&mut self, scene: SceneHandle);

    /// Marks the start of an update batch.
    fn begin_update(&mut self, _scene: SceneHandle) {}

    /// Publishes the calls made since [`begin_update`](Self::begin_update).
    fn commit_update(&mut self, _scene: SceneHandle) {}
}
