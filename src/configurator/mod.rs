//! Configurator Core
//!
//! - [`view`]: pure derivation of camera, orbit bounds and lights
//! - [`resolver`]: texture overrides to a complete [`TextureSet`](crate::resources::TextureSet)
//! - [`binder`]: paintable material assignment on a [`Model`](crate::scene::Model)
//! - [`state`]: the [`Configurator`] state machine tying them to a scene host

pub mod binder;
pub mod resolver;
pub mod state;
pub mod view;

pub use binder::{BindOutcome, apply_material};
pub use resolver::{AppliedSelection, Resolution, TextureOverrides, resolve};
pub use state::{
    ApplyOutcome, Configurator, ConfiguratorInputs, PendingSelection, Phase, ResolvedSelection,
};
pub use view::{
    DeviceClass, DevicePreset, FILL_LIGHT_POSITION, LIGHT_INTENSITY, ORBIT_DAMPING, ORBIT_LIMITS,
    PRELOAD_ORBIT_LIMITS, RotationPreset, ViewParameters, derive_view_parameters,
};
