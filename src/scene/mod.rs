//! Scene Module
//!
//! - [`Model`]: an owned, per-configurator instance of a loaded model's node graph
//! - [`ModelAsset`]: the shared, read-only decoded model
//! - [`Light`]: directional and ambient lights
//! - [`SceneHost`]: the rendering surface driven by the configurator

pub mod host;
pub mod light;
pub mod model;

pub use host::{DollyRange, OrbitLimits, SceneHandle, SceneHost};
pub use light::{Light, LightKind};
pub use model::{Model, ModelAsset, ModelAssetNode, ModelNode, NodeHandle};
