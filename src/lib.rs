#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod configurator;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod utils;

pub use assets::{FileResourceProvider, ModelHandle, ResourceCache, ResourcePath, ResourceProvider, TextureHandle};
pub use configurator::{
    ApplyOutcome, BindOutcome, Configurator, DeviceClass, Phase, RotationPreset, TextureOverrides,
    ViewParameters, apply_material, derive_view_parameters, resolve,
};
pub use errors::{Error, ResourceLoadError, Result};
pub use resources::{MeshStandardMaterial, Texture, TextureSet, TextureSlot};
pub use scene::{DollyRange, Light, Model, OrbitLimits, SceneHandle, SceneHost};
pub use settings::ConfiguratorSettings;
pub use utils::orbit_control::{OrbitControls, OrbitInput};
