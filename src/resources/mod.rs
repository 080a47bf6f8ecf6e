//! Resource Definitions
//!
//! CPU-side data consumed by the scene host:
//! - [`Texture`]: decoded RGBA8 image
//! - [`TextureSet`]: the four texture slots of the paintable material
//! - [`MeshStandardMaterial`]: PBR material assigned to the paintable node

pub mod material;
pub mod texture;

pub use material::MeshStandardMaterial;
pub use texture::{Texture, TextureSet, TextureSlot};
