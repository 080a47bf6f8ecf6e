use crate::assets::TextureHandle;
use crate::resources::texture::TextureSet;

/// Roughness factor of the paintable surface.
pub const PAINTABLE_ROUGHNESS: f32 = 0.8;
/// Metalness factor of the paintable surface.
pub const PAINTABLE_METALNESS: f32 = 0.0;
/// The height map is bound but has no visual effect.
pub const PAINTABLE_DISPLACEMENT_SCALE: f32 = 0.0;

/// Physically based material with the maps a scene host needs to shade the
/// paintable surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStandardMaterial {
    /// The color map.
    pub map: Option<TextureHandle>,
    /// The normal map.
    pub normal_map: Option<TextureHandle>,
    /// The displacement map.
    pub displacement_map: Option<TextureHandle>,
    pub displacement_scale: f32,
    /// The roughness map (ARM packed, roughness read from green).
    pub roughness_map: Option<TextureHandle>,
    pub roughness: f32,
    pub metalness: f32,
}

impl MeshStandardMaterial {
    /// Builds the paintable material from an effective texture set.
    #[must_use]
    pub fn from_texture_set(textures: &TextureSet) -> Self {
        Self {
            map: Some(textures.base_color),
            normal_map: Some(textures.normal),
            displacement_map: Some(textures.height),
            displacement_scale: PAINTABLE_DISPLACEMENT_SCALE,
            roughness_map: Some(textures.arm),
            roughness: PAINTABLE_ROUGHNESS,
            metalness: PAINTABLE_METALNESS,
        }
    }

    /// Calls `visitor` for every bound texture.
    pub fn visit_textures(&self, visitor: &mut dyn FnMut(TextureHandle)) {
        for handle in [
            self.map,
            self.normal_map,
            self.displacement_map,
            self.roughness_map,
        ]
        .into_iter()
        .flatten()
        {
            visitor(handle);
        }
    }
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self {
            map: None,
            normal_map: None,
            displacement_map: None,
            displacement_scale: 1.0,
            roughness_map: None,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}
