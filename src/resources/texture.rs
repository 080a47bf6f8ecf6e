use std::fmt;

use image::GenericImageView;
use uuid::Uuid;

use crate::assets::TextureHandle;

/// A decoded texture, owned by the [`ResourceCache`](crate::assets::ResourceCache).
///
/// Never mutated after load; shared read-only by every consumer.
#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub label: String,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixels.
    pub data: Vec<u8>,
}

impl Texture {
    #[must_use]
    pub fn new(label: &str, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            label: label.to_string(),
            width,
            height,
            data,
        }
    }

    /// Decodes PNG / JPEG bytes into RGBA8.
    pub fn decode(label: &str, bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| anyhow::anyhow!("Failed to decode image {label}: {e}"))?;

        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        Ok(Self::new(label, width, height, rgba.into_raw()))
    }
}

/// One of the four user-selectable texture slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    BaseColor,
    /// Packed ambient-occlusion / roughness / metalness map.
    Arm,
    Normal,
    /// Height / displacement map.
    Height,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 4] = [
        TextureSlot::BaseColor,
        TextureSlot::Arm,
        TextureSlot::Normal,
        TextureSlot::Height,
    ];
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureSlot::BaseColor => "base color",
            TextureSlot::Arm => "arm",
            TextureSlot::Normal => "normal",
            TextureSlot::Height => "height",
        };
        f.write_str(name)
    }
}

/// The effective textures of the paintable material.
///
/// Always fully populated: a slot without a selection holds its default
/// handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSet {
    pub base_color: TextureHandle,
    pub arm: TextureHandle,
    pub normal: TextureHandle,
    pub height: TextureHandle,
}

impl TextureSet {
    #[inline]
    #[must_use]
    pub fn get(&self, slot: TextureSlot) -> TextureHandle {
        match slot {
            TextureSlot::BaseColor => self.base_color,
            TextureSlot::Arm => self.arm,
            TextureSlot::Normal => self.normal,
            TextureSlot::Height => self.height,
        }
    }

    #[inline]
    pub fn set(&mut self, slot: TextureSlot, handle: TextureHandle) {
        match slot {
            TextureSlot::BaseColor => self.base_color = handle,
            TextureSlot::Arm => self.arm = handle,
            TextureSlot::Normal => self.normal = handle,
            TextureSlot::Height => self.height = handle,
        }
    }
}
