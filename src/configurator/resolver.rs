//! Texture Selection Resolver
//!
//! Turns four optional override paths into a fully populated
//! [`TextureSet`]. The slots resolve concurrently and the set is produced
//! once all four have settled. A slot whose override fails to load falls
//! back to its default; the other slots are unaffected.

use crate::assets::{ResourceCache, ResourcePath, ResourceProvider, TextureHandle};
use crate::errors::ResourceLoadError;
use crate::resources::texture::{TextureSet, TextureSlot};

/// User texture selections. `None` selects the default texture of the slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureOverrides {
    pub base_color: Option<ResourcePath>,
    pub arm: Option<ResourcePath>,
    pub normal: Option<ResourcePath>,
    pub height: Option<ResourcePath>,
}

impl TextureOverrides {
    #[inline]
    #[must_use]
    pub fn get(&self, slot: TextureSlot) -> Option<&ResourcePath> {
        match slot {
            TextureSlot::BaseColor => self.base_color.as_ref(),
            TextureSlot::Arm => self.arm.as_ref(),
            TextureSlot::Normal => self.normal.as_ref(),
            TextureSlot::Height => self.height.as_ref(),
        }
    }

    pub fn set(&mut self, slot: TextureSlot, path: Option<ResourcePath>) {
        match slot {
            TextureSlot::BaseColor => self.base_color = path,
            TextureSlot::Arm => self.arm = path,
            TextureSlot::Normal => self.normal = path,
            TextureSlot::Height => self.height = path,
        }
    }

    #[must_use]
    pub fn with(mut self, slot: TextureSlot, path: impl Into<ResourcePath>) -> Self {
        self.set(slot, Some(path.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        TextureSlot::ALL.iter().all(|&slot| self.get(slot).is_none())
    }
}

/// A previously applied selection, reused for slots whose path is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSelection {
    pub overrides: TextureOverrides,
    pub textures: TextureSet,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub textures: TextureSet,
    /// Overrides that failed to load and fell back to their default.
    pub failures: Vec<ResourceLoadError>,
}

async fn resolve_slot<P: ResourceProvider>(
    cache: &ResourceCache<P>,
    slot: TextureSlot,
    overrides: &TextureOverrides,
    defaults: &TextureSet,
    previous: Option<&AppliedSelection>,
) -> (TextureHandle, Option<ResourceLoadError>) {
    let Some(path) = overrides.get(slot) else {
        return (defaults.get(slot), None);
    };

    // A failed override is stored next to the default handle; retry it.
    if let Some(prev) = previous {
        let handle = prev.textures.get(slot);
        if prev.overrides.get(slot) == Some(path) && handle != defaults.get(slot) {
            return (handle, None);
        }
    }

    match cache.load_texture(path).await {
        Ok(handle) => (handle, None),
        Err(err) => {
            log::warn!("Texture slot {slot} falls back to default: {err}");
            (defaults.get(slot), Some(err))
        }
    }
}

/// Resolves every slot, loading only overrides that differ from `previous`
/// or that failed to load last time.
pub async fn resolve<P: ResourceProvider>(
    cache: &ResourceCache<P>,
    overrides: &TextureOverrides,
    defaults: &TextureSet,
    previous: Option<&AppliedSelection>,
) -> Resolution {
    let (base_color, arm, normal, height) = futures::join!(
        resolve_slot(cache, TextureSlot::BaseColor, overrides, defaults, previous),
        resolve_slot(cache, TextureSlot::Arm, overrides, defaults, previous),
        resolve_slot(cache, TextureSlot::Normal, overrides, defaults, previous),
        resolve_slot(cache, TextureSlot::Height, overrides, defaults, previous),
    );

    let failures = [&base_color, &arm, &normal, &height]
        .into_iter()
        .filter_map(|(_, err)| err.clone())
        .collect();

    Resolution {
        textures: TextureSet {
            base_color: base_color.0,
            arm: arm.0,
            normal: normal.0,
            height: height.0,
        },
        failures,
    }
}
