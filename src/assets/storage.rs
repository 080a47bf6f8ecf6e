use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use std::sync::Arc;

use crate::assets::ResourcePath;

struct StorageInner<H: Key, T> {
    map: SlotMap<H, Arc<T>>,
    lookup: FxHashMap<ResourcePath, H>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }
}

/// Thread-safe container of decoded assets, keyed by the path they were
/// loaded from.
///
/// Assets are never mutated or removed once stored; the storage lives as
/// long as the owning [`ResourceCache`](crate::assets::ResourceCache).
pub(crate) struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// Adds an asset loaded from `path`.
    ///
    /// If the path is already stored the existing handle is returned and
    /// `asset` is dropped.
    pub fn add_with_path(&self, path: ResourcePath, asset: impl Into<T>) -> H {
        let mut guard = self.inner.write();
        if let Some(&handle) = guard.lookup.get(&path) {
            return handle;
        }
        let handle = guard.map.insert(Arc::new(asset.into()));
        guard.lookup.insert(path, handle);
        handle
    }

    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        self.inner.read().map.get(handle).cloned()
    }

    pub fn get_handle_by_path(&self, path: &ResourcePath) -> Option<H> {
        self.inner.read().lookup.get(path).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }
}
