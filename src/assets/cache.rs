//! Memoized Resource Loading
//!
//! [`ResourceCache`] maps a [`ResourcePath`] to a loaded handle and
//! guarantees that a path is fetched at most once for the lifetime of the
//! cache:
//!
//! - Once loaded, every caller receives the same handle without suspending.
//! - While a load is in flight, later callers join the same shared future
//!   instead of starting a second fetch.
//! - A failed load is delivered to every waiter and then forgotten, so the
//!   next call retries.
//!
//! There is no eviction and no cancellation. A caller that stops waiting
//! simply drops its clone of the shared future.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use slotmap::Key;

use crate::assets::io::ResourceProvider;
use crate::assets::loaders;
use crate::assets::storage::AssetStorage;
use crate::assets::{ModelHandle, ResourcePath, TextureHandle};
use crate::errors::ResourceLoadError;
use crate::resources::texture::Texture;
use crate::scene::model::ModelAsset;

type SharedLoad<H> = Shared<BoxFuture<'static, Result<H, ResourceLoadError>>>;

/// Storage plus the table of in-flight loads for one asset kind.
struct Memo<H: Key, T> {
    storage: Arc<AssetStorage<H, T>>,
    in_flight: Arc<Mutex<FxHashMap<ResourcePath, SharedLoad<H>>>>,
}

impl<H, T> Memo<H, T>
where
    H: Key + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn new() -> Self {
        Self {
            storage: Arc::new(AssetStorage::new()),
            in_flight: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    async fn load<F, Fut>(&self, path: &ResourcePath, start: F) -> Result<H, ResourceLoadError>
    where
        F: FnOnce(ResourcePath) -> Fut,
        Fut: Future<Output = Result<T, ResourceLoadError>> + Send + 'static,
    {
        let load = {
            if let Some(handle) = self.storage.get_handle_by_path(path) {
                log::debug!("Cache hit: {path}");
                return Ok(handle);
            }

            let mut in_flight = self.in_flight.lock();

            // A load may have finished between the check above and taking the lock.
            if let Some(handle) = self.storage.get_handle_by_path(path) {
                return Ok(handle);
            }

            if let Some(load) = in_flight.get(path) {
                log::debug!("Joining in-flight load: {path}");
                load.clone()
            } else {
                log::debug!("Cache miss, fetching: {path}");
                let load = self.spawn(path.clone(), start(path.clone()));
                in_flight.insert(path.clone(), load.clone());
                load
            }
        };

        load.await
    }

    fn spawn<Fut>(&self, path: ResourcePath, fetch: Fut) -> SharedLoad<H>
    where
        Fut: Future<Output = Result<T, ResourceLoadError>> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        let in_flight = Arc::clone(&self.in_flight);

        async move {
            let result = fetch
                .await
                .map(|asset| storage.add_with_path(path.clone(), asset));

            if let Err(err) = &result {
                log::warn!("{err}");
            }

            // Success is now answered by the storage; failure must not be cached.
            in_flight.lock().remove(&path);
            result
        }
        .boxed()
        .shared()
    }
}

/// Process-lifetime loader and cache for textures and models.
///
/// Cloning the surrounding `Arc` is the intended way to share one cache
/// between configurator instances.
pub struct ResourceCache<P: ResourceProvider> {
    provider: Arc<P>,
    textures: Memo<TextureHandle, Texture>,
    models: Memo<ModelHandle, ModelAsset>,
}

impl<P: ResourceProvider> ResourceCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            textures: Memo::new(),
            models: Memo::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Loads (or joins the load of) the texture at `path`.
    pub async fn load_texture(&self, path: &ResourcePath) -> Result<TextureHandle, ResourceLoadError> {
        let provider = Arc::clone(&self.provider);
        self.textures
            .load(path, move |path| async move {
                let bytes = provider
                    .fetch_texture(&path)
                    .await
                    .map_err(|e| ResourceLoadError::new(path.clone(), format!("{e:#}")))?;
                Texture::decode(path.file_name(), &bytes)
                    .map_err(|e| ResourceLoadError::new(path.clone(), format!("{e:#}")))
            })
            .await
    }

    /// Loads (or joins the load of) the model at `path`.
    pub async fn load_model(&self, path: &ResourcePath) -> Result<ModelHandle, ResourceLoadError> {
        let provider = Arc::clone(&self.provider);
        self.models
            .load(path, move |path| async move {
                let bytes = provider
                    .fetch_model(&path)
                    .await
                    .map_err(|e| ResourceLoadError::new(path.clone(), format!("{e:#}")))?;
                let asset = loaders::decode_model(path.file_name(), &bytes)
                    .map_err(|e| ResourceLoadError::new(path.clone(), format!("{e:#}")))?;
                log::info!("Loaded model {path} ({} nodes)", asset.nodes.len());
                Ok(asset)
            })
            .await
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<Arc<Texture>> {
        self.textures.storage.get(handle)
    }

    pub fn model(&self, handle: ModelHandle) -> Option<Arc<ModelAsset>> {
        self.models.storage.get(handle)
    }

    /// Whether `path` has finished loading as a texture or a model.
    #[must_use]
    pub fn is_cached(&self, path: &ResourcePath) -> bool {
        self.textures.storage.get_handle_by_path(path).is_some()
            || self.models.storage.get_handle_by_path(path).is_some()
    }

    /// Number of loads currently in flight.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.textures.in_flight.lock().len() + self.models.in_flight.lock().len()
    }

    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.storage.len()
    }
}
