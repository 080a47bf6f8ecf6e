use std::future::Future;
use std::path::{Component, Path, PathBuf};

use crate::assets::ResourcePath;

/// Source of raw model and texture bytes.
///
/// Implementations may suspend while bytes are fetched. Failures are
/// reported as `anyhow` errors and surface to callers of the
/// [`ResourceCache`](crate::assets::ResourceCache) as
/// [`ResourceLoadError`](crate::errors::ResourceLoadError).
pub trait ResourceProvider: Send + Sync + 'static {
    fn fetch_model(
        &self,
        path: &ResourcePath,
    ) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;

    fn fetch_texture(
        &self,
        path: &ResourcePath,
    ) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Reads assets from a local directory.
///
/// Web-style absolute paths (`/Project_textures/a.jpg`) are resolved
/// relative to the root directory.
pub struct FileResourceProvider {
    root_path: PathBuf,
}

impl FileResourceProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Maps a resource path under the root. Paths that would leave the root
    /// are rejected.
    pub fn resolve(&self, path: &ResourcePath) -> anyhow::Result<PathBuf> {
        let relative = Path::new(path.as_str().trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            anyhow::bail!("resource path {path} escapes the asset root");
        }
        Ok(self.root_path.join(relative))
    }

    async fn read(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        let data = tokio::fs::read(&full_path).await.map_err(|e| {
            anyhow::anyhow!("reading {}: {e}", full_path.display())
        })?;
        Ok(data)
    }
}

impl ResourceProvider for FileResourceProvider {
    async fn fetch_model(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        self.read(path).await
    }

    async fn fetch_texture(&self, path: &ResourcePath) -> anyhow::Result<Vec<u8>> {
        self.read(path).await
    }
}
