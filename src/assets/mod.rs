//! Asset Loading
//!
//! - [`ResourceProvider`]: where model and texture bytes come from
//! - [`ResourceCache`]: memoized loader, at most one fetch per path
//!
//! Handles returned by the cache are plain `Copy` keys. Two callers that
//! load the same path receive equal handles.

pub mod cache;
pub mod io;
pub mod loaders;
mod storage;

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

pub use cache::ResourceCache;
pub use io::{FileResourceProvider, ResourceProvider};

// Strongly-typed handles
new_key_type! {
    pub struct TextureHandle;
    pub struct ModelHandle;
}

/// Opaque identifier of a model or texture asset. Equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as a label for decoded assets.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
