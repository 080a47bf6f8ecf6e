//! Error Types
//!
//! This module defines the error types used throughout the configurator.
//!
//! # Overview
//!
//! The main error type [`Error`] covers:
//! - Model and texture fetch / decode failures ([`ResourceLoadError`])
//! - Out-of-range rotation presets coming from caller input
//! - Operations issued before the configurator reached `Ready`
//! - Settings parsing failures
//!
//! None of these is fatal to a configurator session. The worst degraded
//! state is a default material or an unpainted model.
//!
//! ```rust,ignore
//! use configurator::errors::Result;
//!
//! fn reload() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::assets::ResourcePath;

/// A model or texture could not be fetched or decoded.
///
/// `Clone` so that a single in-flight failure can be delivered to every
/// waiter of the shared load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load resource {path}: {cause}")]
pub struct ResourceLoadError {
    /// The path that failed to load
    pub path: ResourcePath,
    /// Human readable cause (IO, HTTP, decode...)
    pub cause: String,
}

impl ResourceLoadError {
    pub fn new(path: ResourcePath, cause: impl Into<String>) -> Self {
        Self {
            path,
            cause: cause.into(),
        }
    }
}

/// The main error type for the configurator.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Resource Errors
    // ========================================================================
    /// Model or texture fetch / decode failure.
    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A rotation preset index outside `0..=2`.
    #[error("Invalid rotation preset: {0}")]
    InvalidRotationPreset(i64),

    // ========================================================================
    // Settings Errors
    // ========================================================================
    /// Settings file could not be read or parsed.
    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Settings(err.to_string())
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
