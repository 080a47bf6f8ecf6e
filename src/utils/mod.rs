//! Utility Module
//!
//! - [`OrbitControls`]: bounded orbit / dolly camera controller

pub mod orbit_control;

pub use orbit_control::{OrbitControls, OrbitInput};
