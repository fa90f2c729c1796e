//! Glint Core - Scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraConfig`,
//!   `RenderSettings`, `SphereDesc`, `MaterialDesc`
//! - **JSON loading**: scene file parsing with validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres", scene.sphere_count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use scene::{
    CameraConfig, MaterialDesc, RenderSettings, SceneDescription, SphereDesc, DEFAULT_T_MIN,
    MAX_IMAGE_DIMENSION,
};
