//! JSON scene loading.
//!
//! Scene files are deserialized with serde and validated before being
//! handed to the renderer, so the rendering core never sees a sphere with
//! a non-positive radius or an out-of-range material parameter.

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur during scene loading and validation.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid sphere #{index}: {reason}")]
    InvalidSphere { index: usize, reason: String },

    #[error("Invalid material on sphere #{index}: {reason}")]
    InvalidMaterial { index: usize, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid render settings: {0}")]
    InvalidRender(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&content)?;

    log::info!(
        "Loaded scene from {:?}: {} spheres, {}x{} @ {} spp",
        path,
        scene.sphere_count(),
        scene.render.image_width,
        scene.image_height(),
        scene.render.samples_per_pixel
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(content: &str) -> SceneResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(content)?;
    scene.validate()?;
    Ok(scene)
}
