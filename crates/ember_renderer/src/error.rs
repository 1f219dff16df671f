//! Error type shared by the renderer.

use thiserror::Error;

/// Errors that abort a render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A hit record was requested for a surface that carries no material.
    #[error("Invalid material: surface hit without a material")]
    InvalidMaterial,

    #[error("Invalid camera configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
