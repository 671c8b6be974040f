//! Error types for the animation core.
//!
//! The policy is narrow: startup failures are reported once and the loop is
//! never entered; failures during a tick stop the loop as if the user had
//! quit. Nothing is retried.

use glam::Vec2;
use thiserror::Error;

use crate::types::GlyphId;

/// Failures reported by a [`crate::render::Renderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface went away (window closed, context lost).
    #[error("render surface lost")]
    SurfaceLost,
    #[error("render backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),
    #[error("input source unavailable: {0}")]
    InputUnavailable(String),
    /// A glyph's position stopped being a finite number during a tick.
    #[error("glyph {id} left the finite plane at {pos}")]
    NonFinite { id: GlyphId, pos: Vec2 },
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AnimationError {
    /// Whether this error can only happen before the first tick.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            AnimationError::RendererUnavailable(_) | AnimationError::InputUnavailable(_)
        )
    }
}
