//! Core of the falling-glyph blossom animation.
//!
//! Main components:
//! - [`branch`] - recursive branching that grows the tree geometry.
//! - [`attachment`] - selection and scattering of glyph anchor points.
//! - [`glyph`] - glyph entities, their lifecycle and the registry.
//! - [`wind`] - the decaying wind impulse that knocks glyphs loose.
//! - [`physics`] - per-tick swing, fall and settle integration.
//! - [`animation`] - the tick loop, intents and frame pacing.
//! - [`render`] - the drawing boundary and scene styling.
//! - [`config`] / [`constants`] - tunable parameters.
//! - [`tree`] / [`types`] - shared geometry types and IDs.

pub mod animation;
pub mod attachment;
pub mod branch;
pub mod config;
pub mod constants;
pub mod error;
pub mod glyph;
pub mod palette;
pub mod physics;
pub mod render;
pub mod tree;
pub mod types;
pub mod wind;
