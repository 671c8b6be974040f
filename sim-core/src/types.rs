use glam::Vec2;

/// Identifier for a glyph in a [`crate::glyph::GlyphRegistry`].
///
/// This is an index into `GlyphRegistry::glyphs`. Renderers also use it as
/// the entity handle passed to [`crate::render::Renderer::clear_entity`].
pub type GlyphId = usize;

/// A candidate location on the generated branch structure.
///
/// `depth` is the recursion depth the point was recorded at; deeper points
/// sit on thinner branches and get smaller glyphs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttachmentPoint {
    pub pos: Vec2,
    pub depth: u32,
}

impl AttachmentPoint {
    pub fn new(x: f32, y: f32, depth: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            depth,
        }
    }
}
