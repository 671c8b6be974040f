//! The drawing boundary between the animation core and a display backend.
//!
//! The core never talks to a window directly. It issues draw calls through
//! [`Renderer`], which models a retained surface:
//! - draw calls made outside any entity become part of the static backdrop
//!   (ground, trunk, branches, blossoms);
//! - [`Renderer::clear_entity`] erases everything a glyph drew last frame,
//!   and the draw calls that follow belong to that glyph until the next
//!   `clear_entity` or [`Renderer::present_frame`].

use glam::Vec2;

use crate::{
    constants::*,
    error::{AnimationError, RenderError},
    glyph::{GlyphEntity, GlyphRegistry, GlyphState},
    tree::{SegmentKind, TreeGeometry},
    types::GlyphId,
};

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }
}

// Scene palette
pub const BACKGROUND: Color = Color::from_hex(0xF5F5F5);
pub const GROUND: Color = Color::from_hex(0x90EE90);
pub const TRUNK: Color = Color::from_hex(0x8B4513);
pub const BRANCH: Color = Color::from_hex(0x654321);
pub const BLOSSOM: Color = Color::from_hex(0xFFCCCB);
pub const ATTACHED_TEXT: Color = Color::from_hex(0xFF69B4);
pub const ATTACHED_DISC: Color = Color::from_hex(0xF0F8FF);
pub const FALLING_TEXT: Color = Color::from_hex(0xFF1493);
pub const FALLING_DISC: Color = Color::from_hex(0xFFE4E1);
pub const SETTLED_TEXT: Color = Color::from_hex(0xFF1493);

/// How a glyph is drawn. Text is always centered on its position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: u32,
    pub color: Color,
    /// Backing disc drawn under the glyph so it stays legible over branches.
    pub background: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    /// Style for a glyph in its current lifecycle state.
    pub fn for_glyph(glyph: &GlyphEntity) -> Self {
        match glyph.state {
            GlyphState::Attached => Self {
                size_px: glyph.font_size,
                color: ATTACHED_TEXT,
                background: Some(ATTACHED_DISC),
                bold: true,
            },
            GlyphState::Falling => Self {
                size_px: glyph
                    .font_size
                    .saturating_sub(2)
                    .max(MIN_FALLING_FONT_SIZE),
                color: FALLING_TEXT,
                background: Some(FALLING_DISC),
                bold: true,
            },
            GlyphState::Settled => Self {
                size_px: SETTLED_FONT_SIZE,
                color: SETTLED_TEXT,
                background: None,
                bold: false,
            },
        }
    }
}

/// A display backend the animation draws into.
pub trait Renderer {
    /// Checks that the surface can be drawn to. Called once before the first
    /// tick; an error here is fatal.
    fn prepare(&mut self) -> Result<(), AnimationError> {
        Ok(())
    }

    fn draw_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draws `text` centered on `pos`. A `style.background` is drawn as a
    /// disc of radius [`BACKING_DISC_RADIUS`] under the text.
    fn draw_text(&mut self, pos: Vec2, text: char, style: &TextStyle);

    /// Erases the previous frame's contribution of `entity`.
    fn clear_entity(&mut self, entity: GlyphId);

    /// Makes the current draw calls visible.
    fn present_frame(&mut self) -> Result<(), RenderError>;
}

/// Draws the static part of the scene: ground band, then the tree.
pub fn draw_backdrop(renderer: &mut impl Renderer, tree: &TreeGeometry, ground_y: f32) {
    let mid = ground_y - GROUND_DEPTH / 2.0;
    renderer.draw_segment(
        Vec2::new(-GROUND_HALF_WIDTH, mid),
        Vec2::new(GROUND_HALF_WIDTH, mid),
        GROUND_DEPTH,
        GROUND,
    );

    for seg in &tree.segments {
        let color = match seg.kind {
            SegmentKind::Trunk => TRUNK,
            SegmentKind::Branch => BRANCH,
        };
        renderer.draw_segment(seg.from, seg.to, seg.thickness, color);
    }

    for &bud in &tree.blossoms {
        renderer.draw_filled_circle(bud, BLOSSOM_RADIUS, BLOSSOM);
    }
}

/// Redraws one glyph at its current position.
pub fn draw_glyph(renderer: &mut impl Renderer, glyph: &GlyphEntity) {
    renderer.clear_entity(glyph.id);
    renderer.draw_text(glyph.current, glyph.text, &TextStyle::for_glyph(glyph));
}

/// Redraws every glyph: tree and falling glyphs in registry order, then the
/// settled pile in the order it formed.
pub fn draw_glyphs(renderer: &mut impl Renderer, registry: &GlyphRegistry) {
    for glyph in registry
        .glyphs
        .iter()
        .filter(|g| g.state != GlyphState::Settled)
    {
        draw_glyph(renderer, glyph);
    }
    for &id in registry.settled() {
        draw_glyph(renderer, &registry.glyphs[id]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttachmentPoint;
    use rand::{SeedableRng, rngs::StdRng};

    #[derive(Default)]
    struct Tally {
        segments: usize,
        circles: usize,
        texts: Vec<(char, TextStyle)>,
        cleared: Vec<GlyphId>,
    }

    impl Renderer for Tally {
        fn draw_segment(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {
            self.segments += 1;
        }
        fn draw_filled_circle(&mut self, _: Vec2, _: f32, _: Color) {
            self.circles += 1;
        }
        fn draw_text(&mut self, _: Vec2, text: char, style: &TextStyle) {
            self.texts.push((text, *style));
        }
        fn clear_entity(&mut self, entity: GlyphId) {
            self.cleared.push(entity);
        }
        fn present_frame(&mut self) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn hex_colors_unpack() {
        assert_eq!(Color::from_hex(0xFF69B4), Color { r: 255, g: 105, b: 180 });
        assert_eq!(BACKGROUND, Color { r: 245, g: 245, b: 245 });
    }

    #[test]
    fn style_follows_lifecycle() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut g = GlyphEntity::new(0, '梅', AttachmentPoint::new(50.0, 0.0, 2), &mut rng);
        assert_eq!(g.font_size, 12);

        let s = TextStyle::for_glyph(&g);
        assert_eq!((s.size_px, s.color, s.bold), (12, ATTACHED_TEXT, true));
        assert_eq!(s.background, Some(ATTACHED_DISC));

        g.detach(Vec2::ZERO);
        let s = TextStyle::for_glyph(&g);
        assert_eq!((s.size_px, s.color), (10, FALLING_TEXT));
        assert_eq!(s.background, Some(FALLING_DISC));

        g.font_size = 9;
        assert_eq!(TextStyle::for_glyph(&g).size_px, 8);

        g.state = GlyphState::Settled;
        let s = TextStyle::for_glyph(&g);
        assert_eq!((s.size_px, s.background, s.bold), (10, None, false));
    }

    #[test]
    fn backdrop_draws_ground_tree_and_blossoms() {
        let mut tree = TreeGeometry::new();
        tree.blossoms.push(Vec2::new(1.0, 2.0));
        tree.blossoms.push(Vec2::new(3.0, 4.0));
        tree.segments.push(crate::tree::Segment {
            from: Vec2::ZERO,
            to: Vec2::Y,
            thickness: 12.0,
            kind: SegmentKind::Trunk,
        });

        let mut tally = Tally::default();
        draw_backdrop(&mut tally, &tree, -200.0);
        assert_eq!(tally.segments, 2);
        assert_eq!(tally.circles, 2);
        assert!(tally.cleared.is_empty());
    }

    #[test]
    fn settled_glyphs_draw_last_in_settle_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let points: Vec<AttachmentPoint> = (0..3)
            .map(|i| AttachmentPoint::new(50.0, 10.0 * i as f32, 5))
            .collect();
        let mut reg = GlyphRegistry::place("甲乙丙".chars(), &points, &mut rng);
        for id in [2, 0] {
            reg.glyphs[id].state = GlyphState::Settled;
            reg.push_settled(id);
        }

        let mut tally = Tally::default();
        draw_glyphs(&mut tally, &reg);
        assert_eq!(tally.cleared, vec![1, 2, 0]);
        let texts: String = tally.texts.iter().map(|(c, _)| *c).collect();
        assert_eq!(texts, "乙丙甲");
    }
}
