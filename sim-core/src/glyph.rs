//! Glyph entities and the registry that owns them.

use glam::Vec2;
use rand::Rng;

use crate::{
    constants::*,
    types::{AttachmentPoint, GlyphId},
};

/// Lifecycle of a glyph. Transitions only run forward, except on reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphState {
    Attached,
    Falling,
    Settled,
}

#[derive(Clone, Debug)]
pub struct GlyphEntity {
    pub id: GlyphId,
    pub text: char,
    pub state: GlyphState,
    /// Anchor on the tree. Never changes after placement.
    original: Vec2,
    pub current: Vec2,
    pub velocity: Vec2,
    pub swing_phase: f32,
    pub swing_speed: f32,
    pub swing_amplitude: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub depth: u32,
    pub font_size: u32,
}

impl GlyphEntity {
    /// Creates an attached glyph anchored at `point`.
    ///
    /// The initial swing phase is staggered by the glyph's index so
    /// neighbours do not sway in lockstep.
    pub fn new(id: GlyphId, text: char, point: AttachmentPoint, rng: &mut impl Rng) -> Self {
        Self {
            id,
            text,
            state: GlyphState::Attached,
            original: point.pos,
            current: point.pos,
            velocity: Vec2::ZERO,
            swing_phase: id as f32 * PHASE_STEP_PER_GLYPH,
            swing_speed: rng.random_range(SWING_SPEED[0]..=SWING_SPEED[1]),
            swing_amplitude: rng.random_range(SWING_AMPLITUDE[0]..=SWING_AMPLITUDE[1]),
            rotation: 0.0,
            rotation_speed: rng.random_range(ROTATION_SPEED[0]..=ROTATION_SPEED[1]),
            depth: point.depth,
            font_size: font_size_for_depth(point.depth),
        }
    }

    #[inline]
    pub fn original(&self) -> Vec2 {
        self.original
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.state == GlyphState::Attached
    }

    /// Starts the fall with the given launch velocity.
    ///
    /// Returns `false` (and changes nothing) unless the glyph is attached.
    pub fn detach(&mut self, launch: Vec2) -> bool {
        if self.state != GlyphState::Attached {
            return false;
        }
        self.state = GlyphState::Falling;
        self.velocity = launch;
        true
    }

    fn restore(&mut self) {
        self.state = GlyphState::Attached;
        self.current = self.original;
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
    }
}

/// Font size in pixels for a glyph hanging at `depth`.
pub fn font_size_for_depth(depth: u32) -> u32 {
    BASE_FONT_SIZE.saturating_sub(depth).max(MIN_FONT_SIZE)
}

/// Owns every glyph of the scene plus the order in which they settled.
#[derive(Clone, Debug, Default)]
pub struct GlyphRegistry {
    pub glyphs: Vec<GlyphEntity>,
    settled: Vec<GlyphId>,
}

impl GlyphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places one glyph per attachment point, consuming `texts` in order.
    ///
    /// When there are fewer points than texts the surplus texts are dropped;
    /// each point is used at most once.
    pub fn place(
        texts: impl IntoIterator<Item = char>,
        points: &[AttachmentPoint],
        rng: &mut impl Rng,
    ) -> Self {
        let glyphs: Vec<GlyphEntity> = texts
            .into_iter()
            .zip(points)
            .enumerate()
            .map(|(id, (text, &point))| GlyphEntity::new(id, text, point, rng))
            .collect();

        log::info!("placed {} glyphs on the tree", glyphs.len());

        Self {
            glyphs,
            settled: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn count(&self, state: GlyphState) -> usize {
        self.glyphs.iter().filter(|g| g.state == state).count()
    }

    pub fn attached_ids(&self) -> Vec<GlyphId> {
        self.glyphs
            .iter()
            .filter(|g| g.is_attached())
            .map(|g| g.id)
            .collect()
    }

    /// Ids of settled glyphs, in the order they reached the ground.
    pub fn settled(&self) -> &[GlyphId] {
        &self.settled
    }

    /// Records that `id` has just settled.
    pub(crate) fn push_settled(&mut self, id: GlyphId) {
        debug_assert_eq!(self.glyphs[id].state, GlyphState::Settled);
        self.settled.push(id);
    }

    /// Returns every glyph to its anchor in the attached state.
    pub fn reset(&mut self) {
        for glyph in &mut self.glyphs {
            glyph.restore();
        }
        self.settled.clear();
    }
}
