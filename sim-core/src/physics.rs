//! Per-tick motion of glyphs.
//!
//! Attached glyphs are positioned as a pure function of their swing phase.
//! Falling glyphs integrate a velocity under gravity, drag and wind drift
//! until they cross the ground line and settle. Settled glyphs only get
//! small nudges while the wind blows.

use glam::Vec2;
use rand::Rng;

use crate::{
    config::PhysicsConfig,
    error::AnimationError,
    glyph::{GlyphEntity, GlyphRegistry, GlyphState},
    types::GlyphId,
    wind::WindController,
};

#[derive(Clone, Copy, Debug)]
pub struct PhysicsIntegrator {
    cfg: PhysicsConfig,
}

impl PhysicsIntegrator {
    pub fn new(cfg: PhysicsConfig) -> Self {
        Self { cfg }
    }

    /// Advances the swing of an attached glyph.
    ///
    /// `current = original + (sin(phase) * (amplitude + gust * swing_gain),
    /// sin(phase * float_frequency) * (1 + gust * float_gain))`.
    pub fn step_attached(
        &self,
        glyph: &mut GlyphEntity,
        wind: &WindController,
        rng: &mut impl Rng,
    ) {
        debug_assert_eq!(glyph.state, GlyphState::Attached);
        glyph.swing_phase += glyph.swing_speed;

        let gust = wind.gust(rng);
        let swing = glyph.swing_phase.sin() * (glyph.swing_amplitude + gust * wind.swing_gain());
        let float = (glyph.swing_phase * self.cfg.float_frequency).sin()
            * (1.0 + gust * wind.float_gain());

        glyph.current = glyph.original() + Vec2::new(swing, float);
    }

    /// Integrates one tick of a falling glyph.
    ///
    /// Returns `true` if the glyph hit the ground and is now settled.
    pub fn step_falling(
        &self,
        glyph: &mut GlyphEntity,
        wind: &WindController,
        rng: &mut impl Rng,
    ) -> bool {
        debug_assert_eq!(glyph.state, GlyphState::Falling);
        glyph.velocity.y -= self.cfg.gravity;
        glyph.velocity.x *= self.cfg.drag;
        glyph.velocity.x += wind.drift(rng);

        glyph.current += glyph.velocity;
        glyph.rotation += glyph.rotation_speed;

        if glyph.current.y < self.cfg.ground_y {
            self.settle(glyph, rng);
            return true;
        }
        false
    }

    /// Drops a glyph onto the ground band and stops it.
    fn settle(&self, glyph: &mut GlyphEntity, rng: &mut impl Rng) {
        let j = self.cfg.settle_jitter_x;
        let (band_lo, band_hi) = self.cfg.settle_band;

        glyph.state = GlyphState::Settled;
        glyph.current.x += rng.random_range(-j..=j);
        glyph.current.y = self.cfg.ground_y + rng.random_range(band_lo..=band_hi);
        glyph.velocity = Vec2::ZERO;
    }

    /// Nudges a settled glyph while the wind blows and keeps it on screen.
    pub fn step_settled(
        &self,
        glyph: &mut GlyphEntity,
        wind: &WindController,
        rng: &mut impl Rng,
    ) {
        debug_assert_eq!(glyph.state, GlyphState::Settled);
        if wind.is_active() && rng.random_bool(self.cfg.settled_nudge_chance) {
            let n = self.cfg.settled_nudge;
            glyph.current.x += rng.random_range(-n..=n);
        }
        let limit = self.cfg.settled_x_limit;
        glyph.current.x = glyph.current.x.clamp(-limit, limit);
    }

    /// Runs the glyph part of one tick over the whole registry.
    ///
    /// 1. Attached and falling glyphs move; glyphs that reach the ground are
    ///    settled and appended to the registry's settled order.
    /// 2. Settled glyphs (including those settled in step 1) are nudged, in
    ///    settle order.
    ///
    /// ### Returns
    /// The ids that settled during this call, or
    /// [`AnimationError::NonFinite`] for the first glyph whose position
    /// stopped being finite.
    pub fn update(
        &self,
        registry: &mut GlyphRegistry,
        wind: &WindController,
        rng: &mut impl Rng,
    ) -> Result<Vec<GlyphId>, AnimationError> {
        let mut newly_settled = Vec::new();

        for id in 0..registry.glyphs.len() {
            let glyph = &mut registry.glyphs[id];
            let landed = match glyph.state {
                GlyphState::Attached => {
                    self.step_attached(glyph, wind, rng);
                    false
                }
                GlyphState::Falling => self.step_falling(glyph, wind, rng),
                GlyphState::Settled => false,
            };
            let finite = check_finite(glyph);

            // Every Settled glyph is in the settle order, even on a fault.
            if landed {
                log::debug!("'{}' settled on the ground", glyph.text);
                registry.push_settled(id);
                newly_settled.push(id);
            }
            finite?;
        }

        let settled = registry.settled().to_vec();
        for id in settled {
            let glyph = &mut registry.glyphs[id];
            self.step_settled(glyph, wind, rng);
            check_finite(glyph)?;
        }

        Ok(newly_settled)
    }
}

fn check_finite(glyph: &GlyphEntity) -> Result<(), AnimationError> {
    if glyph.current.is_finite() {
        Ok(())
    } else {
        Err(AnimationError::NonFinite {
            id: glyph.id,
            pos: glyph.current,
        })
    }
}
