//! The process-wide wind impulse.
//!
//! A trigger knocks a random share of the attached glyphs loose and raises
//! the wind strength, which then decays a little every tick until it drops
//! below the calm threshold.

use glam::Vec2;
use rand::{Rng, seq::index};

use crate::{config::WindConfig, glyph::GlyphRegistry, types::GlyphId};

/// Current wind. `strength` is never negative and is zero whenever
/// `active` is false.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindState {
    pub active: bool,
    pub strength: f32,
}

#[derive(Clone, Debug)]
pub struct WindController {
    cfg: WindConfig,
    state: WindState,
}

impl WindController {
    pub fn new(cfg: WindConfig) -> Self {
        Self {
            cfg,
            state: WindState::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> WindState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    #[inline]
    pub fn strength(&self) -> f32 {
        self.state.strength
    }

    /// Raises the wind and detaches a random sample of attached glyphs.
    ///
    /// Out of `N` attached glyphs, `max(1, floor(N * f))` are detached where
    /// `f` is drawn from `WindConfig::fall_fraction`. Each detached glyph
    /// gets a launch velocity drawn from `launch_velocity_x` and
    /// `launch_velocity_y`.
    ///
    /// ### Returns
    /// The ids of the glyphs that started falling, in ascending order.
    pub fn trigger(&mut self, registry: &mut GlyphRegistry, rng: &mut impl Rng) -> Vec<GlyphId> {
        self.state = WindState {
            active: true,
            strength: self.cfg.initial_strength,
        };

        let attached = registry.attached_ids();
        if attached.is_empty() {
            log::info!("wind rises, but nothing is left on the tree");
            return Vec::new();
        }

        let count = fall_count(attached.len(), &self.cfg, rng);
        let mut picked: Vec<GlyphId> = index::sample(rng, attached.len(), count)
            .iter()
            .map(|i| attached[i])
            .collect();
        picked.sort_unstable();

        let (vx_lo, vx_hi) = self.cfg.launch_velocity_x;
        let (vy_lo, vy_hi) = self.cfg.launch_velocity_y;
        for &id in &picked {
            let launch = Vec2::new(
                rng.random_range(vx_lo..=vx_hi),
                rng.random_range(vy_lo..=vy_hi),
            );
            registry.glyphs[id].detach(launch);
        }

        log::info!(
            "wind rises: {} of {} attached glyphs let go",
            picked.len(),
            attached.len()
        );
        picked
    }

    /// Per-tick exponential decay. No-op while calm.
    pub fn decay(&mut self) {
        if !self.state.active {
            return;
        }
        self.state.strength *= self.cfg.decay;
        if self.state.strength < self.cfg.calm_threshold {
            self.clear();
            log::debug!("wind has died down");
        }
    }

    pub fn clear(&mut self) {
        self.state = WindState::default();
    }

    /// Wind effect on an attached glyph for this tick.
    ///
    /// `strength` scaled by a random gust factor, or `0` when calm.
    pub fn gust(&self, rng: &mut impl Rng) -> f32 {
        if !self.state.active {
            return 0.0;
        }
        let (lo, hi) = self.cfg.gust;
        self.state.strength * rng.random_range(lo..=hi)
    }

    /// Horizontal acceleration on a falling glyph for this tick.
    pub fn drift(&self, rng: &mut impl Rng) -> f32 {
        if !self.state.active {
            return 0.0;
        }
        let d = self.cfg.fall_drift;
        rng.random_range(-d..=d) * self.state.strength
    }

    pub fn swing_gain(&self) -> f32 {
        self.cfg.swing_gain
    }

    pub fn float_gain(&self) -> f32 {
        self.cfg.float_gain
    }

    /// Number of [`decay`](Self::decay) calls until the wind is calm.
    ///
    /// Closed form `ceil(ln(threshold / strength) / ln(decay))`; `0` when
    /// already calm.
    pub fn ticks_until_calm(&self) -> u32 {
        if !self.state.active || self.state.strength < self.cfg.calm_threshold {
            return 0;
        }
        let ratio = f64::from(self.cfg.calm_threshold) / f64::from(self.state.strength);
        let ticks = (ratio.ln() / f64::from(self.cfg.decay).ln()).ceil();
        (ticks as u32).max(1)
    }
}

/// How many of `attached` glyphs one trigger detaches.
fn fall_count(attached: usize, cfg: &WindConfig, rng: &mut impl Rng) -> usize {
    let (lo, hi) = cfg.fall_fraction;
    let fraction = rng.random_range(lo..=hi);
    ((attached as f32 * fraction) as usize).clamp(1, attached)
}
