//! Tick orchestration for the blossom scene.
//!
//! [`AnimationContext`] owns all mutable scene state and is lent to
//! [`AnimationLoop`] for the duration of a tick. Input only ever enqueues
//! [`Intent`]s; they are applied at the start of the next tick, so a tick is
//! the unit of mutation and quitting can never leave half a tick behind.
//!
//! Each tick runs, in order:
//! 1. queued intents (wind, reset, quit);
//! 2. physics for attached and falling glyphs, with ground collisions;
//! 3. nudges for settled glyphs;
//! 4. wind decay;
//! 5. glyph redraw and frame presentation.

use std::{
    collections::VecDeque,
    thread,
    time::{Duration, Instant},
};

use rand::rngs::StdRng;

use crate::{
    attachment,
    branch::BranchGenerator,
    config::SceneConfig,
    error::AnimationError,
    glyph::{GlyphRegistry, GlyphState},
    palette,
    physics::PhysicsIntegrator,
    render::{self, Renderer},
    tree::TreeGeometry,
    types::GlyphId,
    wind::WindController,
};

/// Discrete requests from the user, applied at tick boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    TriggerWind,
    ResetScene,
    Quit,
}

/// Delivers user intents to the loop.
pub trait InputSource {
    /// Checks that input can be received. Called once before the first
    /// tick; an error here is fatal.
    fn connect(&mut self) -> Result<(), AnimationError> {
        Ok(())
    }

    /// Returns the intents that arrived since the last poll.
    fn poll(&mut self) -> Vec<Intent>;
}

/// All scene state, owned by whoever drives the animation.
#[derive(Debug)]
pub struct AnimationContext {
    pub config: SceneConfig,
    pub tree: TreeGeometry,
    pub registry: GlyphRegistry,
    pub wind: WindController,
    pub physics: PhysicsIntegrator,
    pub rng: StdRng,
    pub tick: u64,
}

impl AnimationContext {
    /// Grows the tree and hangs the `palette` glyphs on it.
    ///
    /// If the tree offers fewer usable points than the palette has glyphs,
    /// the palette is truncated.
    pub fn build(config: SceneConfig, palette: &str, mut rng: StdRng) -> Self {
        let tree = BranchGenerator::new(config.tree).grow_tree(&mut rng);

        let texts: Vec<char> = palette::glyphs(palette).collect();
        let points = attachment::filter(&tree.points, &config.placement, texts.len(), &mut rng);
        if points.len() < texts.len() {
            log::debug!(
                "only {} of {} palette glyphs fit on the tree",
                points.len(),
                texts.len()
            );
        }
        let registry = GlyphRegistry::place(texts, &points, &mut rng);

        Self {
            config,
            tree,
            registry,
            wind: WindController::new(config.wind),
            physics: PhysicsIntegrator::new(config.physics),
            rng,
            tick: 0,
        }
    }

    pub fn trigger_wind(&mut self) -> Vec<GlyphId> {
        self.wind.trigger(&mut self.registry, &mut self.rng)
    }

    /// Puts every glyph back on the tree and calms the wind.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.wind.clear();
        log::info!("scene reset");
    }

    pub fn counts(&self) -> GlyphCounts {
        GlyphCounts {
            attached: self.registry.count(GlyphState::Attached),
            falling: self.registry.count(GlyphState::Falling),
            settled: self.registry.count(GlyphState::Settled),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphCounts {
    pub attached: usize,
    pub falling: usize,
    pub settled: usize,
}

/// Best-effort fixed cadence between ticks.
#[derive(Clone, Debug)]
pub struct FramePacer {
    interval: Duration,
    last_instant: Option<Instant>,
    last_time: Option<f64>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_instant: None,
            last_time: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps until one interval has passed since the previous call.
    ///
    /// Only [`AnimationLoop::run`] blocks; frontends with their own event
    /// loop use [`FramePacer::due`].
    fn wait(&mut self) {
        if let Some(last) = self.last_instant {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_instant = Some(Instant::now());
    }

    /// Non-blocking variant for frontends that own the clock.
    ///
    /// Returns `true` (and restarts the interval) if at least one interval
    /// has passed since the last `true`, given the frontend time `now` in
    /// seconds.
    pub fn due(&mut self, now: f64) -> bool {
        match self.last_time {
            Some(last) if now - last < self.interval.as_secs_f64() => false,
            _ => {
                self.last_time = Some(now);
                true
            }
        }
    }
}

/// What a call to [`AnimationLoop::tick`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scene advanced one tick; `settled` lists glyphs that landed.
    Advanced { settled: Vec<GlyphId> },
    /// A quit intent was applied; nothing was mutated.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    /// A tick failed; the error was logged and the loop stopped.
    Fault,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub reason: StopReason,
}

pub struct AnimationLoop {
    pending: VecDeque<Intent>,
    running: bool,
    pacer: FramePacer,
}

impl AnimationLoop {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            running: true,
            pacer: FramePacer::new(tick_interval),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pacer_mut(&mut self) -> &mut FramePacer {
        &mut self.pacer
    }

    /// Enqueues an intent for the next tick boundary.
    pub fn queue(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    /// Verifies both collaborators and draws the opening frame.
    pub fn start(
        &mut self,
        ctx: &AnimationContext,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
    ) -> Result<(), AnimationError> {
        renderer.prepare()?;
        input.connect()?;

        render::draw_backdrop(renderer, &ctx.tree, ctx.config.physics.ground_y);
        render::draw_glyphs(renderer, &ctx.registry);
        renderer.present_frame()?;

        log::info!(
            "animation started with {} glyphs: space for wind, R to reset, Esc to quit",
            ctx.registry.len()
        );
        Ok(())
    }

    fn apply_intents(&mut self, ctx: &mut AnimationContext) {
        while let Some(intent) = self.pending.pop_front() {
            match intent {
                Intent::TriggerWind => {
                    ctx.trigger_wind();
                }
                Intent::ResetScene => ctx.reset(),
                Intent::Quit => {
                    log::info!("quit requested after {} ticks", ctx.tick);
                    self.running = false;
                    self.pending.clear();
                }
            }
        }
    }

    /// Runs one tick.
    ///
    /// Returns [`TickOutcome::Stopped`] without touching the scene once a
    /// quit intent has been applied.
    pub fn tick(
        &mut self,
        ctx: &mut AnimationContext,
        renderer: &mut impl Renderer,
    ) -> Result<TickOutcome, AnimationError> {
        self.apply_intents(ctx);
        if !self.running {
            return Ok(TickOutcome::Stopped);
        }

        let settled = ctx.physics.update(&mut ctx.registry, &ctx.wind, &mut ctx.rng)?;
        ctx.wind.decay();

        render::draw_glyphs(renderer, &ctx.registry);
        renderer.present_frame()?;

        ctx.tick += 1;
        Ok(TickOutcome::Advanced { settled })
    }

    /// Drives the animation until a quit intent or a tick fault.
    ///
    /// Startup failures are returned as errors before any tick runs. A
    /// failing tick is logged and ends the run with [`StopReason::Fault`].
    pub fn run(
        &mut self,
        ctx: &mut AnimationContext,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
    ) -> Result<RunSummary, AnimationError> {
        self.start(ctx, input, renderer)?;
        let first_tick = ctx.tick;

        let reason = loop {
            for intent in input.poll() {
                self.queue(intent);
            }
            match self.tick(ctx, renderer) {
                Ok(TickOutcome::Advanced { .. }) => self.pacer.wait(),
                Ok(TickOutcome::Stopped) => break StopReason::Quit,
                Err(e) => {
                    log::error!("tick {} failed, stopping animation: {e}", ctx.tick);
                    self.running = false;
                    break StopReason::Fault;
                }
            }
        };

        Ok(RunSummary {
            ticks: ctx.tick - first_tick,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RenderError, render::{Color, TextStyle}};
    use glam::Vec2;
    use rand::SeedableRng;

    #[derive(Default)]
    struct NullRenderer {
        frames: usize,
    }

    impl Renderer for NullRenderer {
        fn draw_segment(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {}
        fn draw_filled_circle(&mut self, _: Vec2, _: f32, _: Color) {}
        fn draw_text(&mut self, _: Vec2, _: char, _: &TextStyle) {}
        fn clear_entity(&mut self, _: GlyphId) {}
        fn present_frame(&mut self) -> Result<(), RenderError> {
            self.frames += 1;
            Ok(())
        }
    }

    fn context(seed: u64) -> AnimationContext {
        AnimationContext::build(
            SceneConfig::default(),
            palette::DEFAULT_PALETTE,
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn build_places_glyphs_on_the_tree() {
        let ctx = context(12);
        assert!(!ctx.registry.is_empty());
        assert!(ctx.registry.len() <= 480);
        assert_eq!(ctx.counts().attached, ctx.registry.len());
        assert!(!ctx.wind.is_active());
        for g in &ctx.registry.glyphs {
            assert!(g.original().x.abs() >= 25.0);
        }
    }

    #[test]
    fn short_palette_limits_glyph_count() {
        let ctx = AnimationContext::build(SceneConfig::default(), "春风", StdRng::seed_from_u64(1));
        assert!(ctx.registry.len() <= 2);
    }

    #[test]
    fn pacer_due_respects_interval() {
        let mut pacer = FramePacer::new(Duration::from_millis(33));
        assert!(pacer.due(10.0));
        assert!(!pacer.due(10.02));
        assert!(pacer.due(10.04));
        assert!(!pacer.due(10.05));
        assert!(pacer.due(11.0));
    }

    /// Quits on the `n`th poll.
    struct QuitAfter(usize);

    impl InputSource for QuitAfter {
        fn poll(&mut self) -> Vec<Intent> {
            self.0 = self.0.saturating_sub(1);
            if self.0 == 0 {
                vec![Intent::Quit]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn run_paces_ticks_at_the_interval() {
        let mut ctx = context(6);
        let mut anim = AnimationLoop::new(Duration::from_millis(10));
        let mut renderer = NullRenderer::default();

        let started = Instant::now();
        let summary = anim.run(&mut ctx, &mut QuitAfter(4), &mut renderer).unwrap();

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.reason, StopReason::Quit);
        // Ticks 2 and 3 each waited one interval after the previous tick.
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn intents_wait_for_the_tick_boundary() {
        let mut ctx = context(3);
        let mut anim = AnimationLoop::new(Duration::ZERO);
        let mut renderer = NullRenderer::default();

        anim.queue(Intent::TriggerWind);
        assert_eq!(ctx.counts().falling, 0);
        assert!(!ctx.wind.is_active());

        anim.tick(&mut ctx, &mut renderer).unwrap();
        assert!(ctx.wind.is_active());
        assert!(ctx.counts().falling + ctx.counts().settled > 0);
        assert_eq!(renderer.frames, 1);
        assert_eq!(ctx.tick, 1);
    }

    #[test]
    fn quit_stops_before_mutating() {
        let mut ctx = context(4);
        let mut anim = AnimationLoop::new(Duration::ZERO);
        let mut renderer = NullRenderer::default();

        anim.queue(Intent::Quit);
        anim.queue(Intent::TriggerWind);
        assert_eq!(anim.tick(&mut ctx, &mut renderer).unwrap(), TickOutcome::Stopped);
        assert!(!anim.is_running());
        assert!(!ctx.wind.is_active());
        assert_eq!(ctx.tick, 0);
        assert_eq!(renderer.frames, 0);

        // Stays stopped.
        assert_eq!(anim.tick(&mut ctx, &mut renderer).unwrap(), TickOutcome::Stopped);
    }

    #[test]
    fn wind_decays_once_per_tick() {
        let mut ctx = context(5);
        let mut anim = AnimationLoop::new(Duration::ZERO);
        let mut renderer = NullRenderer::default();

        anim.queue(Intent::TriggerWind);
        anim.tick(&mut ctx, &mut renderer).unwrap();
        assert!((ctx.wind.strength() - 2.0 * 0.995).abs() < 1e-6);
        anim.tick(&mut ctx, &mut renderer).unwrap();
        assert!((ctx.wind.strength() - 2.0 * 0.995 * 0.995).abs() < 1e-6);
    }
}
