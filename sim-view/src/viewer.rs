//! Interactive blossom viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the animation state (scene
//! context, tick loop, retained surface) and implements [`eframe::App`] to
//! feed it input, tick it at the target cadence and paint the result.

use eframe::App;
use glam::Vec2;
use rand::rngs::StdRng;
use sim_core::{
    animation::{AnimationContext, AnimationLoop, InputSource, Intent, TickOutcome},
    config::SceneConfig,
    error::AnimationError,
    palette::DEFAULT_PALETTE,
    render::BACKGROUND,
};

use crate::{
    input::KeyboardInput,
    surface::{RetainedSurface, to_color32},
};

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The animation core: [`AnimationContext`] and [`AnimationLoop`].
/// - The collaborators the loop draws into and reads from:
///   [`RetainedSurface`] and [`KeyboardInput`].
/// - Camera state (pan/zoom) for world-to-screen mapping.
///
/// The typical per-frame update is:
/// 1. Gather key presses and button clicks as intents.
/// 2. If the frame pacer says a tick is due, run [`AnimationLoop::tick`].
/// 3. Paint the retained surface.
///
/// ### Fields
/// - `scene` - Tree, glyphs, wind and random source.
/// - `animation` - Tick loop with its intent queue and pacer.
/// - `surface` - Retained display list the loop draws into.
/// - `input` - Intents collected since the last tick.
///
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `last_tick_time` - Time stamp of the last tick (egui time).
/// - `last_tick_dt` - Actual time delta between the last two ticks (for display only).
pub struct Viewer {
    scene: AnimationContext,
    animation: AnimationLoop,
    surface: RetainedSurface,
    input: KeyboardInput,

    zoom: f32,
    pan: egui::Vec2,

    last_tick_time: f64,
    last_tick_dt: f64,
}

impl Viewer {
    /// Builds the scene and draws its opening frame.
    ///
    /// ### Returns
    /// The viewer, or the startup error if the surface or input could not
    /// be prepared.
    pub fn new(config: SceneConfig, rng: StdRng) -> Result<Self, AnimationError> {
        let scene = AnimationContext::build(config, DEFAULT_PALETTE, rng);
        let mut animation = AnimationLoop::new(config.tick_interval);
        let mut surface = RetainedSurface::new();
        let mut input = KeyboardInput::new();

        animation.start(&scene, &mut input, &mut surface)?;

        Ok(Self {
            scene,
            animation,
            surface,
            input,
            zoom: 0.9,
            pan: egui::vec2(0.0, 0.0),
            last_tick_time: 0.0,
            last_tick_dt: 0.0,
        })
    }

    /// Hands queued intents to the loop and runs one tick.
    ///
    /// ### Returns
    /// `false` once the animation has stopped (quit or fault).
    fn tick(&mut self) -> bool {
        for intent in self.input.poll() {
            self.animation.queue(intent);
        }
        match self.animation.tick(&mut self.scene, &mut self.surface) {
            Ok(TickOutcome::Advanced { .. }) => true,
            Ok(TickOutcome::Stopped) => false,
            Err(e) => {
                log::error!("tick {} failed, stopping animation: {e}", self.scene.tick);
                false
            }
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Builds the top panel (wind, reset, quit, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🌬 Wind (Space)").clicked() {
                    self.input.push(Intent::TriggerWind);
                }
                if ui.button("⟲ Reset (R)").clicked() {
                    self.input.push(Intent::ResetScene);
                }
                if ui.button("⏏ Quit (Esc)").clicked() {
                    self.input.push(Intent::Quit);
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.2..=4.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (glyph counts, wind, tick timing).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let counts = self.scene.counts();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_tick_dt));
                ui.label(format!("tick = {}", self.scene.tick));
                ui.separator();
                ui.label(format!("wind = {:.2}", self.scene.wind.strength()));
                ui.separator();
                ui.label(format!("settled = {}", counts.settled));
                ui.label(format!("falling = {}", counts.falling));
                ui.label(format!("attached = {}", counts.attached));
            });
        });
    }

    /// Builds the central panel where the scene is painted.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::new().fill(to_color32(BACKGROUND));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.2, 4.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            self.surface
                .paint(&painter, self.zoom, |p| self.world_to_screen(p, rect));
        });
    }
}

impl App for Viewer {
    /// eframe callback run once per repaint.
    ///
    /// Collects input, ticks the animation when due, then builds all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.input.gather(ctx);

        let now = ctx.input(|i| i.time);
        if self.animation.is_running() && self.animation.pacer_mut().due(now) {
            if self.last_tick_time > 0.0 {
                self.last_tick_dt = now - self.last_tick_time;
            }
            self.last_tick_time = now;

            if !self.tick() {
                log::info!("closing viewer");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);

        ctx.request_repaint_after(self.animation.pacer_mut().interval());
    }
}
