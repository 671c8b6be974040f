//! Keyboard and button input turned into animation intents.

use sim_core::animation::{InputSource, Intent};

/// Key bindings: Space blows wind, R resets, Escape quits.
pub fn intent_for_key(key: egui::Key) -> Option<Intent> {
    match key {
        egui::Key::Space => Some(Intent::TriggerWind),
        egui::Key::R => Some(Intent::ResetScene),
        egui::Key::Escape => Some(Intent::Quit),
        _ => None,
    }
}

/// Collects intents between ticks; the animation loop drains them.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    queued: Vec<Intent>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.queued.push(intent);
    }

    /// Reads this frame's key presses from egui.
    pub fn gather(&mut self, ctx: &egui::Context) {
        let pressed: Vec<Intent> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => intent_for_key(*key),
                    _ => None,
                })
                .collect()
        });
        self.queued.extend(pressed);
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.queued)
    }
}
