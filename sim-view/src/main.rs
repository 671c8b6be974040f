//! Application entry point for the blossom viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod fonts;
mod input;
mod surface;
mod viewer;

use anyhow::{Context, anyhow};
use rand::{SeedableRng, rngs::StdRng};
use sim_core::config::SceneConfig;
use viewer::Viewer;

const SEED_ENV: &str = "BLOSSOM_SEED";

/// Random source for the scene: seeded from `BLOSSOM_SEED` when set,
/// otherwise from the operating system.
fn scene_rng() -> anyhow::Result<StdRng> {
    match std::env::var(SEED_ENV) {
        Ok(raw) => {
            let seed: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}"))?;
            log::info!("using fixed seed {seed}");
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_os_rng()),
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` once the window is closed.
/// - `Err` if the seed is malformed or eframe fails to create the native
///   window; the animation never starts in that case.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig::default();
    let rng = scene_rng()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "🌸 Falling Blossoms: Space for wind, R to reset, Esc to quit",
        options,
        Box::new(move |cc| {
            fonts::install_cjk_font(&cc.egui_ctx);
            let viewer = Viewer::new(config, rng)
                .inspect_err(|e| log::error!("could not start the animation: {e}"))?;
            Ok(Box::new(viewer))
        }),
    )
    .map_err(|e| anyhow!("could not open the viewer window: {e}"))?;

    log::info!("goodbye");
    Ok(())
}
