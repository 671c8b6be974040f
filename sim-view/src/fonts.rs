//! Finds a font that covers the CJK glyph palette.
//!
//! egui's bundled fonts have no CJK coverage. `BLOSSOM_FONT` may point at a
//! font file; otherwise a few common system locations are tried. Without
//! one the glyphs render as replacement boxes and the animation still runs.

use std::{path::PathBuf, sync::Arc};

const FONT_ENV: &str = "BLOSSOM_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simkai.ttf",
];

/// Candidate font paths, the environment override first.
fn candidates(env_override: Option<String>) -> Vec<PathBuf> {
    env_override
        .into_iter()
        .map(PathBuf::from)
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
        .collect()
}

/// Installs the first readable candidate as a fallback for both families.
///
/// ### Returns
/// The path that was installed, if any.
pub fn install_cjk_font(ctx: &egui::Context) -> Option<PathBuf> {
    for path in candidates(std::env::var(FONT_ENV).ok()) {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push("cjk".to_owned());
        }
        ctx.set_fonts(fonts);

        log::info!("using {} for glyphs", path.display());
        return Some(path);
    }

    log::warn!("no CJK font found; set {FONT_ENV} to a font file to render the glyphs");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_is_tried_first() {
        let list = candidates(Some("/tmp/custom.ttf".to_owned()));
        assert_eq!(list[0], PathBuf::from("/tmp/custom.ttf"));
        assert_eq!(list.len(), SYSTEM_FONTS.len() + 1);

        assert_eq!(candidates(None).len(), SYSTEM_FONTS.len());
    }
}
