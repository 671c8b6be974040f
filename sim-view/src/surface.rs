//! Retained display list that implements [`Renderer`] on top of egui.
//!
//! egui repaints everything every frame, while the animation core draws
//! into a retained surface (backdrop once, glyphs redrawn per tick). This
//! module bridges the two: draw calls are stored in world coordinates and
//! replayed through an [`egui::Painter`] on every repaint.

use std::collections::HashMap;

use glam::Vec2;
use sim_core::{
    constants::BACKING_DISC_RADIUS,
    error::RenderError,
    render::{Color, Renderer, TextStyle},
    types::GlyphId,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Segment {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: char,
        style: TextStyle,
    },
}

#[derive(Debug, Default)]
pub struct RetainedSurface {
    backdrop: Vec<Primitive>,
    entities: HashMap<GlyphId, Vec<Primitive>>,
    /// Entity paint order; most recently redrawn last.
    order: Vec<GlyphId>,
    target: Option<GlyphId>,
    frames: u64,
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn backdrop(&self) -> &[Primitive] {
        &self.backdrop
    }

    pub fn entity(&self, id: GlyphId) -> Option<&[Primitive]> {
        self.entities.get(&id).map(Vec::as_slice)
    }

    /// Every primitive in paint order: backdrop first, then entities.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.backdrop.iter().chain(
            self.order
                .iter()
                .filter_map(|id| self.entities.get(id))
                .flatten(),
        )
    }

    fn push(&mut self, prim: Primitive) {
        match self.target {
            Some(id) => self.entities.entry(id).or_default().push(prim),
            None => self.backdrop.push(prim),
        }
    }

    /// Replays the display list through `painter`.
    ///
    /// `to_screen` maps world positions to screen positions and `zoom`
    /// scales sizes.
    pub fn paint(
        &self,
        painter: &egui::Painter,
        zoom: f32,
        to_screen: impl Fn(Vec2) -> egui::Pos2,
    ) {
        for prim in self.primitives() {
            match *prim {
                Primitive::Segment {
                    from,
                    to,
                    thickness,
                    color,
                } => {
                    painter.line_segment(
                        [to_screen(from), to_screen(to)],
                        egui::Stroke::new(thickness * zoom, to_color32(color)),
                    );
                }
                Primitive::Circle {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(to_screen(center), radius * zoom, to_color32(color));
                }
                Primitive::Text { pos, text, style } => {
                    let p = to_screen(pos);
                    if let Some(bg) = style.background {
                        painter.circle_filled(p, BACKING_DISC_RADIUS * zoom, to_color32(bg));
                    }
                    let font = egui::FontId::proportional((style.size_px as f32 * zoom).max(1.0));
                    let color = to_color32(style.color);
                    let text = text.to_string();
                    if style.bold {
                        // No bold face in the default fonts; overstrike instead.
                        painter.text(
                            p + egui::vec2(0.6, 0.0),
                            egui::Align2::CENTER_CENTER,
                            &text,
                            font.clone(),
                            color,
                        );
                    }
                    painter.text(p, egui::Align2::CENTER_CENTER, text, font, color);
                }
            }
        }
    }
}

pub fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl Renderer for RetainedSurface {
    fn draw_segment(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.push(Primitive::Segment {
            from,
            to,
            thickness,
            color,
        });
    }

    fn draw_filled_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(Primitive::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, pos: Vec2, text: char, style: &TextStyle) {
        self.push(Primitive::Text {
            pos,
            text,
            style: *style,
        });
    }

    fn clear_entity(&mut self, entity: GlyphId) {
        self.entities.insert(entity, Vec::new());
        if let Some(i) = self.order.iter().position(|&id| id == entity) {
            self.order.remove(i);
        }
        self.order.push(entity);
        self.target = Some(entity);
    }

    fn present_frame(&mut self) -> Result<(), RenderError> {
        self.target = None;
        self.frames += 1;
        Ok(())
    }
}
