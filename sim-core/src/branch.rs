//! Recursive fractal branching that produces the tree geometry.
//!
//! The generator is purely functional over a [`Cursor`]: every recursive
//! call receives its own cursor by value, so two sibling branches always
//! start from the same pivot and nothing has to be restored afterwards.
//!
//! Two independent heuristics record [`AttachmentPoint`]s:
//! 1. **Tip rule** - a terminal tip is recorded only when the recursion is
//!    deeper than `TreeConfig::tip_min_depth`, keeping glyphs off the trunk.
//! 2. **Back-off rule** - a short, deep, off-center branch may record an
//!    extra point a third of the way back from its tip.
//!
//! The rules overlap on some branches; both are kept as they are.

use glam::Vec2;
use rand::Rng;

use crate::{
    config::TreeConfig,
    tree::{Cursor, Segment, SegmentKind, TreeGeometry},
    types::AttachmentPoint,
};

/// Builds [`TreeGeometry`] from a [`TreeConfig`].
#[derive(Clone, Copy, Debug)]
pub struct BranchGenerator {
    cfg: TreeConfig,
}

impl BranchGenerator {
    pub fn new(cfg: TreeConfig) -> Self {
        Self { cfg }
    }

    /// Grows the full scene tree: the trunk, then the recursive crown.
    ///
    /// The trunk starts at `TreeConfig::trunk_origin`, heads along
    /// `trunk_heading_deg` for `trunk_length`, and the crown is grown from
    /// its top with the `crown_*` parameters at depth `0`.
    ///
    /// ### Parameters
    /// - `rng` - Random source for every branching decision.
    ///
    /// ### Returns
    /// The drawn segments, blossom buds and attachment points.
    pub fn grow_tree(&self, rng: &mut impl Rng) -> TreeGeometry {
        let mut geo = TreeGeometry::new();

        let base = Cursor::new(self.cfg.trunk_origin, self.cfg.trunk_heading_deg);
        let top = base.advanced(self.cfg.trunk_length);
        geo.segments.push(Segment {
            from: base.pos,
            to: top.pos,
            thickness: self.cfg.trunk_thickness,
            kind: SegmentKind::Trunk,
        });

        self.branch(
            top,
            self.cfg.crown_length,
            self.cfg.crown_thickness,
            self.cfg.crown_angle_deg,
            0,
            rng,
            &mut geo,
        );

        log::info!(
            "grew tree: {} branches, {} blossoms, {} attachment points (deepest at level {})",
            geo.branch_count(),
            geo.blossoms.len(),
            geo.points.len(),
            geo.max_point_depth().unwrap_or(0)
        );
        geo
    }

    /// Runs the recursion from `origin` and returns only the attachment points.
    ///
    /// The first branch heads along `TreeConfig::trunk_heading_deg`.
    /// `max_depth` overrides `TreeConfig::max_depth` for this call.
    pub fn generate(
        &self,
        origin: Vec2,
        length: f32,
        thickness: f32,
        angle_deg: f32,
        max_depth: Option<u32>,
        rng: &mut impl Rng,
    ) -> Vec<AttachmentPoint> {
        let generator = Self {
            cfg: TreeConfig {
                max_depth: max_depth.or(self.cfg.max_depth),
                ..self.cfg
            },
        };
        let mut geo = TreeGeometry::new();
        let cursor = Cursor::new(origin, self.cfg.trunk_heading_deg);
        generator.branch(cursor, length, thickness, angle_deg, 0, rng, &mut geo);
        geo.points
    }

    /// One recursion step.
    ///
    /// Random draws happen in a fixed order (blossom roll at tips; back-off
    /// roll; left angle, right angle, left length, right length) so a seeded
    /// generator always reproduces the same tree.
    #[allow(clippy::too_many_arguments)]
    fn branch(
        &self,
        cursor: Cursor,
        length: f32,
        thickness: f32,
        angle_deg: f32,
        depth: u32,
        rng: &mut impl Rng,
        geo: &mut TreeGeometry,
    ) {
        let cfg = &self.cfg;
        let depth_capped = cfg.max_depth.is_some_and(|max| depth >= max);

        if length < cfg.min_branch_len || depth_capped {
            if rng.random_bool(cfg.blossom_chance) {
                geo.blossoms.push(cursor.pos);
            }
            if depth > cfg.tip_min_depth {
                geo.points
                    .push(AttachmentPoint::new(cursor.pos.x, cursor.pos.y, depth));
            }
            return;
        }

        let tip = cursor.advanced(length);
        geo.segments.push(Segment {
            from: cursor.pos,
            to: tip.pos,
            thickness: thickness.max(1.0),
            kind: SegmentKind::Branch,
        });

        if depth > cfg.backoff_min_depth
            && length < cfg.backoff_max_len
            && rng.random_bool(cfg.backoff_chance)
            && tip.pos.x.abs() > cfg.backoff_min_trunk_dist
        {
            let back = tip.advanced(-(length / 3.0).floor());
            geo.points
                .push(AttachmentPoint::new(back.pos.x, back.pos.y, depth));
        }

        if length > cfg.continue_branch_len {
            let (a_lo, a_hi) = cfg.angle_jitter;
            let (l_lo, l_hi) = cfg.length_jitter;
            let left_angle = angle_deg * rng.random_range(a_lo..=a_hi);
            let right_angle = angle_deg * rng.random_range(a_lo..=a_hi);
            let left_len = length * rng.random_range(l_lo..=l_hi);
            let right_len = length * rng.random_range(l_lo..=l_hi);
            let child_thickness = thickness * cfg.thickness_decay;

            self.branch(
                tip.turned(left_angle),
                left_len,
                child_thickness,
                angle_deg,
                depth + 1,
                rng,
                geo,
            );
            self.branch(
                tip.turned(-right_angle),
                right_len,
                child_thickness,
                angle_deg,
                depth + 1,
                rng,
                geo,
            );
        }
    }
}
