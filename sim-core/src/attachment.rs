//! Picks the attachment points glyphs are placed on.
//!
//! [`select`] is a pure filter; [`scatter`] then moves each kept point by a
//! random radial offset so glyphs do not sit exactly on the branch tips.

use glam::Vec2;
use rand::Rng;

use crate::{config::PlacementConfig, types::AttachmentPoint};

/// Keeps points clear of the trunk column and above the ground band.
///
/// A point is kept when `|x| > min_horizontal_distance` and
/// `y > min_vertical_height`. The result is truncated to `max_count`, in
/// generation order.
pub fn select(
    points: &[AttachmentPoint],
    min_horizontal_distance: f32,
    min_vertical_height: f32,
    max_count: usize,
) -> Vec<AttachmentPoint> {
    points
        .iter()
        .filter(|p| p.pos.x.abs() > min_horizontal_distance && p.pos.y > min_vertical_height)
        .take(max_count)
        .copied()
        .collect()
}

/// Offsets every point radially and keeps it out of the trunk exclusion zone.
///
/// The offset length is drawn from `cfg.scatter_distance` and the angle
/// uniformly from a full turn. If the resulting `|x|` is below
/// `cfg.trunk_exclusion`, `x` is pushed out to the zone boundary on the side
/// the source point was on.
pub fn scatter(
    points: &[AttachmentPoint],
    cfg: &PlacementConfig,
    rng: &mut impl Rng,
) -> Vec<AttachmentPoint> {
    let (d_lo, d_hi) = cfg.scatter_distance;
    points
        .iter()
        .map(|p| {
            let distance = rng.random_range(d_lo..=d_hi);
            let angle = rng.random_range(0.0f32..360.0).to_radians();
            let mut pos = p.pos + Vec2::from_angle(angle) * distance;

            if pos.x.abs() < cfg.trunk_exclusion {
                let side = if p.pos.x < 0.0 { -1.0 } else { 1.0 };
                pos.x = side * cfg.trunk_exclusion;
            }

            AttachmentPoint { pos, depth: p.depth }
        })
        .collect()
}

/// [`select`] followed by [`scatter`].
///
/// ### Parameters
/// - `points` - Raw points from [`crate::branch::BranchGenerator`].
/// - `cfg` - Thresholds and scatter ranges.
/// - `max_count` - Upper bound, normally the palette length.
/// - `rng` - Random source for the offsets.
pub fn filter(
    points: &[AttachmentPoint],
    cfg: &PlacementConfig,
    max_count: usize,
    rng: &mut impl Rng,
) -> Vec<AttachmentPoint> {
    let kept = select(
        points,
        cfg.min_horizontal_distance,
        cfg.min_vertical_height,
        max_count,
    );
    log::info!(
        "{} of {} attachment points usable for glyphs",
        kept.len(),
        points.len()
    );
    scatter(&kept, cfg, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn sample_points() -> Vec<AttachmentPoint> {
        vec![
            AttachmentPoint::new(10.0, 50.0, 4),    // too close to trunk
            AttachmentPoint::new(40.0, 50.0, 4),    // kept
            AttachmentPoint::new(-45.0, -150.0, 5), // too low
            AttachmentPoint::new(-31.0, 0.0, 6),    // kept
            AttachmentPoint::new(30.0, 0.0, 6),     // exactly on the boundary, rejected
            AttachmentPoint::new(80.0, -99.0, 5),   // kept
        ]
    }

    #[test]
    fn select_enforces_exclusion_zone_strictly() {
        let kept = select(&sample_points(), 30.0, -100.0, usize::MAX);
        assert_eq!(kept.len(), 3);
        for p in &kept {
            assert!(p.pos.x.abs() > 30.0);
            assert!(p.pos.y > -100.0);
        }
        assert_eq!(kept[0].pos, Vec2::new(40.0, 50.0));
        assert_eq!(kept[1].pos, Vec2::new(-31.0, 0.0));
    }

    #[test]
    fn select_truncates_in_generation_order() {
        let kept = select(&sample_points(), 30.0, -100.0, 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].depth, 6);

        assert!(select(&sample_points(), 30.0, -100.0, 0).is_empty());
    }

    #[test]
    fn scatter_moves_points_within_range_and_outside_trunk() {
        let cfg = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        let kept = select(&sample_points(), 30.0, -100.0, usize::MAX);

        for _ in 0..200 {
            let moved = scatter(&kept, &cfg, &mut rng);
            assert_eq!(moved.len(), kept.len());
            for (src, dst) in kept.iter().zip(&moved) {
                assert_eq!(src.depth, dst.depth);
                assert!(dst.pos.x.abs() >= cfg.trunk_exclusion);
                assert_eq!(src.pos.x.signum(), dst.pos.x.signum());
                // The vertical offset is never clamped.
                assert!((dst.pos.y - src.pos.y).abs() <= 25.0 + 1e-3);
            }
        }
    }

    #[test]
    fn scatter_pushes_to_zone_boundary() {
        // A source point just outside the zone with an offset that can reach
        // back past the boundary.
        let cfg = PlacementConfig {
            scatter_distance: (20.0, 20.0),
            ..PlacementConfig::default()
        };
        let src = [AttachmentPoint::new(-31.0, 0.0, 4)];
        let mut rng = StdRng::seed_from_u64(0);

        let mut clamped = 0;
        for _ in 0..500 {
            let dst = scatter(&src, &cfg, &mut rng)[0];
            assert!(dst.pos.x <= -25.0);
            if dst.pos.x == -25.0 {
                clamped += 1;
            }
        }
        assert!(clamped > 0, "offset never crossed into the exclusion zone");
    }

    #[test]
    fn filter_respects_palette_bound() {
        let cfg = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(filter(&sample_points(), &cfg, 1, &mut rng).len(), 1);
        assert_eq!(filter(&sample_points(), &cfg, 100, &mut rng).len(), 3);
    }
}
