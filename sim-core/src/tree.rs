use glam::Vec2;

use crate::types::AttachmentPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Trunk,
    Branch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: f32,
    pub kind: SegmentKind,
}

/// Immutable result of one tree build.
///
/// Every collection is in depth-first generation order.
#[derive(Clone, Debug, Default)]
pub struct TreeGeometry {
    pub segments: Vec<Segment>,
    pub blossoms: Vec<Vec2>,
    pub points: Vec<AttachmentPoint>,
}

impl TreeGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Branch)
            .count()
    }

    /// Deepest recursion level that produced an attachment point.
    pub fn max_point_depth(&self) -> Option<u32> {
        self.points.iter().map(|p| p.depth).max()
    }
}

/// Drawing position and heading used while walking the tree.
///
/// Headings are in degrees, counter-clockwise from +x, with +y up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub pos: Vec2,
    pub heading_deg: f32,
}

impl Cursor {
    pub fn new(pos: Vec2, heading_deg: f32) -> Self {
        Self { pos, heading_deg }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading_deg.to_radians())
    }

    /// Returns a cursor moved `len` along the current heading.
    #[inline]
    pub fn advanced(&self, len: f32) -> Self {
        Self {
            pos: self.pos + self.direction() * len,
            heading_deg: self.heading_deg,
        }
    }

    /// Returns a cursor rotated counter-clockwise by `deg`.
    #[inline]
    pub fn turned(&self, deg: f32) -> Self {
        Self {
            pos: self.pos,
            heading_deg: self.heading_deg + deg,
        }
    }
}
