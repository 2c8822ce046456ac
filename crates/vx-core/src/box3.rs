//! Axis-aligned box stored as a center and per-axis half-extents.

use glam::{Mat4, Vec3};

/// Axis-aligned box: center plus half-extents.
///
/// Degenerate boxes (a half-extent at or below zero) are representable;
/// consumers decide how to treat them. The slice compositor produces a
/// zero-sized raster for them, the renderer skips them as clip volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3 {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Box3 {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Box3) -> Box3 {
        Box3::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// True when any half-extent is at or below zero.
    pub fn is_empty(&self) -> bool {
        self.half_extents.cmple(Vec3::ZERO).any()
    }

    /// Matrix mapping the unit cube [-1, 1]^3 onto this box. The
    /// renderer inverts it to test fragments against the clip volume.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.center) * Mat4::from_scale(self.half_extents)
    }
}
