//! Core state types for the spin lattice.
//!
//! Defines the per-site state and the lattice container:
//! - `Site`    fixed grid coordinates, position and neighbors plus a mutable spin
//! - `Lattice` row-major collection of `Site`s for one grid size
//!
//! Vectors use nalgebra in f64, transforms are 4x4 homogeneous matrices.

use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion, Vector3};

pub type NVec3 = Vector3<f64>;
pub type NMat4 = Matrix4<f64>;

/// Canonical direction every spin mesh points along before rotation
pub const REFERENCE_DIRECTION: NVec3 = NVec3::new(0.0, 0.0, 1.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub row: usize,
    pub col: usize,
    pub position: NVec3, // fixed after construction
    pub direction: NVec3, // spin, unit length
    pub transform: NMat4, // position + orientation
    pub neighbors: Vec<usize>, // up to 4 row-major indices
}

impl Site {
    /// Recompute `transform` from the fixed position and the current direction
    pub fn refresh_transform(&mut self) {
        self.transform = placement(&self.position, &self.direction);
    }
}

/// Compose translation to `position` with the rotation taking
/// [`REFERENCE_DIRECTION`] onto `direction`.
pub fn placement(position: &NVec3, direction: &NVec3) -> NMat4 {
    Isometry3::from_parts(Translation3::from(*position), orientation(direction)).to_homogeneous()
}

/// Shortest rotation from the reference direction onto `direction`.
/// Antiparallel has no unique shortest arc, so it becomes a half turn about +x.
pub fn orientation(direction: &NVec3) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&REFERENCE_DIRECTION, direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&NVec3::x_axis(), std::f64::consts::PI))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pub size: usize, // sites per side
    pub spacing: f64, // distance between adjacent sites
    pub sites: Vec<Site>, // size * size sites, row-major
}

impl Lattice {
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Raw average of all spin directions (zero for an empty lattice)
    pub fn mean_direction(&self) -> NVec3 {
        if self.sites.is_empty() {
            return NVec3::zeros();
        }
        let sum: NVec3 = self.sites.iter().map(|s| s.direction).sum();
        sum / self.sites.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_keeps_translation() {
        let p = NVec3::new(1.0, -2.0, 0.0);
        let m = placement(&p, &REFERENCE_DIRECTION);
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], -2.0);
        assert_eq!(m[(2, 3)], 0.0);
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn orientation_maps_reference_onto_direction() {
        let d = NVec3::new(1.0, 1.0, 0.0).normalize();
        let q = orientation(&d);
        assert!((q * REFERENCE_DIRECTION - d).norm() < 1e-12);
    }

    #[test]
    fn orientation_handles_antiparallel() {
        let d = NVec3::new(0.0, 0.0, -1.0);
        let q = orientation(&d);
        assert!((q * REFERENCE_DIRECTION - d).norm() < 1e-12);
    }
}
