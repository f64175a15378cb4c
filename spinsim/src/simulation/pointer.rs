//! Pointer projection onto the lattice plane
//!
//! The viewer turns the cursor into a world-space ray; the core only keeps
//! the point where that ray meets z = 0.

use super::states::NVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: NVec3,
    pub direction: NVec3,
}

impl Ray {
    pub fn new(origin: NVec3, direction: NVec3) -> Self {
        Self { origin, direction }
    }

    /// Point where the ray crosses z = 0, if it does so in front of the origin
    pub fn intersect_lattice_plane(&self) -> Option<NVec3> {
        let dz = self.direction.z;
        if dz.abs() < f64::EPSILON {
            return None; // parallel to the plane
        }
        let t = -self.origin.z / dz;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * t)
    }
}

/// Last valid pointer target on the lattice plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTarget {
    position: NVec3,
}

impl Default for PointerTarget {
    fn default() -> Self {
        Self { position: NVec3::zeros() }
    }
}

impl PointerTarget {
    pub fn new(position: NVec3) -> Self {
        Self { position }
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    /// Overwrite with this frame's hit; keep the old value when there is none
    pub fn update(&mut self, hit: Option<NVec3>) -> NVec3 {
        if let Some(p) = hit.filter(|p| p.iter().all(|c| c.is_finite())) {
            self.position = p;
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_plane_below_camera() {
        let ray = Ray::new(NVec3::new(1.0, 2.0, 10.0), NVec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray.intersect_lattice_plane(), Some(NVec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn parallel_or_backward_rays_miss() {
        let flat = Ray::new(NVec3::new(0.0, 0.0, 5.0), NVec3::x());
        assert_eq!(flat.intersect_lattice_plane(), None);

        let away = Ray::new(NVec3::new(0.0, 0.0, 5.0), NVec3::z());
        assert_eq!(away.intersect_lattice_plane(), None);
    }

    #[test]
    fn target_keeps_last_hit() {
        let mut target = PointerTarget::default();
        target.update(Some(NVec3::new(3.0, -1.0, 0.0)));
        assert_eq!(target.update(None), NVec3::new(3.0, -1.0, 0.0));
    }
}
