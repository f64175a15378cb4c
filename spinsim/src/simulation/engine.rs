//! Frame driver
//!
//! Owns the lattice and advances it once per rendered frame:
//! clamp the frame delta, move the pointer target, snapshot every spin,
//! then evaluate the field and integrate each site against that snapshot.
//! Sites only ever read the snapshot, so iteration order cannot change
//! the result (Jacobi-style update).

use log::{debug, info, warn};

use super::error::SimResult;
use super::forces::{FieldContext, FieldSet};
use super::integrator::integrate_site;
use super::params::Parameters;
use super::pointer::PointerTarget;
use super::states::{Lattice, NMat4, NVec3};

pub struct Engine {
    lattice: Lattice,
    snapshot: Vec<NVec3>, // pre-sized, refilled in place every frame
    transforms: Vec<NMat4>, // batch handed to the renderer
    transforms_dirty: bool, // set after a step, cleared by the renderer
    pointer: PointerTarget,
    fields: FieldSet,
    frame: u64,
}

impl Engine {
    pub fn new(lattice: Lattice) -> Self {
        Self::with_fields(lattice, FieldSet::standard())
    }

    pub fn with_fields(lattice: Lattice, fields: FieldSet) -> Self {
        let snapshot = lattice.sites.iter().map(|s| s.direction).collect();
        let transforms = lattice.sites.iter().map(|s| s.transform).collect();
        Self {
            lattice,
            snapshot,
            transforms,
            transforms_dirty: true,
            pointer: PointerTarget::default(),
            fields,
            frame: 0,
        }
    }

    /// Build a lattice and wrap it
    pub fn build(grid_size: i64, spacing: f64) -> SimResult<Self> {
        Ok(Self::new(Lattice::build(grid_size, spacing)?))
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn pointer(&self) -> NVec3 {
        self.pointer.position()
    }

    pub fn set_pointer(&mut self, position: NVec3) {
        self.pointer = PointerTarget::new(position);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn mean_direction(&self) -> NVec3 {
        self.lattice.mean_direction()
    }

    /// One placement matrix per site, row-major
    pub fn transforms(&self) -> &[NMat4] {
        &self.transforms
    }

    pub fn transforms_dirty(&self) -> bool {
        self.transforms_dirty
    }

    /// Renderer has uploaded the current batch
    pub fn mark_uploaded(&mut self) {
        self.transforms_dirty = false;
    }

    /// Replace the lattice for a new grid size.
    /// On failure the current lattice is kept and the error returned.
    pub fn rebuild(&mut self, grid_size: i64) -> SimResult<()> {
        let spacing = self.lattice.spacing;
        match Lattice::build(grid_size, spacing) {
            Ok(lattice) => {
                info!("rebuilding lattice: {} -> {} sites per side", self.lattice.size, lattice.size);
                self.snapshot = lattice.sites.iter().map(|s| s.direction).collect();
                self.transforms = lattice.sites.iter().map(|s| s.transform).collect();
                self.lattice = lattice;
                self.transforms_dirty = true;
                self.frame = 0;
                Ok(())
            }
            Err(e) => {
                warn!("lattice rebuild rejected: {e}");
                Err(e)
            }
        }
    }

    /// Advance one frame.
    /// `delta` is the wall-clock frame time in seconds, `hit` this frame's
    /// pointer intersection with the lattice plane (if any).
    pub fn step(&mut self, delta: f64, hit: Option<NVec3>, params: &Parameters) {
        let dt = params.step_dt(delta);
        let pointer = self.pointer.update(hit);

        if self.lattice.is_empty() {
            return;
        }

        // Frame snapshot, same length as the lattice for its whole lifetime
        for (slot, site) in self.snapshot.iter_mut().zip(self.lattice.sites.iter()) {
            *slot = site.direction;
        }

        let ctx = FieldContext {
            pointer,
            snapshot: &self.snapshot,
            params,
        };

        for (site, out) in self.lattice.sites.iter_mut().zip(self.transforms.iter_mut()) {
            let h = self.fields.effective_field(site, &ctx);
            integrate_site(site, &h, params, dt);
            *out = site.transform;
        }

        self.transforms_dirty = true;
        self.frame += 1;

        if self.frame % 600 == 0 {
            debug!("frame {}: mean spin {:?}", self.frame, self.lattice.mean_direction());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_marks_transforms_dirty() {
        let mut engine = Engine::build(3, 1.0).unwrap();
        engine.mark_uploaded();
        assert!(!engine.transforms_dirty());

        engine.step(0.016, Some(NVec3::new(0.5, 0.5, 0.0)), &Parameters::default());
        assert!(engine.transforms_dirty());
        assert_eq!(engine.frame(), 1);
        assert_eq!(engine.transforms().len(), 9);
    }

    #[test]
    fn transforms_follow_sites() {
        let mut engine = Engine::build(2, 1.0).unwrap();
        engine.step(0.016, Some(NVec3::new(3.0, 0.0, 0.0)), &Parameters::default());
        for (site, m) in engine.lattice().sites.iter().zip(engine.transforms()) {
            assert_eq!(&site.transform, m);
        }
    }

    #[test]
    fn failed_rebuild_keeps_lattice() {
        let mut engine = Engine::build(4, 1.0).unwrap();
        assert!(engine.rebuild(-1).is_err());
        assert_eq!(engine.lattice().size, 4);
        assert_eq!(engine.transforms().len(), 16);
    }
}
