//! Lattice construction
//!
//! Builds the fixed topology for one grid size: a centered S x S square of
//! sites in the z = 0 plane, every spin pointing along +z, and the
//! north/south/east/west adjacency in row-major indices.

use log::info;

use crate::simulation::error::{SimError, SimResult};
use crate::simulation::states::{placement, Lattice, NVec3, Site, REFERENCE_DIRECTION};

/// Upper bound on sites per side, keeps `size * size` and the f64 positions sane
pub const MAX_GRID_SIZE: usize = 4096;

impl Lattice {
    /// Build a fresh lattice. Nothing is carried over from any previous build.
    pub fn build(grid_size: i64, spacing: f64) -> SimResult<Self> {
        if grid_size < 1 || grid_size as u64 > MAX_GRID_SIZE as u64 {
            return Err(SimError::InvalidGridSize(grid_size));
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(SimError::InvalidConfiguration(format!("spacing must be positive and finite, got {spacing}")));
        }

        let size = grid_size as usize;
        let offset = (size - 1) as f64 * spacing / 2.0;

        let mut sites = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let position = NVec3::new(row as f64 * spacing - offset, col as f64 * spacing - offset, 0.0);
                sites.push(Site {
                    row,
                    col,
                    position,
                    direction: REFERENCE_DIRECTION,
                    transform: placement(&position, &REFERENCE_DIRECTION),
                    neighbors: neighbor_indices(row, col, size),
                });
            }
        }

        info!("built {size}x{size} lattice ({} sites, spacing {spacing})", sites.len());

        Ok(Self { size, spacing, sites })
    }
}

/// In-bounds 4-neighborhood of `(row, col)`: north, south, west, east
fn neighbor_indices(row: usize, col: usize, size: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(4);
    if row > 0 {
        out.push((row - 1) * size + col);
    }
    if row + 1 < size {
        out.push((row + 1) * size + col);
    }
    if col > 0 {
        out.push(row * size + col - 1);
    }
    if col + 1 < size {
        out.push(row * size + col + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_site_has_no_neighbors() {
        let lat = Lattice::build(1, 1.0).unwrap();
        assert_eq!(lat.len(), 1);
        assert!(lat.sites[0].neighbors.is_empty());
        assert_eq!(lat.sites[0].position, NVec3::zeros());
    }

    #[test]
    fn positions_are_centered() {
        let lat = Lattice::build(3, 2.0).unwrap();
        assert_eq!(lat.sites[0].position, NVec3::new(-2.0, -2.0, 0.0));
        assert_eq!(lat.sites[lat.index(1, 1)].position, NVec3::zeros());
        assert_eq!(lat.sites[lat.index(2, 0)].position, NVec3::new(2.0, -2.0, 0.0));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(Lattice::build(0, 1.0), Err(SimError::InvalidGridSize(0)));
        assert_eq!(Lattice::build(-3, 1.0), Err(SimError::InvalidGridSize(-3)));
    }

    #[test]
    fn rejects_bad_spacing() {
        assert!(Lattice::build(4, 0.0).is_err());
        assert!(Lattice::build(4, f64::NAN).is_err());
    }
}
