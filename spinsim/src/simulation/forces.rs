//! Effective field contributors for the spin lattice
//!
//! Defines the `FieldTerm` trait and the two terms driving every spin:
//! the pointer point source and nearest-neighbor exchange

use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, Site};

/// Everything a term may read for one frame.
/// `snapshot` holds the directions from the start of the step, never the
/// values already written during it.
pub struct FieldContext<'a> {
    pub pointer: NVec3,
    pub snapshot: &'a [NVec3],
    pub params: &'a Parameters,
}

/// Collection of field terms
/// Each term implements [`FieldTerm`] and their contributions are summed
/// into a single effective field per site
pub struct FieldSet {
    terms: Vec<Box<dyn FieldTerm + Send + Sync>>,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// External point source plus exchange
    pub fn standard() -> Self {
        Self::new().with(PointSourceField).with(ExchangeField)
    }

    /// Add a field term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: FieldTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Effective field at `site`, the sum of all terms
    pub fn effective_field(&self, site: &Site, ctx: &FieldContext) -> NVec3 {
        self.terms.iter().fold(NVec3::zeros(), |acc, term| acc + term.field(site, ctx))
    }
}

/// A single contribution to the effective field at one site
pub trait FieldTerm {
    fn field(&self, site: &Site, ctx: &FieldContext) -> NVec3;
}

/// Point source at the pointer.
/// Points from the pointer toward the site, magnitude `H / (1 + k d^2)`,
/// reversed when the polarity flag is set
pub struct PointSourceField;

impl FieldTerm for PointSourceField {
    fn field(&self, site: &Site, ctx: &FieldContext) -> NVec3 {
        let p = ctx.params;
        let offset = site.position - ctx.pointer;
        let d2 = offset.norm_squared();

        // Site sits exactly on the pointer: no direction to point along
        let Some(dir) = offset.try_normalize(0.0) else {
            return NVec3::zeros();
        };

        let strength = p.external_field_strength / (1.0 + p.falloff * d2);
        let sign = if p.is_field_inverted { -1.0 } else { 1.0 };
        dir * (sign * strength)
    }
}

/// Nearest-neighbor exchange: sum of neighbor snapshot directions
/// scaled by `exchange_strength * exchange_unit_scale`
pub struct ExchangeField;

impl FieldTerm for ExchangeField {
    fn field(&self, site: &Site, ctx: &FieldContext) -> NVec3 {
        let p = ctx.params;
        let sum: NVec3 = site.neighbors.iter().map(|&j| ctx.snapshot[j]).sum();
        sum * (p.exchange_strength * p.exchange_unit_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{placement, REFERENCE_DIRECTION};

    fn site_at(position: NVec3, neighbors: Vec<usize>) -> Site {
        Site {
            row: 0,
            col: 0,
            position,
            direction: REFERENCE_DIRECTION,
            transform: placement(&position, &REFERENCE_DIRECTION),
            neighbors,
        }
    }

    #[test]
    fn point_source_is_zero_on_top_of_pointer() {
        let params = Parameters::default();
        let site = site_at(NVec3::new(1.0, 2.0, 0.0), vec![]);
        let ctx = FieldContext { pointer: site.position, snapshot: &[], params: &params };
        assert_eq!(PointSourceField.field(&site, &ctx), NVec3::zeros());
    }

    #[test]
    fn point_source_falls_off_with_distance() {
        let params = Parameters::default();
        let site = site_at(NVec3::new(2.0, 0.0, 0.0), vec![]);
        let ctx = FieldContext { pointer: NVec3::zeros(), snapshot: &[], params: &params };
        let h = PointSourceField.field(&site, &ctx);

        let expected = params.external_field_strength / (1.0 + params.falloff * 4.0);
        assert!((h.norm() - expected).abs() < 1e-9 * expected);
        assert!(h.x > 0.0, "field should point away from the pointer");
    }

    #[test]
    fn exchange_sums_snapshot_neighbors() {
        let params = Parameters { exchange_strength: 2.0e-6, ..Parameters::default() };
        let site = site_at(NVec3::zeros(), vec![1, 2]);
        let snapshot = [NVec3::z(), NVec3::x(), NVec3::y()];
        let ctx = FieldContext { pointer: NVec3::zeros(), snapshot: &snapshot, params: &params };

        let h = ExchangeField.field(&site, &ctx);
        let scale = 2.0e-6 * params.exchange_unit_scale;
        assert!((h - NVec3::new(scale, scale, 0.0)).norm() < 1e-12);
    }
}
