//! Explicit time integrator for the spin dynamics
//!
//! One forward-Euler step of the damped precession (simplified LLG) law,
//! followed by renormalization to unit length

use super::params::Parameters;
use super::states::{NVec3, Site};

/// Time derivative of `m` in the effective field `h`:
/// dm/dt = -g (m x H) - g alpha m x (m x H),  g = gamma / (1 + alpha^2)
pub fn llg_rhs(m: &NVec3, h: &NVec3, params: &Parameters) -> NVec3 {
    let gamma_eff = params.gamma / (1.0 + params.alpha * params.alpha);

    let m_cross_h = m.cross(h);
    let m_cross_m_cross_h = m.cross(&m_cross_h);

    // precession about H, then relaxation toward H
    -gamma_eff * m_cross_h - gamma_eff * params.alpha * m_cross_m_cross_h
}

/// Advance a single spin by `dt` and renormalize.
/// `m` parallel to `h` gives a zero derivative, so the spin is returned as is.
pub fn llg_step(m: &NVec3, h: &NVec3, params: &Parameters, dt: f64) -> NVec3 {
    let m_new = m + llg_rhs(m, h, params) * dt;
    // fall back to the old spin if the step collapsed to zero or blew up
    m_new.try_normalize(f64::EPSILON).filter(|v| v.iter().all(|c| c.is_finite())).unwrap_or(*m)
}

/// Advance `site` in the field `h` and refresh its transform
pub fn integrate_site(site: &mut Site, h: &NVec3, params: &Parameters, dt: f64) {
    site.direction = llg_step(&site.direction, h, params, dt);
    site.refresh_transform();
}
