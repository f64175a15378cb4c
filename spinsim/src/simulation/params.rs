//! Numerical and physical parameters for the spin dynamics
//!
//! `Parameters` holds runtime settings read every frame:
//! - precession / damping coefficients (`gamma`, `alpha`),
//! - exchange and external field strengths,
//! - time-step scale and field polarity,
//! - the empirical tuning constants (`exchange_unit_scale`, `falloff`)

use log::warn;

use crate::configuration::config::ParametersConfig;
use crate::simulation::error::{SimError, SimResult};

/// Largest wall-clock delta (seconds) fed into a single step
pub const MAX_FRAME_DELTA: f64 = 0.03;

/// Brings the exchange strength into the numeric range of the external field
pub const DEFAULT_EXCHANGE_UNIT_SCALE: f64 = 1e6;

/// Distance falloff coefficient of the point source, `1 / (1 + k d^2)`
pub const DEFAULT_FALLOFF: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gamma: f64, // gyromagnetic-ratio-like coefficient
    pub alpha: f64, // damping, dimensionless
    pub exchange_strength: f64, // neighbor coupling
    pub external_field_strength: f64, // point source strength
    pub time_step_scale: f64, // wall-clock seconds -> simulation time
    pub is_field_inverted: bool, // flips the external term
    pub exchange_unit_scale: f64,
    pub falloff: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gamma: 2.21e5,
            alpha: 0.1,
            exchange_strength: 1.0e-10,
            external_field_strength: 1.0e5,
            time_step_scale: 1.0e-9,
            is_field_inverted: false,
            exchange_unit_scale: DEFAULT_EXCHANGE_UNIT_SCALE,
            falloff: DEFAULT_FALLOFF,
        }
    }
}

impl Parameters {
    /// Build runtime parameters from the YAML-facing config.
    /// Non-finite values are rejected, values outside the usual ranges only warn.
    pub fn from_config(cfg: &ParametersConfig) -> SimResult<Self> {
        let params = Self {
            gamma: cfg.gamma,
            alpha: cfg.alpha,
            exchange_strength: cfg.exchange_strength,
            external_field_strength: cfg.external_field_strength,
            time_step_scale: cfg.time_step_scale,
            is_field_inverted: cfg.is_field_inverted,
            exchange_unit_scale: cfg.exchange_unit_scale,
            falloff: cfg.falloff,
        };
        params.validate()?;
        params.warn_out_of_range();
        Ok(params)
    }

    pub fn validate(&self) -> SimResult<()> {
        let values = [
            ("gamma", self.gamma),
            ("alpha", self.alpha),
            ("exchange_strength", self.exchange_strength),
            ("external_field_strength", self.external_field_strength),
            ("time_step_scale", self.time_step_scale),
            ("exchange_unit_scale", self.exchange_unit_scale),
            ("falloff", self.falloff),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(SimError::InvalidConfiguration(format!("{name} must be finite, got {value}")));
            }
        }
        if self.falloff < 0.0 {
            // 1 + k d^2 must stay positive
            return Err(SimError::InvalidConfiguration(format!("falloff must be >= 0, got {}", self.falloff)));
        }
        Ok(())
    }

    /// Simulation step for a wall-clock frame delta: `min(delta, 0.03) * time_step_scale`
    pub fn step_dt(&self, delta: f64) -> f64 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }
        delta.min(MAX_FRAME_DELTA) * self.time_step_scale
    }

    fn warn_out_of_range(&self) {
        let ranges = [
            ("gamma", self.gamma, 1e5, 1e6),
            ("alpha", self.alpha, 0.01, 1.5),
            ("exchange_strength", self.exchange_strength, 1e-11, 5e-10),
            ("external_field_strength", self.external_field_strength, 1e4, 1e6),
            ("time_step_scale", self.time_step_scale, 1e-10, 2e-9),
        ];
        for (name, value, lo, hi) in ranges {
            if value < lo || value > hi {
                warn!("{name} = {value:e} is outside the usual range [{lo:e}, {hi:e}]");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_dt_clamps_long_frames() {
        let p = Parameters::default();
        assert_eq!(p.step_dt(0.5), MAX_FRAME_DELTA * p.time_step_scale);
        assert_eq!(p.step_dt(0.01), 0.01 * p.time_step_scale);
    }

    #[test]
    fn step_dt_ignores_bad_deltas() {
        let p = Parameters::default();
        assert_eq!(p.step_dt(-1.0), 0.0);
        assert_eq!(p.step_dt(f64::NAN), 0.0);
    }

    #[test]
    fn validate_rejects_non_finite() {
        let p = Parameters { gamma: f64::INFINITY, ..Parameters::default() };
        assert!(p.validate().is_err());
    }
}
