//! Configuration types for loading spin lattice scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – dynamics coefficients, read by the core every frame
//! - [`LatticeConfig`]    – grid size and site spacing
//! - [`ViewerConfig`]     – presentation-only settings for the Bevy viewer
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field is optional; anything missing falls back to its default.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   gamma: 2.21e5                   # precession coefficient
//!   alpha: 0.1                      # damping, roughly [0, 1.5]
//!   exchange_strength: 1.0e-10      # neighbor coupling
//!   external_field_strength: 1.0e5  # pointer source strength
//!   time_step_scale: 1.0e-9         # wall-clock seconds -> simulation time
//!   is_field_inverted: false        # flip the pointer field
//!   exchange_unit_scale: 1.0e6      # empirical, keeps exchange comparable to the source
//!   falloff: 5.0                    # empirical, 1 / (1 + falloff * d^2)
//!
//! lattice:
//!   grid_size: 20
//!   spacing: 1.0
//!
//! viewer:
//!   scale: 20.0
//!   camera_distance: 600.0
//! ```

use serde::Deserialize;

use crate::simulation::params::Parameters;

/// Dynamics coefficients, see [`Parameters`] for their meaning
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub gamma: f64,
    pub alpha: f64,
    pub exchange_strength: f64,
    pub external_field_strength: f64,
    pub time_step_scale: f64,
    pub is_field_inverted: bool,
    pub exchange_unit_scale: f64,
    pub falloff: f64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            gamma: p.gamma,
            alpha: p.alpha,
            exchange_strength: p.exchange_strength,
            external_field_strength: p.external_field_strength,
            time_step_scale: p.time_step_scale,
            is_field_inverted: p.is_field_inverted,
            exchange_unit_scale: p.exchange_unit_scale,
            falloff: p.falloff,
        }
    }
}

/// Lattice geometry
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LatticeConfig {
    pub grid_size: i64, // signed so a negative value reaches the builder and is rejected there
    pub spacing: f64, // distance between neighboring sites, world units
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            spacing: 1.0,
        }
    }
}

/// Presentation settings, never read by the core
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub scale: f32, // world -> screen scaling
    pub camera_distance: f32, // camera height above the lattice plane
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 20.0,
            camera_distance: 600.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub lattice: LatticeConfig,
    pub viewer: ViewerConfig,
}
