//! Build a fully-initialized spin scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - dynamics parameters (`Parameters`), mutable at any time
//! - frame driver (`Engine`) with a freshly built lattice
//! - viewer settings passed through untouched
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! stepping and rendering systems

use bevy::prelude::Resource;
use log::info;

use crate::configuration::config::{ScenarioConfig, ViewerConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimResult;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Bevy resource holding everything one running lattice needs
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub engine: Engine,
    pub viewer: ViewerConfig,
}

impl Scenario {
    /// Validate the config and build the lattice. Any rejected value is returned, not patched.
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let parameters = Parameters::from_config(&cfg.parameters)?;
        let engine = Engine::build(cfg.lattice.grid_size, cfg.lattice.spacing)?;

        Ok(Self {
            parameters,
            engine,
            viewer: cfg.viewer,
        })
    }

    /// Grid-size change: full rebuild, spins back to +z
    pub fn set_grid_size(&mut self, grid_size: i64) -> SimResult<()> {
        self.engine.rebuild(grid_size)
    }

    /// Advance one frame with the current parameters
    pub fn step(&mut self, delta: f64, hit: Option<NVec3>) {
        let Scenario { parameters, engine, .. } = self;
        engine.step(delta, hit, parameters);
    }

    /// Step without a window at a fixed frame delta and a fixed pointer target.
    /// Returns the mean spin after the last frame.
    pub fn run_headless(&mut self, frames: u64, delta: f64, target: NVec3) -> NVec3 {
        info!("headless run: {frames} frames, delta {delta}s, pointer at {target:?}");
        for _ in 0..frames {
            self.step(delta, Some(target));
        }
        self.engine.mean_direction()
    }
}
