pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Site, Lattice, NVec3, NMat4};
pub use simulation::error::{SimError, SimResult};
pub use simulation::params::Parameters;
pub use simulation::forces::{FieldContext, FieldSet, FieldTerm, PointSourceField, ExchangeField};
pub use simulation::integrator::{llg_rhs, llg_step};
pub use simulation::pointer::{Ray, PointerTarget};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ParametersConfig, LatticeConfig, ViewerConfig, ScenarioConfig};

pub use visualization::spin_vis3d::run_3d;

pub use benchmark::benchmark::{bench_step, bench_step_curve};
