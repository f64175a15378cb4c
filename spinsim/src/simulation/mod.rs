pub mod states;
pub mod params;
pub mod error;
pub mod lattice;
pub mod pointer;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod scenario;
