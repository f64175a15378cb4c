use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec3;

/// Frame delta used for every timed step (60 Hz)
const BENCH_DELTA: f64 = 1.0 / 60.0;

/// Build an engine of `n x n` sites with unit spacing
fn make_engine(n: i64) -> Option<Engine> {
    match Engine::build(n, 1.0) {
        Ok(engine) => Some(engine),
        Err(e) => {
            println!("skipping n = {n}: {e}");
            None
        }
    }
}

/// Pointer target circling the lattice so every frame sees a different field
fn orbit(n: i64, frame: usize) -> NVec3 {
    let r = n as f64 * 0.25;
    let phase = frame as f64 * 0.05;
    NVec3::new(r * phase.cos(), r * phase.sin(), 0.0)
}

/// Time a full `Engine::step` for a few lattice sizes
pub fn bench_step() {
    let ns = [20, 40, 80, 160, 320];
    let steps = 20; // steps per size, tune as needed
    let params = Parameters::default();

    for n in ns {
        let Some(mut engine) = make_engine(n) else { continue };

        // Warm up
        engine.step(BENCH_DELTA, Some(orbit(n, 0)), &params);

        let t0 = Instant::now();
        for frame in 0..steps {
            engine.step(BENCH_DELTA, Some(orbit(n, frame)), &params);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:4} ({:6} sites), step = {:8.6} s, {:8.2} ns/site", n, n * n, per_step, per_step * 1e9 / (n * n) as f64);
    }
}

/// Step time over a sweep of grid sizes
/// Paste output directly into excel to graph
pub fn bench_step_curve() {
    println!("N,sites,step_ms");

    let params = Parameters::default();

    for n in (10..=400).step_by(10) {
        // Small lattices: average over more steps to smooth noise
        let steps = if n <= 100 { 50 } else { 5 };

        let Some(mut engine) = make_engine(n) else { continue };

        let t0 = Instant::now();
        for frame in 0..steps {
            engine.step(BENCH_DELTA, Some(orbit(n, frame)), &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{},{:.6}", n, n * n, ms);
    }
}
