use spinsim::{ScenarioConfig, Scenario, NVec3};
use spinsim::run_3d;
use spinsim::{bench_step, bench_step_curve};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the scenario's grid size
    #[arg(long)]
    grid_size: Option<i64>,

    /// Step without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Print step timings instead of running the scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step();
        bench_step_curve();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(n) = args.grid_size {
        scenario_cfg.lattice.grid_size = n;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.headless {
        // pointer parked just off one corner of the lattice
        let edge = scenario.engine.lattice().size as f64 * scenario.engine.lattice().spacing / 2.0;
        let mean = scenario.run_headless(args.frames, 1.0 / 60.0, NVec3::new(edge, edge, 0.0));
        println!("after {} frames: mean spin = [{:.6}, {:.6}, {:.6}], |mean| = {:.6}", args.frames, mean.x, mean.y, mean.z, mean.norm());
    } else {
        run_3d(scenario);
    }

    Ok(())
}
