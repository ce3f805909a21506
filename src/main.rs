use ppsim::{Scenario, ScenarioConfig};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "bridge.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();

    let scenario_cfg = load_scenario_from_yaml()?;
    let mut scenario = Scenario::build_scenario(scenario_cfg);

    log::info!(
        "stepping {} particles with dt = {} until t = {}",
        scenario.world.particles().len(),
        scenario.dt,
        scenario.t_end
    );

    // Headless tick driver: the world only asks to be stepped at a
    // regular cadence with nothing else touching particle state.
    let mut t = 0.0;
    let mut steps: u64 = 0;
    while t < scenario.t_end {
        scenario.world.start_frame();
        scenario.world.run_physics(scenario.dt);
        t += scenario.dt;
        steps += 1;
    }

    log::info!("simulated {} steps to t = {:.4}", steps, t);

    for (index, particle) in scenario.world.particles().iter().enumerate() {
        let position = particle.position();
        let velocity = particle.velocity();
        println!(
            "particle {:3}: position = ({:+.4}, {:+.4}, {:+.4})  velocity = ({:+.4}, {:+.4}, {:+.4})",
            index, position.x, position.y, position.z, velocity.x, velocity.y, velocity.z
        );
    }

    Ok(())
}
