//! Generate a random grid with several agents, search collision-aware paths
//! and print the result.
//!
//! Run: cargo run --bin gridmapf -- rows=30 cols=60 obstacles=0.25 agents=6 seed=7
//!
//! Set `RUST_LOG=debug` to follow the search agent by agent.

use gridmapf_demos::{DemoRun, render};
use gridmapf_gen::ScenarioConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ScenarioConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("usage: gridmapf [rows=N] [cols=N] [obstacles=P] [agents=N] [seed=N]");
            std::process::exit(2);
        }
    };

    let run = match DemoRun::execute(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    print!("{}", render(&run.scenario.grid, &run.paths));
    println!();
    print!("{run}");

    if !run.collisions.is_empty() {
        for c in &run.collisions {
            log::error!(
                "agents {} and {} both on {} at step {}",
                c.agents.0,
                c.agents.1,
                c.cell,
                c.time
            );
        }
        std::process::exit(1);
    }
}
