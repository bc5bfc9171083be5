//! Scenario generation for gridmapf: random obstacle grids, random agent
//! endpoints, and the [`ScenarioConfig`] that drives them.

pub mod error;
pub mod mapgen;
pub mod scenario;

pub use error::GenError;
pub use mapgen::GridGen;
pub use scenario::{Scenario, ScenarioConfig};
