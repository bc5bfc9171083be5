//! Scenario configuration and generation.

use gridmapf_core::{Cell, Grid};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::GenError;
use crate::mapgen::GridGen;

/// Parameters of a random scenario.
///
/// The defaults describe a 50 × 50 grid with 30% obstacles and four agents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub rows: i32,
    pub cols: i32,
    /// Probability that any given cell is blocked.
    pub obstacle_prob: f64,
    pub agents: usize,
    /// Fixed RNG seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            obstacle_prob: 0.3,
            agents: 4,
            seed: None,
        }
    }
}

impl ScenarioConfig {
    /// Check that the settings describe a generatable scenario.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(GenError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..=1.0).contains(&self.obstacle_prob) {
            return Err(GenError::InvalidObstacleProbability(self.obstacle_prob));
        }
        Ok(())
    }

    /// Apply a single `key=value` override.
    ///
    /// Recognised keys: `rows`, `cols`, `obstacles`, `agents`, `seed`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), GenError> {
        let invalid = || GenError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "rows" => self.rows = value.parse().map_err(|_| invalid())?,
            "cols" => self.cols = value.parse().map_err(|_| invalid())?,
            "obstacles" => self.obstacle_prob = value.parse().map_err(|_| invalid())?,
            "agents" => self.agents = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            _ => return Err(GenError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    /// Build a config from `key=value` arguments applied over the defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                return Err(GenError::UnknownSetting(arg.to_string()));
            };
            config.set(key.trim(), value.trim())?;
        }
        config.validate()?;
        Ok(config)
    }
}

/// A generated grid with one `(start, end)` pair per agent.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub pairs: Vec<(Cell, Cell)>,
    /// Seed the scenario was generated from.
    pub seed: u64,
}

impl Scenario {
    /// Generate a scenario. The same config and seed always produce the
    /// same scenario.
    pub fn generate(config: &ScenarioConfig) -> Result<Self, GenError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            "generating {}x{} scenario, {} agents, obstacle probability {}, seed {}",
            config.rows, config.cols, config.agents, config.obstacle_prob, seed
        );
        let mut generator = GridGen::new(StdRng::seed_from_u64(seed));
        let grid = generator.random_grid(config.rows, config.cols, config.obstacle_prob);
        let pairs = generator.sample_pairs(&grid, config.agents)?;
        Ok(Self { grid, pairs, seed })
    }
}
