//! Shared demo code: run a generated scenario and draw the result as text.
//!
//! Each agent gets a letter. Its start and end cells are drawn in uppercase
//! and the cells in between in lowercase, on top of the `.`/`#` grid.

use std::fmt;

use gridmapf_core::{Cell, Grid};
use gridmapf_gen::{GenError, Scenario, ScenarioConfig};
use gridmapf_paths::{AgentPath, Collision, SearchError, find_collisions, search};
use thiserror::Error;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Letter used for `agent`, cycling after `z`.
pub fn agent_letter(agent: usize) -> char {
    LETTERS[agent % LETTERS.len()] as char
}

/// Render `grid` with `paths` drawn on top, one line per row.
///
/// Paths are drawn in order, so a later path overwrites an earlier one on
/// cells both visit (at different times).
pub fn render(grid: &Grid, paths: &[AgentPath]) -> String {
    let cols = grid.cols().max(0) as usize;
    let mut canvas: Vec<char> = grid.iter().map(|(_, t)| t.as_char()).collect();
    let mut put = |c: Cell, ch: char| {
        if let Some(i) = grid.bounds().index(c) {
            canvas[i] = ch;
        }
    };
    for path in paths {
        let letter = agent_letter(path.agent);
        for &c in &path.cells {
            put(c, letter);
        }
        for c in [path.start(), path.end()].into_iter().flatten() {
            put(c, letter.to_ascii_uppercase());
        }
    }
    let mut out = String::with_capacity(canvas.len() + grid.rows().max(0) as usize);
    for row in canvas.chunks(cols.max(1)) {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Why a demo run failed.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("scenario: {0}")]
    Gen(#[from] GenError),
    #[error("search: {0}")]
    Search(#[from] SearchError),
}

/// Outcome of one generated scenario.
pub struct DemoRun {
    pub scenario: Scenario,
    pub paths: Vec<AgentPath>,
    pub collisions: Vec<Collision>,
}

impl DemoRun {
    /// Generate the scenario described by `config` and search it.
    pub fn execute(config: &ScenarioConfig) -> Result<Self, DemoError> {
        let scenario = Scenario::generate(config)?;
        let paths = search(&scenario.grid, &scenario.pairs)?;
        let collisions = find_collisions(&paths);
        Ok(Self {
            scenario,
            paths,
            collisions,
        })
    }
}

/// Per-agent summary lines in agent order, then a totals line.
impl fmt::Display for DemoRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (agent, &(start, end)) in self.scenario.pairs.iter().enumerate() {
            let letter = agent_letter(agent).to_ascii_uppercase();
            match self.paths.iter().find(|p| p.agent == agent) {
                Some(path) => writeln!(f, "{letter}: {start} -> {end}, {} moves", path.moves())?,
                None => writeln!(f, "{letter}: {start} -> {end}, no path")?,
            }
        }
        writeln!(
            f,
            "{}/{} agents reached their goal, {} collisions (seed {})",
            self.paths.len(),
            self.scenario.pairs.len(),
            self.collisions.len(),
            self.scenario.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_marks_paths() {
        let grid = Grid::parse("...\n.#.\n...").unwrap();
        let paths = vec![AgentPath {
            agent: 1,
            cells: vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
            ],
        }];
        assert_eq!(render(&grid, &paths), "Bbb\n.#B\n...\n");
        assert_eq!(render(&grid, &[]), "...\n.#.\n...\n");
    }

    #[test]
    fn summary_lists_missing_paths() {
        let run = DemoRun {
            scenario: Scenario {
                grid: Grid::parse("..#").unwrap(),
                pairs: vec![
                    (Cell::new(0, 0), Cell::new(0, 1)),
                    (Cell::new(0, 1), Cell::new(0, 0)),
                ],
                seed: 5,
            },
            paths: vec![AgentPath {
                agent: 0,
                cells: vec![Cell::new(0, 0), Cell::new(0, 1)],
            }],
            collisions: Vec::new(),
        };
        assert_eq!(
            run.to_string(),
            "A: (0, 0) -> (0, 1), 1 moves\n\
             B: (0, 1) -> (0, 0), no path\n\
             1/2 agents reached their goal, 0 collisions (seed 5)\n"
        );
    }

    #[test]
    fn letters_cycle() {
        assert_eq!(agent_letter(0), 'a');
        assert_eq!(agent_letter(25), 'z');
        assert_eq!(agent_letter(26), 'a');
    }

    #[test]
    fn execute_small_scenario() {
        let config = ScenarioConfig {
            rows: 12,
            cols: 12,
            obstacle_prob: 0.2,
            agents: 3,
            seed: Some(8),
        };
        let run = DemoRun::execute(&config).unwrap();
        assert!(run.collisions.is_empty());
        assert!(run.paths.len() <= 3);
        let summary = run.to_string();
        assert_eq!(summary.lines().count(), 4);
        assert!(summary.contains("(seed 8)"));
        assert_eq!(render(&run.scenario.grid, &run.paths).lines().count(), 12);
    }
}
