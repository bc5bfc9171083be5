//! Round-robin orchestration of all agent frontiers.

use std::collections::HashMap;

use gridmapf_core::Cell;
use log::{debug, trace};

use crate::error::{EndpointIssue, EndpointRole, SearchError};
use crate::frontier::{AgentFrontier, AgentStatus, Expansion};
use crate::occupancy::OccupancyTable;
use crate::traits::Traversable;

/// The route found for one agent.
///
/// `cells[t]` is where the agent stands at time step `t`, from its start
/// (`t = 0`) to its end inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentPath {
    pub agent: usize,
    pub cells: Vec<Cell>,
}

impl AgentPath {
    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (`len - 1`).
    #[inline]
    pub fn moves(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Cell occupied at time step `t`, if the path lasts that long.
    #[inline]
    pub fn at(&self, t: usize) -> Option<Cell> {
        self.cells.get(t).copied()
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn end(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: usize,
    /// Frontiers that performed an expansion step this round.
    pub expanded: usize,
    /// Agents that reached their goal this round, in processing order.
    pub finished: Vec<usize>,
    /// Agents whose queue ran empty this round.
    pub exhausted: Vec<usize>,
    /// Size of the occupancy table after the round.
    pub claims: usize,
}

/// Interleaved shortest-path search for several agents sharing one grid.
///
/// Each round performs exactly one expansion step for every still-active
/// agent, visiting agents in index order. Claims made by an agent are
/// visible to every agent processed after it, including later agents in
/// the same round. Agents are dropped from the rotation once they reach
/// their goal or run out of nodes.
pub struct TimeExpandedSearch<'g, G: Traversable> {
    map: &'g G,
    frontiers: Vec<AgentFrontier>,
    active: Vec<usize>,
    occupancy: OccupancyTable,
    paths: Vec<AgentPath>,
    round: usize,
}

impl<'g, G: Traversable> TimeExpandedSearch<'g, G> {
    /// Set up one frontier per `(start, end)` pair.
    ///
    /// Fails if any endpoint is outside the map or not traversable, or if
    /// two agents share a start cell.
    pub fn new(map: &'g G, pairs: &[(Cell, Cell)]) -> Result<Self, SearchError> {
        validate_pairs(map, pairs)?;
        let frontiers: Vec<_> = pairs
            .iter()
            .enumerate()
            .map(|(agent, &(start, end))| AgentFrontier::new(map, agent, start, end))
            .collect();
        debug!(
            "time-expanded search: {} agents on a {} grid",
            frontiers.len(),
            map.bounds()
        );
        Ok(Self {
            map,
            active: (0..frontiers.len()).collect(),
            frontiers,
            occupancy: OccupancyTable::new(),
            paths: Vec::new(),
            round: 0,
        })
    }

    /// Run one round. Returns `None` once no agent is active.
    pub fn step(&mut self) -> Option<RoundReport> {
        if self.active.is_empty() {
            return None;
        }
        self.round += 1;
        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };

        let active = std::mem::take(&mut self.active);
        let mut still_active = Vec::with_capacity(active.len());
        for agent in active {
            let frontier = &mut self.frontiers[agent];
            match frontier.expand(self.map, &mut self.occupancy) {
                Expansion::Expanded { .. } => {
                    report.expanded += 1;
                    still_active.push(agent);
                }
                Expansion::Reached(cells) => {
                    report.expanded += 1;
                    debug!(
                        "agent {agent} reached {} in {} moves (round {})",
                        frontier.end(),
                        cells.len().saturating_sub(1),
                        self.round
                    );
                    report.finished.push(agent);
                    self.paths.push(AgentPath { agent, cells });
                }
                Expansion::Exhausted => {
                    report.expanded += 1;
                    debug!(
                        "agent {agent} exhausted its frontier after {} expansions (round {})",
                        frontier.expansions(),
                        self.round
                    );
                    report.exhausted.push(agent);
                }
                Expansion::Terminated => {}
            }
        }
        self.active = still_active;
        report.claims = self.occupancy.len();
        trace!(
            "round {}: {} active, {} claims",
            self.round,
            self.active.len(),
            report.claims
        );
        Some(report)
    }

    /// Run rounds until every agent has reached its goal or run out of
    /// nodes, and return the paths in the order agents finished.
    pub fn run(mut self) -> Vec<AgentPath> {
        while self.step().is_some() {}
        debug!(
            "search finished after {} rounds: {}/{} agents reached their goal, {} claims",
            self.round,
            self.paths.len(),
            self.frontiers.len(),
            self.occupancy.len()
        );
        self.paths
    }

    /// Whether no agent is active any more.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of rounds run so far.
    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Number of agents.
    #[inline]
    pub fn agents(&self) -> usize {
        self.frontiers.len()
    }

    /// The shared occupancy table.
    #[inline]
    pub fn occupancy(&self) -> &OccupancyTable {
        &self.occupancy
    }

    /// Paths found so far, in finishing order.
    #[inline]
    pub fn paths(&self) -> &[AgentPath] {
        &self.paths
    }

    /// Status of `agent`, or `None` if there is no such agent.
    pub fn status(&self, agent: usize) -> Option<AgentStatus> {
        self.frontiers.get(agent).map(AgentFrontier::status)
    }

    /// Frontier of `agent`, for inspection.
    pub fn frontier(&self, agent: usize) -> Option<&AgentFrontier> {
        self.frontiers.get(agent)
    }

    /// Consume the search and return the paths found so far.
    pub fn into_paths(self) -> Vec<AgentPath> {
        self.paths
    }
}

/// Find collision-aware paths for every `(start, end)` pair on `map`.
///
/// Returns one path per agent that reached its goal, in the order agents
/// finished. Agents that cannot reach their goal are silently left out, so
/// compare `result.len()` with `pairs.len()` to detect them.
pub fn search<G: Traversable>(
    map: &G,
    pairs: &[(Cell, Cell)],
) -> Result<Vec<AgentPath>, SearchError> {
    Ok(TimeExpandedSearch::new(map, pairs)?.run())
}

fn validate_pairs<G: Traversable>(map: &G, pairs: &[(Cell, Cell)]) -> Result<(), SearchError> {
    let bounds = map.bounds();
    let mut starts: HashMap<Cell, usize> = HashMap::with_capacity(pairs.len());
    for (agent, &(start, end)) in pairs.iter().enumerate() {
        for (role, cell) in [(EndpointRole::Start, start), (EndpointRole::End, end)] {
            let reason = if !bounds.contains(cell) {
                EndpointIssue::OutOfBounds
            } else if !map.is_traversable(cell) {
                EndpointIssue::Blocked
            } else {
                continue;
            };
            return Err(SearchError::InvalidEndpoint {
                agent,
                role,
                cell,
                reason,
            });
        }
        if let Some(&first) = starts.get(&start) {
            return Err(SearchError::SharedStart {
                first,
                second: agent,
                cell: start,
            });
        }
        starts.insert(start, agent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmapf_core::{Grid, manhattan};

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn single_agent_on_open_3x3() {
        let grid = Grid::new(3, 3);
        let paths = search(&grid, &[(c(0, 0), c(2, 2))]).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].agent, 0);
        // Down before right: the neighbour order decides equal-cost routes.
        assert_eq!(
            paths[0].cells,
            vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)]
        );
    }

    #[test]
    fn head_on_corridor_yields_one_path() {
        let grid = Grid::new(1, 3);
        let pairs = [(c(0, 0), c(0, 2)), (c(0, 2), c(0, 0))];
        let mut s = TimeExpandedSearch::new(&grid, &pairs).unwrap();

        let r1 = s.step().unwrap();
        assert_eq!(r1.expanded, 2);
        // Agent 0 claimed (0,1)@1 first, which leaves agent 1 with nothing.
        assert_eq!(r1.exhausted, vec![1]);
        assert!(s.occupancy().is_claimed(c(0, 1), 1));

        let paths = s.run();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].agent, 0);
        assert_eq!(paths[0].cells, vec![c(0, 0), c(0, 1), c(0, 2)]);
        assert_eq!(paths[0].at(1), Some(c(0, 1)));
        assert_eq!(paths[0].at(3), None);
    }

    #[test]
    fn start_equal_to_end() {
        let grid = Grid::new(2, 2);
        let paths = search(&grid, &[(c(1, 1), c(1, 1))]).unwrap();
        assert_eq!(paths, vec![AgentPath { agent: 0, cells: vec![c(1, 1)] }]);
    }

    #[test]
    fn unreachable_goal_is_silently_absent() {
        let grid = Grid::parse("..#..").unwrap();
        let pairs = [(c(0, 0), c(0, 4)), (c(0, 3), c(0, 4))];
        let mut s = TimeExpandedSearch::new(&grid, &pairs).unwrap();
        while s.step().is_some() {}
        assert!(s.is_finished());
        assert_eq!(s.status(0), Some(AgentStatus::Exhausted));
        assert_eq!(s.status(1), Some(AgentStatus::Reached));
        assert_eq!(s.status(2), None);
        let paths = s.into_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].agent, 1);
    }

    #[test]
    fn paths_come_back_in_finishing_order() {
        let grid = Grid::new(5, 5);
        let pairs = [(c(0, 0), c(4, 4)), (c(2, 2), c(2, 3))];
        let paths = search(&grid, &pairs).unwrap();
        let agents: Vec<_> = paths.iter().map(|p| p.agent).collect();
        assert_eq!(agents, vec![1, 0]);
    }

    #[test]
    fn free_grid_single_agent_is_manhattan() {
        let grid = Grid::new(6, 7);
        for &(s, e) in &[
            (c(0, 0), c(5, 6)),
            (c(5, 6), c(0, 0)),
            (c(3, 1), c(0, 5)),
            (c(2, 2), c(2, 6)),
        ] {
            let paths = search(&grid, &[(s, e)]).unwrap();
            assert_eq!(paths.len(), 1);
            assert_eq!(paths[0].len() as i32, manhattan(s, e) + 1);
            assert_eq!(paths[0].start(), Some(s));
            assert_eq!(paths[0].end(), Some(e));
        }
    }

    #[test]
    fn occupancy_grows_monotonically() {
        let grid = Grid::parse(
            "
            ......
            .##.#.
            ......
            .#..#.
            ......
            ",
        )
        .unwrap();
        let pairs = [
            (c(0, 0), c(4, 5)),
            (c(4, 0), c(0, 5)),
            (c(2, 0), c(2, 5)),
        ];
        let mut s = TimeExpandedSearch::new(&grid, &pairs).unwrap();
        assert_eq!(s.agents(), 3);
        let mut last = 0;
        let mut rounds = 0;
        while let Some(report) = s.step() {
            assert!(report.claims >= last);
            assert_eq!(report.claims, s.occupancy().len());
            last = report.claims;
            rounds += 1;
        }
        assert_eq!(rounds, s.round());
        assert!(s.step().is_none());
    }

    #[test]
    fn later_agents_see_claims_from_the_same_round() {
        // Both agents want (1,1) at time 1; agent 0 goes first.
        let grid = Grid::parse(
            "
            #.#
            ...
            #.#
            ",
        )
        .unwrap();
        let pairs = [(c(0, 1), c(2, 1)), (c(1, 0), c(1, 2))];
        let mut s = TimeExpandedSearch::new(&grid, &pairs).unwrap();
        s.step();
        let f1 = s.frontier(1).unwrap();
        assert_eq!(f1.predecessor(c(1, 1)), None);
        assert!(s.occupancy().is_claimed(c(1, 1), 1));
        assert_eq!(s.frontier(0).unwrap().predecessor(c(1, 1)), Some(Some(c(0, 1))));
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let grid = Grid::parse(".#\n..").unwrap();
        assert_eq!(
            search(&grid, &[(c(0, 0), c(5, 0))]),
            Err(SearchError::InvalidEndpoint {
                agent: 0,
                role: EndpointRole::End,
                cell: c(5, 0),
                reason: EndpointIssue::OutOfBounds,
            })
        );
        assert_eq!(
            search(&grid, &[(c(1, 0), c(1, 1)), (c(0, 1), c(0, 0))]),
            Err(SearchError::InvalidEndpoint {
                agent: 1,
                role: EndpointRole::Start,
                cell: c(0, 1),
                reason: EndpointIssue::Blocked,
            })
        );
        assert_eq!(
            search(&grid, &[(c(1, 0), c(1, 1)), (c(1, 0), c(0, 0))]),
            Err(SearchError::SharedStart {
                first: 0,
                second: 1,
                cell: c(1, 0),
            })
        );
    }

    #[test]
    fn no_agents_is_an_empty_result() {
        let grid = Grid::new(2, 2);
        let mut s = TimeExpandedSearch::new(&grid, &[]).unwrap();
        assert!(s.is_finished());
        assert!(s.step().is_none());
        assert!(s.run().is_empty());
    }
}
