use std::fmt;

use gridmapf_core::Cell;
use thiserror::Error;

/// Which end of an agent's route an endpoint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Start,
    End,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointIssue {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("outside the grid"),
            Self::Blocked => f.write_str("blocked"),
        }
    }
}

/// Input rejected before any search work is done.
///
/// An agent that simply cannot reach its goal is not an error: it is left
/// out of the returned paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("agent {agent}: {role} {cell} is {reason}")]
    InvalidEndpoint {
        agent: usize,
        role: EndpointRole,
        cell: Cell,
        reason: EndpointIssue,
    },
    /// Two agents would occupy the same cell at time 0.
    #[error("agents {first} and {second} both start at {cell}")]
    SharedStart {
        first: usize,
        second: usize,
        cell: Cell,
    },
}
