#![deny(unused_variables)]
#![deny(unused_imports)]

use thiserror::Error;

use crate::grid_world::State;

/// Errors raised while building an environment or a checked solver.
#[derive(Debug, Error)]
pub enum MdpError {
    #[error("grid must have at least one row and one column, got {num_rows}x{num_cols}")]
    EmptyGrid { num_rows: i32, num_cols: i32 },

    #[error("forward probability must lie in (0, 1], got {0}")]
    InvalidForwardProbability(f64),

    #[error("state ({}, {}) lies outside the {num_cols}x{num_rows} grid", .state.x, .state.y)]
    StateOutOfBounds {
        state: State,
        num_rows: i32,
        num_cols: i32,
    },

    #[error("discount factor must lie in [0, 1), got {0}")]
    InvalidDiscount(f64),

    #[error("convergence threshold must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("value iteration did not converge within {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MdpError>;
