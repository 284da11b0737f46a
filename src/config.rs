#![deny(unused_variables)]
#![deny(unused_imports)]

//! Serializable description of a grid world and its solver parameters.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid_world::{GridWorld, State};
use crate::value_iteration::ValueIteration;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub state: State,
    pub reward: f64,
}

/// Everything needed to build a [`GridWorld`] and a [`ValueIteration`] solver.
///
/// `Default` is the 2-column by 3-row reference scenario: a -2 pit and a +3
/// goal on the top row, -1 per step elsewhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWorldConfig {
    pub num_rows: i32,
    pub num_cols: i32,
    pub rewards: Vec<RewardEntry>,
    pub terminals: Vec<State>,
    pub prob_forward: f64,
    pub reward_default: f64,
    pub gamma: f64,
    pub epsilon: f64,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        return GridWorldConfig {
            num_rows: 3,
            num_cols: 2,
            rewards: vec![
                RewardEntry { state: State::new(1, 3), reward: -2.0 },
                RewardEntry { state: State::new(2, 3), reward: 3.0 },
            ],
            terminals: vec![State::new(1, 3), State::new(2, 3)],
            prob_forward: 0.8,
            reward_default: -1.0,
            gamma: 0.6,
            epsilon: 0.01,
        };
    }
}

impl GridWorldConfig {
    /// Parses a JSON document; missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        return Ok(serde_json::from_str(json)?);
    }

    pub fn build_environment(&self) -> Result<GridWorld> {
        let rewards: HashMap<State, f64> =
            self.rewards.iter().map(|entry| (entry.state, entry.reward)).collect();
        let terminals: HashSet<State> = self.terminals.iter().copied().collect();
        return GridWorld::new(
            self.num_rows,
            self.num_cols,
            rewards,
            terminals,
            self.prob_forward,
            self.reward_default,
        );
    }

    pub fn solver(&self) -> Result<ValueIteration> {
        return ValueIteration::new(self.gamma, self.epsilon);
    }
}
