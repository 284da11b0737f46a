#![deny(unused_variables)]
#![deny(unused_imports)]

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{MdpError, Result};
use crate::mdp::Mdp;

// ============================================================================
// GridWorld Environment
// ============================================================================

/// A grid cell, 1-indexed: `x` is the column, `y` the row (row 1 at the bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub x: i32,
    pub y: i32,
}

impl State {
    pub fn new(x: i32, y: i32) -> Self {
        return State { x, y };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// All actions in enumeration order. Policy ties resolve to the earliest.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    fn delta(&self) -> (i32, i32) {
        match self {
            Action::Up => return (0, 1),
            Action::Right => return (1, 0),
            Action::Down => return (0, -1),
            Action::Left => return (-1, 0),
        }
    }

    /// The two directions the agent can veer into when attempting `self`.
    pub fn perpendicular(&self) -> [Action; 2] {
        match self {
            Action::Up | Action::Down => return [Action::Right, Action::Left],
            Action::Right | Action::Left => return [Action::Up, Action::Down],
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Up => return "^^^",
            Action::Right => return ">>>",
            Action::Down => return "vvv",
            Action::Left => return "<<<",
        }
    }
}

/// A rectangular grid world with sparse rewards, absorbing terminals and a
/// slippery transition model: the intended move succeeds with `prob_forward`,
/// otherwise the agent veers to either perpendicular side with equal odds.
/// Bumping into a wall leaves the agent where it was.
#[derive(Clone, Debug)]
pub struct GridWorld {
    num_rows: i32,
    num_cols: i32,
    rewards: HashMap<State, f64>,
    terminals: HashSet<State>,
    prob_forward: f64,
    prob_side: f64,
    reward_default: f64,
}

impl GridWorld {
    pub fn new(
        num_rows: i32,
        num_cols: i32,
        rewards: HashMap<State, f64>,
        terminals: HashSet<State>,
        prob_forward: f64,
        reward_default: f64,
    ) -> Result<Self> {
        if num_rows < 1 || num_cols < 1 {
            return Err(MdpError::EmptyGrid { num_rows, num_cols });
        }
        if !(prob_forward > 0.0 && prob_forward <= 1.0) {
            return Err(MdpError::InvalidForwardProbability(prob_forward));
        }

        let world = GridWorld {
            num_rows,
            num_cols,
            rewards,
            terminals,
            prob_forward,
            prob_side: (1.0 - prob_forward) / 2.0,
            reward_default,
        };

        for state in world.rewards.keys().chain(world.terminals.iter()) {
            if !world.contains(state) {
                return Err(MdpError::StateOutOfBounds {
                    state: *state,
                    num_rows,
                    num_cols,
                });
            }
        }

        return Ok(world);
    }

    pub fn num_rows(&self) -> i32 {
        return self.num_rows;
    }

    pub fn num_cols(&self) -> i32 {
        return self.num_cols;
    }

    pub fn prob_forward(&self) -> f64 {
        return self.prob_forward;
    }

    pub fn prob_side(&self) -> f64 {
        return self.prob_side;
    }

    pub fn contains(&self, state: &State) -> bool {
        return (1..=self.num_cols).contains(&state.x) && (1..=self.num_rows).contains(&state.y);
    }

    /// Moves one cell in `direction`, clamping at the walls.
    pub fn step(&self, state: &State, direction: &Action) -> State {
        let (dx, dy) = direction.delta();
        return State {
            x: (state.x + dx).clamp(1, self.num_cols),
            y: (state.y + dy).clamp(1, self.num_rows),
        };
    }
}

impl Mdp for GridWorld {
    type State = State;
    type Action = Action;

    /// Column-major: (1, 1), (1, 2), ..., (1, rows), (2, 1), ...
    fn states(&self) -> Vec<State> {
        let mut states = Vec::with_capacity((self.num_rows * self.num_cols) as usize);
        for x in 1..=self.num_cols {
            for y in 1..=self.num_rows {
                states.push(State { x, y });
            }
        }
        return states;
    }

    fn actions(&self, _state: &State) -> Vec<Action> {
        return Action::ALL.to_vec();
    }

    fn successors(&self, state: &State, action: &Action) -> BTreeMap<State, f64> {
        let mut probs = BTreeMap::new();
        if self.is_terminal(state) {
            return probs;
        }

        let [side_a, side_b] = action.perpendicular();
        let outcomes = [
            (self.step(state, action), self.prob_forward),
            (self.step(state, &side_a), self.prob_side),
            (self.step(state, &side_b), self.prob_side),
        ];

        // Clamped candidates can land on the same cell; their mass adds up.
        for (next, p) in outcomes {
            let current = probs.get(&next).copied().unwrap_or(0.0);
            probs.insert(next, current + p);
        }
        return probs;
    }

    fn reward(&self, state: &State) -> f64 {
        return self.rewards.get(state).copied().unwrap_or(self.reward_default);
    }

    fn is_terminal(&self, state: &State) -> bool {
        return self.terminals.contains(state);
    }
}
