#![deny(unused_variables)]
#![deny(unused_imports)]

//! Value iteration over any [`Mdp`].
//!
//! Every sweep applies the Bellman optimality backup to all states, reading
//! only the utilities produced by the previous sweep. The new utility map is
//! built in full before it replaces the old one.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{MdpError, Result};
use crate::mdp::Mdp;

/// Utility of every state.
pub type Utilities<S> = HashMap<S, f64>;

// ============================================================================
// Bellman backup helpers
// ============================================================================

/// Expected utility of taking `action` in `state`: `Σ P(s'|s,a) · U(s')`.
///
/// Zero for terminal states, since they have no successors.
///
/// # Panics
///
/// Panics if a successor has no entry in `utilities`.
pub fn expected_utility<M: Mdp>(
    mdp: &M,
    state: &M::State,
    action: &M::Action,
    utilities: &Utilities<M::State>,
) -> f64 {
    let mut total = 0.0;
    for (next, probability) in mdp.successors(state, action) {
        total += probability * utilities[&next];
    }
    return total;
}

/// One Bellman optimality backup of `state` against `utilities`.
fn backup<M: Mdp>(mdp: &M, state: &M::State, gamma: f64, utilities: &Utilities<M::State>) -> f64 {
    let reward = mdp.reward(state);
    if mdp.is_terminal(state) {
        return reward;
    }

    let mut best = f64::NEG_INFINITY;
    for action in mdp.actions(state) {
        best = best.max(expected_utility(mdp, state, &action, utilities));
    }
    return reward + gamma * best;
}

/// How far `state`'s utility is from its own Bellman backup.
///
/// Converged utilities keep this below the solver's epsilon for every
/// non-terminal state.
pub fn bellman_residual<M: Mdp>(
    mdp: &M,
    utilities: &Utilities<M::State>,
    gamma: f64,
    state: &M::State,
) -> f64 {
    return (utilities[state] - backup(mdp, state, gamma, utilities)).abs();
}

// ============================================================================
// Solver
// ============================================================================

/// Result of a checked solve.
#[derive(Clone, Debug)]
pub struct Convergence<S> {
    pub utilities: Utilities<S>,
    /// Number of full sweeps performed.
    pub iterations: usize,
}

/// Validated value-iteration parameters.
///
/// # Examples
///
/// ```
/// use gridworld_value_iteration::config::GridWorldConfig;
/// use gridworld_value_iteration::value_iteration::ValueIteration;
///
/// let env = GridWorldConfig::default().build_environment().unwrap();
/// let solver = ValueIteration::new(0.6, 0.01).unwrap().with_max_iterations(1000);
///
/// let result = solver.solve(&env).unwrap();
/// assert!(result.iterations > 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueIteration {
    gamma: f64,
    epsilon: f64,
    max_iterations: Option<usize>,
}

impl ValueIteration {
    /// Creates a solver, rejecting `gamma` outside `[0, 1)` and non-positive
    /// `epsilon`.
    pub fn new(gamma: f64, epsilon: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&gamma) {
            return Err(MdpError::InvalidDiscount(gamma));
        }
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(MdpError::InvalidEpsilon(epsilon));
        }
        return Ok(ValueIteration {
            gamma,
            epsilon,
            max_iterations: None,
        });
    }

    /// Gives up with [`MdpError::NotConverged`] after `max_iterations` sweeps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        return self;
    }

    pub fn gamma(&self) -> f64 {
        return self.gamma;
    }

    pub fn epsilon(&self) -> f64 {
        return self.epsilon;
    }

    pub fn solve<M: Mdp>(&self, mdp: &M) -> Result<Convergence<M::State>> {
        return run(mdp, self.gamma, self.epsilon, self.max_iterations);
    }
}

/// Computes converged utilities for every state of `mdp`.
///
/// Utilities start at each state's reward. A sweep counts as converged when
/// every non-terminal state moved by less than `epsilon` from the previous
/// sweep; the threshold is flat, with no scaling by `gamma`.
///
/// `gamma` must be below 1. No iteration cap applies here, so a discount of 1
/// or more may never terminate. Use [`ValueIteration`] for checked parameters.
///
/// # Examples
///
/// ```
/// use gridworld_value_iteration::config::GridWorldConfig;
/// use gridworld_value_iteration::grid_world::State;
/// use gridworld_value_iteration::value_iteration::value_iteration;
///
/// let env = GridWorldConfig::default().build_environment().unwrap();
/// let utilities = value_iteration(&env, 0.6, 0.01);
///
/// assert_eq!(utilities[&State::new(2, 3)], 3.0);
/// ```
pub fn value_iteration<M: Mdp>(mdp: &M, gamma: f64, epsilon: f64) -> Utilities<M::State> {
    match run(mdp, gamma, epsilon, None) {
        Ok(convergence) => return convergence.utilities,
        // Without a cap the loop only exits once converged.
        Err(_) => unreachable!("uncapped value iteration cannot give up"),
    }
}

fn run<M: Mdp>(
    mdp: &M,
    gamma: f64,
    epsilon: f64,
    max_iterations: Option<usize>,
) -> Result<Convergence<M::State>> {
    let states = mdp.states();
    let num_terminals = states.iter().filter(|s| mdp.is_terminal(s)).count();
    let required = states.len() - num_terminals;

    let mut utilities: Utilities<M::State> = states
        .iter()
        .map(|s| (s.clone(), mdp.reward(s)))
        .collect();

    let mut iterations = 0;
    loop {
        if let Some(limit) = max_iterations {
            if iterations >= limit {
                warn!(iterations, "value iteration gave up before converging");
                return Err(MdpError::NotConverged { iterations });
            }
        }
        iterations += 1;

        let mut next = Utilities::with_capacity(states.len());
        let mut converged = 0;
        for state in &states {
            let value = backup(mdp, state, gamma, &utilities);
            if !mdp.is_terminal(state) && (value - utilities[state]).abs() < epsilon {
                converged += 1;
            }
            next.insert(state.clone(), value);
        }
        utilities = next;

        debug!(iteration = iterations, converged, required, "value iteration sweep");
        if converged == required {
            info!(iterations, states = states.len(), "value iteration converged");
            return Ok(Convergence {
                utilities,
                iterations,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::grid_world::{Action, GridWorld, State};

    fn reference_world() -> GridWorld {
        let rewards = HashMap::from([(State::new(1, 3), -2.0), (State::new(2, 3), 3.0)]);
        let terminals = HashSet::from([State::new(1, 3), State::new(2, 3)]);
        return GridWorld::new(3, 2, rewards, terminals, 0.8, -1.0).unwrap();
    }

    #[test]
    fn test_terminal_utilities_equal_rewards() {
        let env = reference_world();
        let utilities = value_iteration(&env, 0.6, 0.01);
        assert_eq!(utilities.len(), 6);
        assert_eq!(utilities[&State::new(1, 3)], -2.0);
        assert_eq!(utilities[&State::new(2, 3)], 3.0);
    }

    #[test]
    fn test_converged_utilities_are_near_fixed_point() {
        let env = reference_world();
        let utilities = value_iteration(&env, 0.6, 0.01);
        for state in env.states() {
            if !env.is_terminal(&state) {
                assert!(bellman_residual(&env, &utilities, 0.6, &state) < 0.01);
            }
        }
    }

    #[test]
    fn test_states_closer_to_goal_are_worth_more() {
        let env = reference_world();
        let utilities = value_iteration(&env, 0.6, 0.01);
        assert!(utilities[&State::new(2, 2)] > utilities[&State::new(2, 1)]);
        assert!(utilities[&State::new(2, 2)] > utilities[&State::new(1, 2)]);
    }

    #[test]
    fn test_single_sweep_uses_previous_utilities() {
        // Row of three cells, goal on the right. After one sweep only the
        // neighbour of the goal can see it; a Gauss-Seidel update would
        // already propagate value to the leftmost cell.
        let rewards = HashMap::from([(State::new(3, 1), 10.0)]);
        let terminals = HashSet::from([State::new(3, 1)]);
        let env = GridWorld::new(1, 3, rewards, terminals, 1.0, 0.0).unwrap();

        let one_sweep = ValueIteration::new(0.5, 1e-9).unwrap().with_max_iterations(1);
        assert!(matches!(
            one_sweep.solve(&env),
            Err(MdpError::NotConverged { iterations: 1 })
        ));

        let two_sweeps = ValueIteration::new(0.5, 1e-9).unwrap().with_max_iterations(2);
        assert!(two_sweeps.solve(&env).is_err());

        let full = ValueIteration::new(0.5, 1e-9).unwrap().solve(&env).unwrap();
        assert_eq!(full.utilities[&State::new(2, 1)], 5.0);
        assert_eq!(full.utilities[&State::new(1, 1)], 2.5);
        // Sweep 1 reaches (2, 1), sweep 2 reaches (1, 1), sweep 3 observes no change
        assert_eq!(full.iterations, 3);
    }

    #[test]
    fn test_world_without_non_terminals_converges_immediately() {
        let terminals = HashSet::from([State::new(1, 1)]);
        let env = GridWorld::new(1, 1, HashMap::new(), terminals, 0.8, 4.0).unwrap();
        let result = ValueIteration::new(0.9, 0.01).unwrap().solve(&env).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.utilities[&State::new(1, 1)], 4.0);
    }

    #[test]
    fn test_expected_utility_weights_successors() {
        let env = reference_world();
        let mut utilities: Utilities<State> = env.states().into_iter().map(|s| (s, 0.0)).collect();
        utilities.insert(State::new(1, 3), 10.0);

        // From (1, 2) moving up lands on (1, 3) with probability 0.8
        let value = expected_utility(&env, &State::new(1, 2), &Action::Up, &utilities);
        assert!((value - 8.0).abs() < 1e-12);
        // Moving right only veers up with probability 0.1
        let value = expected_utility(&env, &State::new(1, 2), &Action::Right, &utilities);
        assert!((value - 1.0).abs() < 1e-9);
        // Terminals have no successors
        let value = expected_utility(&env, &State::new(1, 3), &Action::Up, &utilities);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_solver_rejects_bad_parameters() {
        assert!(matches!(ValueIteration::new(1.0, 0.01), Err(MdpError::InvalidDiscount(_))));
        assert!(matches!(ValueIteration::new(-0.1, 0.01), Err(MdpError::InvalidDiscount(_))));
        assert!(matches!(ValueIteration::new(0.5, 0.0), Err(MdpError::InvalidEpsilon(_))));
        assert!(matches!(
            ValueIteration::new(0.5, f64::INFINITY),
            Err(MdpError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn test_checked_solver_matches_free_function() {
        let env = reference_world();
        let solver = ValueIteration::new(0.6, 0.01).unwrap();
        let result = solver.solve(&env).unwrap();
        let utilities = value_iteration(&env, 0.6, 0.01);
        assert_eq!(result.utilities, utilities);
    }
}
