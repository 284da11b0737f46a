#![deny(unused_variables)]
#![deny(unused_imports)]

use std::collections::HashMap;

use crate::mdp::Mdp;
use crate::value_iteration::{expected_utility, Utilities};

/// Best action per state, `None` for terminal states.
pub type Policy<S, A> = HashMap<S, Option<A>>;

/// Derives the greedy policy from converged utilities.
///
/// Each non-terminal state picks the action with the highest expected utility.
/// Actions are tried in the order [`Mdp::actions`] returns them and a later
/// action replaces the current best only if it is strictly better, so ties go
/// to the earliest one.
///
/// # Panics
///
/// Panics if `utilities` lacks an entry for a reachable successor.
///
/// # Examples
///
/// ```
/// use gridworld_value_iteration::config::GridWorldConfig;
/// use gridworld_value_iteration::grid_world::State;
/// use gridworld_value_iteration::policy::derive_policy;
/// use gridworld_value_iteration::value_iteration::value_iteration;
///
/// let env = GridWorldConfig::default().build_environment().unwrap();
/// let utilities = value_iteration(&env, 0.6, 0.01);
/// let policy = derive_policy(&env, &utilities);
///
/// assert_eq!(policy[&State::new(2, 3)], None);
/// ```
pub fn derive_policy<M: Mdp>(
    mdp: &M,
    utilities: &Utilities<M::State>,
) -> Policy<M::State, M::Action> {
    let mut policy = Policy::new();

    for state in mdp.states() {
        if mdp.is_terminal(&state) {
            policy.insert(state, None);
            continue;
        }

        let mut best_action = None;
        let mut best_value = f64::NEG_INFINITY;
        for action in mdp.actions(&state) {
            let value = expected_utility(mdp, &state, &action, utilities);
            if value > best_value {
                best_value = value;
                best_action = Some(action);
            }
        }
        policy.insert(state, best_action);
    }

    return policy;
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::grid_world::{Action, GridWorld, State};
    use crate::value_iteration::value_iteration;

    fn reference_world() -> GridWorld {
        let rewards = HashMap::from([(State::new(1, 3), -2.0), (State::new(2, 3), 3.0)]);
        let terminals = HashSet::from([State::new(1, 3), State::new(2, 3)]);
        return GridWorld::new(3, 2, rewards, terminals, 0.8, -1.0).unwrap();
    }

    #[test]
    fn test_terminals_have_no_action() {
        let env = reference_world();
        let utilities = value_iteration(&env, 0.6, 0.01);
        let policy = derive_policy(&env, &utilities);

        assert_eq!(policy.len(), 6);
        assert_eq!(policy[&State::new(1, 3)], None);
        assert_eq!(policy[&State::new(2, 3)], None);
        for state in [State::new(1, 1), State::new(1, 2), State::new(2, 1), State::new(2, 2)] {
            assert!(policy[&state].is_some());
        }
    }

    #[test]
    fn test_heads_for_the_positive_terminal() {
        let env = reference_world();
        let utilities = value_iteration(&env, 0.6, 0.01);
        let policy = derive_policy(&env, &utilities);

        assert_eq!(policy[&State::new(2, 2)], Some(Action::Up));
        assert_eq!(policy[&State::new(2, 1)], Some(Action::Up));
    }

    #[test]
    fn test_ties_go_to_earliest_action() {
        // A single cell: every action bumps into a wall and stays put.
        let env = GridWorld::new(1, 1, HashMap::new(), HashSet::new(), 0.8, 0.0).unwrap();
        let utilities = HashMap::from([(State::new(1, 1), 5.0)]);
        let policy = derive_policy(&env, &utilities);
        assert_eq!(policy[&State::new(1, 1)], Some(Action::Up));
    }

    #[test]
    fn test_later_action_must_strictly_improve() {
        // Three cells in a column. From the middle, Right and Left both clamp
        // and mix in the same veers, so they tie; Down leads to the better
        // bottom cell and wins outright.
        let env = GridWorld::new(3, 1, HashMap::new(), HashSet::new(), 1.0, 0.0).unwrap();
        let utilities = HashMap::from([
            (State::new(1, 1), 2.0),
            (State::new(1, 2), 1.0),
            (State::new(1, 3), 0.0),
        ]);
        let policy = derive_policy(&env, &utilities);
        assert_eq!(policy[&State::new(1, 2)], Some(Action::Down));

        let flat = HashMap::from([
            (State::new(1, 1), 1.0),
            (State::new(1, 2), 1.0),
            (State::new(1, 3), 1.0),
        ]);
        let policy = derive_policy(&env, &flat);
        for state in env.states() {
            assert_eq!(policy[&state], Some(Action::Up));
        }
    }
}
