#![deny(unused_variables)]
#![deny(unused_imports)]

//! The query surface shared by every environment the solver can work on.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A finite Markov Decision Process.
///
/// The value-iteration solver and the policy deriver only talk to an
/// environment through this trait, so a non-grid topology can be plugged in
/// by implementing it.
pub trait Mdp {
    type State: Clone + Debug + Eq + Hash + Ord;
    type Action: Copy + Debug + Eq;

    /// Every state, in a stable order.
    fn states(&self) -> Vec<Self::State>;

    /// The actions nominally available in `state`.
    ///
    /// Terminal states still report actions; callers check
    /// [`Mdp::is_terminal`] before treating them as moves.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Successor states with their probabilities. Empty for terminal states.
    fn successors(&self, state: &Self::State, action: &Self::Action)
        -> BTreeMap<Self::State, f64>;

    fn reward(&self, state: &Self::State) -> f64;

    fn is_terminal(&self, state: &Self::State) -> bool;
}
