#![deny(unused_variables)]
#![deny(unused_imports)]

//! Value iteration for a slippery grid-world Markov Decision Process.
//!
//! The crate has three layers:
//!
//! - [`grid_world`]: the environment, a rectangular grid with sparse rewards,
//!   terminal cells and a forward/side-veer transition model.
//! - [`value_iteration`]: synchronous Bellman optimality backups until every
//!   non-terminal utility changes by less than epsilon in one sweep.
//! - [`policy`]: the greedy action per state given converged utilities.
//!
//! The solver and the policy deriver are generic over the [`mdp::Mdp`] trait.

pub mod config;
pub mod error;
pub mod grid_world;
pub mod mdp;
pub mod policy;
pub mod render;
pub mod value_iteration;

pub use error::{MdpError, Result};
