//! A constrained incremental insertion engine for ***Vehicle Routing Problem*** metaheuristics.
//!
//! The crate maintains per-route derived state through forward and backward traversals, evaluates
//! hard and soft constraints with three-valued pruning, finds cheapest feasible insertion positions
//! with local, route level and shipment calculators, and provides insertion (best, regret, concurrent
//! best) and ruin (random, radial) strategies to be used inside a ruin and recreate search loop.

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[macro_use]
mod macros;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;
