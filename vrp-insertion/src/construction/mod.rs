//! The construction module contains the building blocks of the insertion engine: derived route
//! state, constraints and insertion cost calculators.

pub mod constraints;
pub mod heuristics;
pub mod states;
