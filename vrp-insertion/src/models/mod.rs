//! A collection of models to represent problem and solution in Vehicle Routing Problem domain.

pub mod common;
pub mod problem;
pub mod solution;

mod domain;
pub use self::domain::*;
