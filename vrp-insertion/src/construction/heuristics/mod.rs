//! Insertion contexts, results and the calculators which find the cheapest feasible insertion
//! position of a job in a route.

mod calculators;
pub use self::calculators::*;

mod context;
pub use self::context::*;

mod evaluators;
pub use self::evaluators::*;

mod insertions;
pub use self::insertions::*;
