//! Hard and soft constraints evaluated during insertion.
//!
//! Hard route constraints gate a route and actor pairing before any per position work. Hard
//! activity constraints gate a specific position and return three-valued status: `Rejected` allows
//! to try the next position, `RejectedPrune` stops the forward scan over the route.

mod pipeline;
pub use self::pipeline::*;

mod capacity;
pub use self::capacity::*;

mod time;
pub use self::time::*;

mod costs;
pub use self::costs::*;

/// A code of time window constraint violation.
pub const TIME_CONSTRAINT_CODE: i32 = 1;
/// A code of capacity constraint violation.
pub const CAPACITY_CONSTRAINT_CODE: i32 = 2;
