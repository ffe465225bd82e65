//! The solver module contains strategies which mutate a solution inside a ruin and recreate loop:
//! insertion strategies which place unassigned jobs and ruin strategies which remove them.
//!
//! Strategies fire typed lifecycle events, so route states and vehicle locks are kept consistent
//! by listeners without strategies knowing their internals.

mod events;
pub use self::events::*;

pub mod recreate;
pub mod ruin;
