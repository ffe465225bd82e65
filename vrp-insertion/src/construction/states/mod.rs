//! Route and activity state derived from the current route contents.
//!
//! State is produced only by forward and backward traversals over a route, composed from
//! independent visitors which share one pass. Any structural change of a route invalidates its
//! state until the route is traversed again.

mod keys;
pub use self::keys::*;

mod manager;
pub use self::manager::*;

mod store;
pub use self::store::*;

mod traversal;
pub use self::traversal::*;

mod updaters;
pub use self::updaters::*;
