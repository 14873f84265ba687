//! Collections used by the graph layer and the pathfinder.
//!
//! - `compare`: comparer seam for ordered collections
//! - `priority_queue`: stable min-priority queue with checked cursors
//! - `set`: the `MutableSet` contract, a hash set and an observable set

pub mod compare;
pub mod priority_queue;
pub mod set;
pub(crate) mod subscribers;

pub use compare::{Compare, NaturalOrder};
pub use priority_queue::{Cursor, PriorityQueue};
pub use set::{MutableSet, ObservableSet, Set, SetChanged};
pub use subscribers::SubscriptionId;
