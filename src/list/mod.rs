//! Thread-safe, optionally bounded doubly-linked list.
//!
//! This module provides [`SafeList`] and its supporting types:
//!
//! - [`SafeList`]: double-ended list with one lock per end
//! - [`Capacity`]: the optional, immutable size limit
//! - [`Snapshot`]: an owned point-in-time copy of the contents
//! - Error types: [`ConstructError`], [`FullError`], [`EmptyError`],
//!   [`Cancelled`], [`PushTimeoutError`], [`PopTimeoutError`]
//!
//! # Examples
//!
//! ```rust
//! use twinlock::list::{Capacity, SafeList};
//!
//! let capacity = Capacity::limited(3).unwrap();
//! let list = SafeList::try_new(capacity, ["a", "b"]).unwrap();
//!
//! list.push_front("z").unwrap();
//! assert!(list.is_full());
//! assert_eq!(list.snapshot(), ["z", "a", "b"]);
//! ```

mod acquire;
mod capacity;
mod error;
mod lock_order;
mod node;
mod safe_list;
mod snapshot;

pub use capacity::Capacity;
pub use error::{
    Cancelled, ConstructError, EmptyError, FullError, PopTimeoutError, PushTimeoutError,
};
pub use safe_list::SafeList;
pub use snapshot::Snapshot;
