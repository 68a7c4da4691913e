//! # twinlock
//!
//! Capacity-bounded, thread-safe doubly-linked containers with independent
//! front and back locks.
//!
//! ## Overview
//!
//! The central type is [`list::SafeList`], a double-ended list that can be
//! shared between threads. Producers at one end and consumers at the other
//! only contend when the list is nearly empty. An optional capacity is fixed
//! at construction and enforced atomically.
//!
//! - **List**: [`SafeList`](list::SafeList), [`Capacity`](list::Capacity),
//!   [`Snapshot`](list::Snapshot) and the error types
//! - **Adapters**: [`SafeQueue`](adapters::SafeQueue) and
//!   [`SafeStack`](adapters::SafeStack) single-ended views
//!
//! ## Feature Flags
//!
//! - `adapters` (default): the queue and stack adapters
//! - `lock-order`: keep the runtime lock-order check in release builds (it is
//!   always on in debug builds)
//!
//! ## Example
//!
//! ```rust
//! use twinlock::prelude::*;
//!
//! let list = SafeList::with_capacity(2).unwrap();
//! list.push_back(1).unwrap();
//! list.push_front(0).unwrap();
//!
//! let error = list.push_back(2).unwrap_err();
//! assert_eq!(error.capacity, 2);
//! assert_eq!(list.snapshot(), [0, 1]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the list, its errors and, when enabled, the adapters.
///
/// # Usage
///
/// ```rust
/// use twinlock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::list::*;

    #[cfg(feature = "adapters")]
    pub use crate::adapters::*;
}

pub mod list;

#[cfg(feature = "adapters")]
pub mod adapters;
