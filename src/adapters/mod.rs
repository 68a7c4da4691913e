//! Single-ended views over [`SafeList`](crate::list::SafeList).
//!
//! - [`SafeQueue`]: first in, first out
//! - [`SafeStack`]: last in, first out
//!
//! Both keep the list's thread safety and capacity semantics and only narrow
//! the set of ends a caller can touch.
//!
//! # Examples
//!
//! ```rust
//! use twinlock::adapters::{SafeQueue, SafeStack};
//!
//! let queue = SafeQueue::new();
//! let stack = SafeStack::new();
//! for value in 1..=3 {
//!     queue.enqueue(value).unwrap();
//!     stack.push(value).unwrap();
//! }
//!
//! assert_eq!(queue.dequeue(), Ok(1));
//! assert_eq!(stack.pop(), Ok(3));
//! ```

mod queue;
mod stack;

pub use queue::SafeQueue;
pub use stack::SafeStack;
