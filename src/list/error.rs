//! Error types for [`SafeList`](super::SafeList) and the adapters built on it.
//!
//! Every failure is an ordinary, recoverable value:
//!
//! - [`ConstructError`]: the requested capacity or the initial elements were rejected
//! - [`FullError`]: a push found the list at its capacity (the value is handed back)
//! - [`EmptyError`]: a pop or peek found no element at that end
//! - [`Cancelled`]: a timed operation missed its deadline while waiting for the locks
//!
//! # Examples
//!
//! ```rust
//! use twinlock::list::{FullError, SafeList};
//!
//! let list = SafeList::with_capacity(1).unwrap();
//! list.push_back("first").unwrap();
//!
//! let error = list.push_back("second").unwrap_err();
//! assert_eq!(error, FullError { value: "second", capacity: 1 });
//! assert_eq!(error.into_inner(), "second");
//! ```

use thiserror::Error;

// =============================================================================
// Construction
// =============================================================================

/// Returned when a [`SafeList`](super::SafeList) or a
/// [`Capacity`](super::Capacity) cannot be constructed.
///
/// Not recoverable by retrying with the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// The requested capacity was zero or negative.
    #[error("invalid capacity {requested}: capacity must be at least 1")]
    InvalidCapacity {
        /// The capacity that was asked for.
        requested: i128,
    },
    /// More initial elements were supplied than the capacity allows.
    #[error("{count} initial elements exceed the capacity of {capacity}")]
    InitialCountExceedsCapacity {
        /// The number of initial elements supplied.
        count: usize,
        /// The capacity they were checked against.
        capacity: usize,
    },
}

impl From<std::convert::Infallible> for ConstructError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

// =============================================================================
// Push / Pop
// =============================================================================

/// Returned by a push when the list already holds `capacity` elements.
///
/// The rejected element travels back in `value`, so the caller can drop it,
/// retry later or evict something else first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("list is full (capacity {capacity})")]
pub struct FullError<T> {
    /// The element that could not be pushed.
    pub value: T,
    /// The capacity that was reached.
    pub capacity: usize,
}

impl<T> FullError<T> {
    /// Recovers the element that was rejected.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Returned by a pop or peek when the requested end holds no element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("list is empty")]
pub struct EmptyError;

/// Returned when a timed operation gave up waiting for the list locks.
///
/// Never produced by the blocking operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("deadline passed before the list locks were acquired")]
pub struct Cancelled;

// =============================================================================
// Timed variants
// =============================================================================

/// Failure of [`SafeList::push_front_timeout`](super::SafeList::push_front_timeout)
/// and [`SafeList::push_back_timeout`](super::SafeList::push_back_timeout).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushTimeoutError<T> {
    /// The locks were acquired but the list was at capacity.
    #[error("{0}")]
    Full(FullError<T>),
    /// The deadline passed first; the element is handed back untouched.
    #[error("deadline passed before the list locks were acquired")]
    Cancelled(T),
}

impl<T> PushTimeoutError<T> {
    /// Recovers the element that was not pushed.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(error) => error.value,
            Self::Cancelled(value) => value,
        }
    }

    /// Returns `true` if the failure was a missed deadline.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl<T> From<FullError<T>> for PushTimeoutError<T> {
    fn from(error: FullError<T>) -> Self {
        Self::Full(error)
    }
}

/// Failure of [`SafeList::pop_front_timeout`](super::SafeList::pop_front_timeout)
/// and [`SafeList::pop_back_timeout`](super::SafeList::pop_back_timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PopTimeoutError {
    /// The locks were acquired but the end was empty.
    #[error(transparent)]
    Empty(#[from] EmptyError),
    /// The deadline passed first.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl PopTimeoutError {
    /// Returns `true` if the failure was a missed deadline.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

// =============================================================================
// Internal failure plumbing
// =============================================================================

/// Push failure generic over how lock acquisition can be interrupted.
///
/// Blocking acquisition uses [`Infallible`](std::convert::Infallible), so the
/// interrupted arm is statically empty there.
#[derive(Debug)]
pub(crate) enum PushFailure<T, I> {
    Full(FullError<T>),
    Interrupted(I, T),
}

/// Pop failure generic over how lock acquisition can be interrupted.
#[derive(Debug)]
pub(crate) enum PopFailure<I> {
    Empty(EmptyError),
    Interrupted(I),
}

impl<T> From<PushFailure<T, std::convert::Infallible>> for FullError<T> {
    fn from(failure: PushFailure<T, std::convert::Infallible>) -> Self {
        match failure {
            PushFailure::Full(error) => error,
            PushFailure::Interrupted(never, _) => match never {},
        }
    }
}

impl<T> From<PushFailure<T, Cancelled>> for PushTimeoutError<T> {
    fn from(failure: PushFailure<T, Cancelled>) -> Self {
        match failure {
            PushFailure::Full(error) => Self::Full(error),
            PushFailure::Interrupted(Cancelled, value) => Self::Cancelled(value),
        }
    }
}

impl From<PopFailure<std::convert::Infallible>> for EmptyError {
    fn from(failure: PopFailure<std::convert::Infallible>) -> Self {
        match failure {
            PopFailure::Empty(error) => error,
            PopFailure::Interrupted(never) => match never {},
        }
    }
}

impl From<PopFailure<Cancelled>> for PopTimeoutError {
    fn from(failure: PopFailure<Cancelled>) -> Self {
        match failure {
            PopFailure::Empty(error) => Self::Empty(error),
            PopFailure::Interrupted(cancelled) => Self::Cancelled(cancelled),
        }
    }
}
