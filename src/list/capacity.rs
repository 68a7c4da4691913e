//! The capacity policy shared by constructors and the full/empty predicates.
//!
//! A [`Capacity`] is fixed when a list is built and never changes afterwards.
//!
//! # Examples
//!
//! ```rust
//! use twinlock::list::{Capacity, ConstructError};
//!
//! let limited = Capacity::limited(3).unwrap();
//! assert_eq!(limited.get(), Some(3));
//! assert!(limited.is_reached(3));
//!
//! assert_eq!(Capacity::UNBOUNDED.get(), None);
//! assert!(!Capacity::UNBOUNDED.is_reached(usize::MAX));
//!
//! assert_eq!(
//!     Capacity::try_from(-1_i64),
//!     Err(ConstructError::InvalidCapacity { requested: -1 })
//! );
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use super::ConstructError;

/// An optional upper bound on the number of elements a list may hold.
///
/// `Capacity::UNBOUNDED` (the default) never rejects a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capacity(Option<NonZeroUsize>);

impl Capacity {
    /// A capacity that never rejects a push.
    pub const UNBOUNDED: Self = Self(None);

    /// Creates a capacity of at most `limit` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::InvalidCapacity`] if `limit` is zero.
    pub const fn limited(limit: usize) -> Result<Self, ConstructError> {
        match NonZeroUsize::new(limit) {
            Some(limit) => Ok(Self(Some(limit))),
            None => Err(ConstructError::InvalidCapacity { requested: 0 }),
        }
    }

    /// Returns the limit, or `None` when unbounded.
    pub const fn get(self) -> Option<usize> {
        match self.0 {
            Some(limit) => Some(limit.get()),
            None => None,
        }
    }

    /// Returns `true` if a limit is set.
    pub const fn is_bounded(self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` if a list holding `size` elements cannot accept another.
    pub const fn is_reached(self, size: usize) -> bool {
        match self.0 {
            Some(limit) => size >= limit.get(),
            None => false,
        }
    }

    /// Returns the size after one more push, or `None` if that push must be refused.
    pub(crate) fn admit(self, size: usize) -> Option<usize> {
        if self.is_reached(size) {
            None
        } else {
            size.checked_add(1)
        }
    }

    /// Checks that `count` initial elements fit.
    pub(crate) const fn check_initial(self, count: usize) -> Result<(), ConstructError> {
        match self.0 {
            Some(limit) if count > limit.get() => Err(ConstructError::InitialCountExceedsCapacity {
                count,
                capacity: limit.get(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(limit) => write!(formatter, "{limit}"),
            None => write!(formatter, "unbounded"),
        }
    }
}

impl From<NonZeroUsize> for Capacity {
    fn from(limit: NonZeroUsize) -> Self {
        Self(Some(limit))
    }
}

impl TryFrom<usize> for Capacity {
    type Error = ConstructError;

    fn try_from(limit: usize) -> Result<Self, Self::Error> {
        Self::limited(limit)
    }
}

impl TryFrom<Option<usize>> for Capacity {
    type Error = ConstructError;

    fn try_from(limit: Option<usize>) -> Result<Self, Self::Error> {
        limit.map_or(Ok(Self::UNBOUNDED), Self::limited)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = ConstructError;

    fn try_from(limit: i64) -> Result<Self, Self::Error> {
        usize::try_from(limit)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self::from)
            .ok_or(ConstructError::InvalidCapacity {
                requested: i128::from(limit),
            })
    }
}

impl TryFrom<Option<i64>> for Capacity {
    type Error = ConstructError;

    fn try_from(limit: Option<i64>) -> Result<Self, Self::Error> {
        limit.map_or(Ok(Self::UNBOUNDED), Self::try_from)
    }
}
