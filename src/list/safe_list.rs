//! Capacity-bounded, thread-safe doubly-linked list with one lock per end.
//!
//! # Overview
//!
//! [`SafeList`] is a double-ended container that can be shared between
//! threads through an [`Arc`](std::sync::Arc). Every operation takes `&self`.
//!
//! | Method | Locks held | Complexity |
//! |-|-|-|
//! | `push_front` / `pop_front` / `peek_front` | front (both at the empty boundary) | `O(1)` |
//! | `push_back` / `pop_back` / `peek_back` | back (both at the empty boundary) | `O(1)` |
//! | `len` / `is_empty` / `is_full` | both | `O(1)` |
//! | `snapshot` / `drain` / `clear` | both | `O(n)` |
//!
//! # Locking Protocol
//!
//! The front lock guards the `front` link and the back lock guards the `back`
//! link. Operations at opposite ends of a long list run in parallel. Both
//! locks are needed whenever an operation may touch both ends:
//!
//! - a push into an empty list (the new node becomes front *and* back)
//! - a pop that can see at most two nodes from its own end (the pop may empty
//!   the list, or race a pop at the other end for the same neighbour)
//! - `len`, `snapshot`, `drain` and `clear`
//!
//! **The front lock is always taken before the back lock.** A back-side
//! operation that discovers it needs the front lock releases the back lock,
//! takes front then back, and re-evaluates from scratch. In debug builds the
//! order is checked at runtime.
//!
//! The element count is only changed while an end lock is held and only read
//! while both are held. Pushes reserve their slot with a compare-and-swap on
//! the count, so pushes at opposite ends can never jointly overrun the
//! capacity.
//!
//! # Examples
//!
//! ```rust
//! use twinlock::list::SafeList;
//!
//! let list = SafeList::with_capacity(2).unwrap();
//! list.push_back(1).unwrap();
//! list.push_back(2).unwrap();
//! assert!(list.push_back(3).is_err());
//!
//! assert_eq!(list.pop_front(), Ok(1));
//! list.push_back(3).unwrap();
//! assert_eq!(list.snapshot(), [2, 3]);
//! ```
//!
//! ## Sharing Between Threads
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use twinlock::list::SafeList;
//!
//! let list = Arc::new(SafeList::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|index| {
//!         let list = Arc::clone(&list);
//!         thread::spawn(move || list.push_back(index).unwrap())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(list.len(), 4);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::acquire::{Acquire, Blocking, Deadline};
use super::error::{PopFailure, PushFailure};
use super::lock_order::{self, BackGuard, FrontGuard, ListId};
use super::node::{
    Link, attach_back, attach_front, detach_back, detach_front, predecessor, successor,
    unlink_chain,
};
use super::{
    Capacity, ConstructError, EmptyError, FullError, PopTimeoutError, PushTimeoutError, Snapshot,
};

/// A thread-safe doubly-linked list with an optional capacity.
///
/// See the [module documentation](self) for the locking protocol.
///
/// # Thread Safety
///
/// `SafeList<T>` is `Send` and `Sync` when `T: Send`.
///
/// # Examples
///
/// ```rust
/// use twinlock::list::{EmptyError, SafeList};
///
/// let list = SafeList::new();
/// list.push_back("b").unwrap();
/// list.push_front("a").unwrap();
///
/// assert_eq!(list.peek_front(), Ok("a"));
/// assert_eq!(list.peek_back(), Ok("b"));
/// assert_eq!(list.pop_back(), Ok("b"));
/// assert_eq!(list.pop_back(), Ok("a"));
/// assert_eq!(list.pop_back(), Err(EmptyError));
/// ```
pub struct SafeList<T> {
    front: Mutex<Option<Link<T>>>,
    back: Mutex<Option<Link<T>>>,
    size: AtomicUsize,
    capacity: Capacity,
}

static_assertions::assert_impl_all!(SafeList<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(SafeList<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Construction
// =============================================================================

impl<T> SafeList<T> {
    /// Creates an empty, unbounded list.
    pub const fn new() -> Self {
        Self::with_policy(Capacity::UNBOUNDED)
    }

    /// Creates an empty list governed by an already validated [`Capacity`].
    pub const fn with_policy(capacity: Capacity) -> Self {
        Self {
            front: Mutex::new(None),
            back: Mutex::new(None),
            size: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Creates an empty list holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConstructError> {
        Capacity::limited(capacity).map(Self::with_policy)
    }

    /// Creates a list from a capacity and initial elements, front to back.
    ///
    /// `capacity` is anything convertible into a [`Capacity`]: a `Capacity`,
    /// a `usize`, an `Option<usize>`, an `i64` or an `Option<i64>`.
    ///
    /// # Errors
    ///
    /// - [`ConstructError::InvalidCapacity`] if the capacity is zero or negative.
    /// - [`ConstructError::InitialCountExceedsCapacity`] if there are more
    ///   initial elements than the capacity allows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twinlock::list::{ConstructError, SafeList};
    ///
    /// let list = SafeList::try_new(Some(3_usize), [1, 2]).unwrap();
    /// assert_eq!(list.snapshot(), [1, 2]);
    /// assert_eq!(list.capacity(), Some(3));
    ///
    /// assert_eq!(
    ///     SafeList::try_new(1_usize, [1, 2]).unwrap_err(),
    ///     ConstructError::InitialCountExceedsCapacity { count: 2, capacity: 1 }
    /// );
    /// assert_eq!(
    ///     SafeList::<i32>::try_new(-4_i64, []).unwrap_err(),
    ///     ConstructError::InvalidCapacity { requested: -4 }
    /// );
    /// ```
    pub fn try_new<C, I>(capacity: C, initial: I) -> Result<Self, ConstructError>
    where
        C: TryInto<Capacity>,
        ConstructError: From<C::Error>,
        I: IntoIterator<Item = T>,
    {
        let capacity: Capacity = capacity.try_into()?;
        let values: Vec<T> = initial.into_iter().collect();
        capacity.check_initial(values.len())?;

        let mut list = Self::with_policy(capacity);
        for value in values {
            list.append_exclusive(value);
        }
        Ok(list)
    }

    /// Appends without locking; only possible before the list is shared.
    fn append_exclusive(&mut self, value: T) {
        attach_back(Some(self.front.get_mut()), self.back.get_mut(), value);
        *self.size.get_mut() += 1;
    }
}

impl<T> Default for SafeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SafeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.append_exclusive(value);
        }
        list
    }
}

// =============================================================================
// Lock acquisition
// =============================================================================

impl<T> SafeList<T> {
    fn lock_front<A: Acquire>(&self, acquire: A) -> Result<FrontGuard<'_, T>, A::Interrupt> {
        lock_order::check_front_allowed(ListId::of(&self.back));
        acquire.acquire(&self.front).map(FrontGuard::new)
    }

    fn lock_back<A: Acquire>(&self, acquire: A) -> Result<BackGuard<'_, T>, A::Interrupt> {
        let list = ListId::of(&self.back);
        acquire
            .acquire(&self.back)
            .map(|guard| BackGuard::new(list, guard))
    }

    /// Takes front then back. On failure nothing stays locked.
    fn lock_both<A: Acquire>(
        &self,
        acquire: A,
    ) -> Result<(FrontGuard<'_, T>, BackGuard<'_, T>), A::Interrupt> {
        let front = self.lock_front(acquire)?;
        let back = self.lock_back(acquire)?;
        Ok((front, back))
    }

    fn lock_front_blocking(&self) -> FrontGuard<'_, T> {
        let Ok(front) = self.lock_front(Blocking);
        front
    }

    fn lock_back_blocking(&self) -> BackGuard<'_, T> {
        let Ok(back) = self.lock_back(Blocking);
        back
    }

    fn lock_both_blocking(&self) -> (FrontGuard<'_, T>, BackGuard<'_, T>) {
        let Ok(both) = self.lock_both(Blocking);
        both
    }

    /// Claims room for one more element, handing `value` back if the list is full.
    ///
    /// Must be called with the lock set that will perform the link held.
    fn reserve<I>(&self, value: T) -> Result<T, PushFailure<T, I>> {
        let capacity = self.capacity;
        match self
            .size
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |size| capacity.admit(size))
        {
            Ok(_) => Ok(value),
            Err(size) => {
                tracing::debug!(size, %capacity, "push rejected: list is full");
                Err(PushFailure::Full(FullError {
                    value,
                    capacity: capacity.get().unwrap_or(usize::MAX),
                }))
            }
        }
    }

    /// Accounts for a detached node. Must be called with the detaching lock set held.
    fn settle<I>(&self, removed: Option<Option<T>>) -> Result<T, PopFailure<I>> {
        let value = removed.ok_or(PopFailure::Empty(EmptyError))?;
        self.size.fetch_sub(1, Ordering::AcqRel);
        value.ok_or(PopFailure::Empty(EmptyError))
    }
}

/// At least three nodes are reachable from `head` going forward.
fn spans_three_forward<T>(head: &Link<T>) -> bool {
    successor(head).is_some_and(|second| successor(&second).is_some())
}

/// At least three nodes are reachable from `tail` going backward.
fn spans_three_backward<T>(tail: &Link<T>) -> bool {
    predecessor(tail).is_some_and(|second| predecessor(&second).is_some())
}

// =============================================================================
// Push / Pop
// =============================================================================

impl<T> SafeList<T> {
    fn push_front_with<A: Acquire>(
        &self,
        value: T,
        acquire: A,
    ) -> Result<(), PushFailure<T, A::Interrupt>> {
        let mut front = match self.lock_front(acquire) {
            Ok(front) => front,
            Err(interrupt) => return Err(PushFailure::Interrupted(interrupt, value)),
        };
        if front.is_some() {
            let value = self.reserve(value)?;
            attach_front(&mut *front, None, value);
            return Ok(());
        }

        // Empty: the new node becomes the back as well. Front is already held,
        // so taking back now keeps the order.
        tracing::trace!("push_front taking both locks");
        let mut back = match self.lock_back(acquire) {
            Ok(back) => back,
            Err(interrupt) => return Err(PushFailure::Interrupted(interrupt, value)),
        };
        let value = self.reserve(value)?;
        attach_front(&mut *front, Some(&mut *back), value);
        Ok(())
    }

    fn push_back_with<A: Acquire>(
        &self,
        value: T,
        acquire: A,
    ) -> Result<(), PushFailure<T, A::Interrupt>> {
        let mut back = match self.lock_back(acquire) {
            Ok(back) => back,
            Err(interrupt) => return Err(PushFailure::Interrupted(interrupt, value)),
        };
        if back.is_some() {
            let value = self.reserve(value)?;
            attach_back(None, &mut *back, value);
            return Ok(());
        }
        drop(back);

        // Empty: the new node becomes the front as well. Re-acquire in order
        // and re-check, another thread may have filled the list meanwhile.
        tracing::trace!("push_back taking both locks");
        let (mut front, mut back) = match self.lock_both(acquire) {
            Ok(both) => both,
            Err(interrupt) => return Err(PushFailure::Interrupted(interrupt, value)),
        };
        let value = self.reserve(value)?;
        attach_back(Some(&mut *front), &mut *back, value);
        Ok(())
    }

    fn pop_front_with<A: Acquire>(&self, acquire: A) -> Result<T, PopFailure<A::Interrupt>> {
        let mut front = self.lock_front(acquire).map_err(PopFailure::Interrupted)?;
        let Some(head) = front.as_ref() else {
            return Err(PopFailure::Empty(EmptyError));
        };

        if spans_three_forward(head) {
            let removed = detach_front(&mut *front, None);
            return self.settle(removed);
        }

        tracing::trace!("pop_front taking both locks");
        let mut back = self.lock_back(acquire).map_err(PopFailure::Interrupted)?;
        let removed = detach_front(&mut *front, Some(&mut *back));
        self.settle(removed)
    }

    fn pop_back_with<A: Acquire>(&self, acquire: A) -> Result<T, PopFailure<A::Interrupt>> {
        let mut back = self.lock_back(acquire).map_err(PopFailure::Interrupted)?;
        let Some(tail) = back.as_ref() else {
            return Err(PopFailure::Empty(EmptyError));
        };

        if spans_three_backward(tail) {
            let removed = detach_back(None, &mut *back);
            return self.settle(removed);
        }
        drop(back);

        tracing::trace!("pop_back taking both locks");
        let (mut front, mut back) = self.lock_both(acquire).map_err(PopFailure::Interrupted)?;
        let removed = detach_back(Some(&mut *front), &mut *back);
        self.settle(removed)
    }

    /// Adds `value` at the front.
    ///
    /// # Errors
    ///
    /// Returns [`FullError`] carrying `value` if the list is at capacity. The
    /// list is left unchanged.
    pub fn push_front(&self, value: T) -> Result<(), FullError<T>> {
        self.push_front_with(value, Blocking).map_err(FullError::from)
    }

    /// Adds `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns [`FullError`] carrying `value` if the list is at capacity. The
    /// list is left unchanged.
    pub fn push_back(&self, value: T) -> Result<(), FullError<T>> {
        self.push_back_with(value, Blocking).map_err(FullError::from)
    }

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the list is empty.
    pub fn pop_front(&self) -> Result<T, EmptyError> {
        self.pop_front_with(Blocking).map_err(EmptyError::from)
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the list is empty.
    pub fn pop_back(&self) -> Result<T, EmptyError> {
        self.pop_back_with(Blocking).map_err(EmptyError::from)
    }
}

// =============================================================================
// Timed variants
// =============================================================================

impl<T> SafeList<T> {
    /// Like [`push_front`](Self::push_front), but gives up if the locks cannot
    /// be acquired within `timeout`.
    ///
    /// # Errors
    ///
    /// - [`PushTimeoutError::Full`] if the list is at capacity.
    /// - [`PushTimeoutError::Cancelled`] if the deadline passed first. The
    ///   value is handed back and the list is untouched.
    pub fn push_front_timeout(&self, value: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self
                .push_front_with(value, Deadline(deadline))
                .map_err(|failure| log_cancelled_push(failure.into())),
            None => self.push_front(value).map_err(PushTimeoutError::Full),
        }
    }

    /// Like [`push_back`](Self::push_back), but gives up if the locks cannot
    /// be acquired within `timeout`.
    ///
    /// # Errors
    ///
    /// - [`PushTimeoutError::Full`] if the list is at capacity.
    /// - [`PushTimeoutError::Cancelled`] if the deadline passed first. The
    ///   value is handed back and the list is untouched.
    pub fn push_back_timeout(&self, value: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self
                .push_back_with(value, Deadline(deadline))
                .map_err(|failure| log_cancelled_push(failure.into())),
            None => self.push_back(value).map_err(PushTimeoutError::Full),
        }
    }

    /// Like [`pop_front`](Self::pop_front), but gives up if the locks cannot
    /// be acquired within `timeout`.
    ///
    /// # Errors
    ///
    /// - [`PopTimeoutError::Empty`] if the list is empty.
    /// - [`PopTimeoutError::Cancelled`] if the deadline passed first.
    pub fn pop_front_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self
                .pop_front_with(Deadline(deadline))
                .map_err(|failure| log_cancelled_pop(failure.into())),
            None => self.pop_front().map_err(PopTimeoutError::Empty),
        }
    }

    /// Like [`pop_back`](Self::pop_back), but gives up if the locks cannot
    /// be acquired within `timeout`.
    ///
    /// # Errors
    ///
    /// - [`PopTimeoutError::Empty`] if the list is empty.
    /// - [`PopTimeoutError::Cancelled`] if the deadline passed first.
    pub fn pop_back_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self
                .pop_back_with(Deadline(deadline))
                .map_err(|failure| log_cancelled_pop(failure.into())),
            None => self.pop_back().map_err(PopTimeoutError::Empty),
        }
    }
}

fn log_cancelled_push<T>(error: PushTimeoutError<T>) -> PushTimeoutError<T> {
    if error.is_cancelled() {
        tracing::debug!("push cancelled: deadline passed while waiting for locks");
    }
    error
}

fn log_cancelled_pop(error: PopTimeoutError) -> PopTimeoutError {
    if error.is_cancelled() {
        tracing::debug!("pop cancelled: deadline passed while waiting for locks");
    }
    error
}

// =============================================================================
// Inspection
// =============================================================================

impl<T> SafeList<T> {
    /// Number of elements, read under both locks.
    pub fn len(&self) -> usize {
        let _both = self.lock_both_blocking();
        self.size.load(Ordering::Acquire)
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the list is at its capacity. Always `false` when unbounded.
    pub fn is_full(&self) -> bool {
        self.capacity.is_reached(self.len())
    }

    /// The maximum number of elements, or `None` when unbounded.
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity.get()
    }

    /// The capacity policy the list was built with.
    pub const fn capacity_policy(&self) -> Capacity {
        self.capacity
    }

    /// Visits every element front to back with both locks held.
    fn for_each_locked(&self, mut visit: impl FnMut(&T)) {
        let (front, _back) = self.lock_both_blocking();
        let mut cursor = front.clone();
        while let Some(node) = cursor {
            let guard = node.lock();
            if let Some(value) = guard.value.as_ref() {
                visit(value);
            }
            cursor = guard.next.clone();
        }
    }
}

impl<T: Clone> SafeList<T> {
    /// Returns a copy of the front element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the list is empty.
    pub fn peek_front(&self) -> Result<T, EmptyError> {
        let front = self.lock_front_blocking();
        front
            .as_ref()
            .and_then(|head| head.lock().value.clone())
            .ok_or(EmptyError)
    }

    /// Returns a copy of the back element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the list is empty.
    pub fn peek_back(&self) -> Result<T, EmptyError> {
        let back = self.lock_back_blocking();
        back.as_ref()
            .and_then(|tail| tail.lock().value.clone())
            .ok_or(EmptyError)
    }

    /// Copies the elements, front to back, at a single instant.
    ///
    /// Both locks are held only while copying; the returned [`Snapshot`] can
    /// be iterated freely afterwards.
    pub fn snapshot(&self) -> Snapshot<T> {
        let mut values = Vec::new();
        self.for_each_locked(|value| values.push(value.clone()));
        Snapshot::from_vec(values)
    }
}

// =============================================================================
// Bulk removal
// =============================================================================

impl<T> SafeList<T> {
    /// Removes every element, returning them front to back.
    ///
    /// Every node is unlinked while both locks are held; the elements are
    /// handed back after the locks are released.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use twinlock::list::SafeList;
    ///
    /// let list: SafeList<_> = ["a", "b"].into_iter().collect();
    /// assert_eq!(list.drain().into_vec(), vec!["a", "b"]);
    /// assert!(list.is_empty());
    /// ```
    pub fn drain(&self) -> Snapshot<T> {
        let (mut front, mut back) = self.lock_both_blocking();
        back.take();
        let values = unlink_chain(front.take());
        self.size.store(0, Ordering::Release);
        tracing::trace!(count = values.len(), "list drained");
        drop((front, back));
        Snapshot::from_vec(values)
    }

    /// Removes every element. Clearing an empty list does nothing.
    pub fn clear(&self) {
        drop(self.drain());
    }
}

impl<T> Drop for SafeList<T> {
    fn drop(&mut self) {
        self.back.get_mut().take();
        unlink_chain(self.front.get_mut().take());
    }
}

impl<T: fmt::Debug> fmt::Debug for SafeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = Vec::new();
        self.for_each_locked(|value| items.push(Rendered(format!("{value:?}"))));
        formatter
            .debug_struct("SafeList")
            .field("capacity", &self.capacity.get())
            .field("items", &items)
            .finish()
    }
}

/// An element already formatted under the locks, printed verbatim.
struct Rendered(String);

impl fmt::Debug for Rendered {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    fn list_of(values: &[i32]) -> SafeList<i32> {
        values.iter().copied().collect()
    }

    /// Walks the chain in both directions and checks it against `len`.
    fn assert_consistent(list: &SafeList<i32>) {
        let (front, back) = list.lock_both_blocking();
        let size = list.size.load(Ordering::Acquire);

        assert_eq!(front.is_none(), back.is_none());
        assert_eq!(front.is_none(), size == 0);

        let mut forward = Vec::new();
        let mut cursor = front.clone();
        while let Some(node) = cursor {
            forward.extend(node.lock().value);
            cursor = successor(&node);
        }

        let mut backward = Vec::new();
        let mut cursor = back.clone();
        while let Some(node) = cursor {
            backward.extend(node.lock().value);
            cursor = predecessor(&node);
        }
        backward.reverse();

        assert_eq!(forward.len(), size);
        assert_eq!(forward, backward);
    }

    mod construction {
        use super::*;

        #[rstest]
        fn test_new_is_empty_and_unbounded() {
            let list: SafeList<i32> = SafeList::new();
            assert!(list.is_empty());
            assert_eq!(list.len(), 0);
            assert_eq!(list.capacity(), None);
            assert!(!list.is_full());
            assert_consistent(&list);
        }

        #[rstest]
        fn test_try_new_builds_in_order() {
            let list = SafeList::try_new(Some(5_usize), [1, 2, 3]).unwrap();
            assert_eq!(list.len(), 3);
            assert_eq!(list.peek_front(), Ok(1));
            assert_eq!(list.peek_back(), Ok(3));
            assert_consistent(&list);
        }

        #[rstest]
        fn test_try_new_accepts_exactly_capacity() {
            let list = SafeList::try_new(3_usize, [1, 2, 3]).unwrap();
            assert!(list.is_full());
        }

        #[rstest]
        fn test_try_new_rejects_too_many() {
            let result = SafeList::try_new(2_usize, [1, 2, 3]);
            assert_eq!(
                result.unwrap_err(),
                ConstructError::InitialCountExceedsCapacity {
                    count: 3,
                    capacity: 2
                }
            );
        }

        #[rstest]
        #[case(0_i64)]
        #[case(-1_i64)]
        fn test_try_new_rejects_invalid_capacity(#[case] capacity: i64) {
            let result = SafeList::<u8>::try_new(capacity, []);
            assert_eq!(
                result.unwrap_err(),
                ConstructError::InvalidCapacity {
                    requested: i128::from(capacity)
                }
            );
        }

        #[rstest]
        fn test_try_new_with_policy_value() {
            let list = SafeList::try_new(Capacity::UNBOUNDED, 0..100).unwrap();
            assert_eq!(list.len(), 100);
            assert_eq!(list.capacity_policy(), Capacity::UNBOUNDED);
        }

        #[rstest]
        fn test_with_capacity_rejects_zero() {
            assert!(SafeList::<i32>::with_capacity(0).is_err());
        }
    }

    mod ends {
        use super::*;

        #[rstest]
        fn test_fifo_order() {
            let list = SafeList::new();
            for value in ['a', 'b', 'c'] {
                list.push_back(value).unwrap();
            }
            assert_eq!(list.pop_front(), Ok('a'));
            assert_eq!(list.pop_front(), Ok('b'));
            assert_eq!(list.pop_front(), Ok('c'));
            assert_eq!(list.pop_front(), Err(EmptyError));
        }

        #[rstest]
        fn test_lifo_order() {
            let list = SafeList::new();
            for value in ['a', 'b', 'c'] {
                list.push_back(value).unwrap();
            }
            assert_eq!(list.pop_back(), Ok('c'));
            assert_eq!(list.pop_back(), Ok('b'));
            assert_eq!(list.pop_back(), Ok('a'));
            assert_eq!(list.pop_back(), Err(EmptyError));
        }

        #[rstest]
        fn test_push_front_reverses() {
            let list = SafeList::new();
            for value in 1..=3 {
                list.push_front(value).unwrap();
            }
            assert_eq!(list.snapshot(), [3, 2, 1]);
            assert_consistent(&list);
        }

        #[rstest]
        #[case::one(&[1])]
        #[case::two(&[1, 2])]
        #[case::three(&[1, 2, 3])]
        #[case::four(&[1, 2, 3, 4])]
        fn test_alternating_pops_keep_chain_consistent(#[case] values: &[i32]) {
            let list = list_of(values);
            let mut popped = Vec::new();
            let mut from_front = true;
            while !list.is_empty() {
                let value = if from_front {
                    list.pop_front()
                } else {
                    list.pop_back()
                };
                popped.push(value.unwrap());
                from_front = !from_front;
                assert_consistent(&list);
            }
            popped.sort_unstable();
            assert_eq!(popped, values);
        }

        #[rstest]
        fn test_peek_does_not_remove() {
            let list = list_of(&[4, 5]);
            assert_eq!(list.peek_front(), Ok(4));
            assert_eq!(list.peek_back(), Ok(5));
            assert_eq!(list.len(), 2);
        }

        #[rstest]
        fn test_peek_empty() {
            let list: SafeList<i32> = SafeList::new();
            assert_eq!(list.peek_front(), Err(EmptyError));
            assert_eq!(list.peek_back(), Err(EmptyError));
        }
    }

    mod capacity {
        use super::*;

        #[rstest]
        fn test_scenario_from_capacity_two() {
            let list = SafeList::try_new(Some(2_usize), []).unwrap();
            assert_eq!(list.push_back(1), Ok(()));
            assert_eq!(list.push_back(2), Ok(()));
            assert_eq!(
                list.push_back(3),
                Err(FullError {
                    value: 3,
                    capacity: 2
                })
            );
            assert_eq!(list.pop_front(), Ok(1));
            assert_eq!(list.push_back(3), Ok(()));
            assert_eq!(list.snapshot(), [2, 3]);
        }

        #[rstest]
        fn test_full_rejects_both_ends_without_mutation() {
            let list = SafeList::try_new(2_usize, [1, 2]).unwrap();
            assert!(list.is_full());
            assert_eq!(list.push_front(0).unwrap_err().into_inner(), 0);
            assert_eq!(list.push_back(3).unwrap_err().into_inner(), 3);
            assert_eq!(list.snapshot(), [1, 2]);
            assert_consistent(&list);
        }

        #[rstest]
        fn test_capacity_one_flips_between_states() {
            let list = SafeList::with_capacity(1).unwrap();
            for round in 0..10 {
                list.push_front(round).unwrap();
                assert!(list.push_back(round).is_err());
                assert_eq!(list.pop_back(), Ok(round));
                assert_consistent(&list);
            }
        }
    }

    mod bulk {
        use super::*;

        #[rstest]
        fn test_snapshot_is_point_in_time() {
            let list = list_of(&[1, 2, 3]);
            let snapshot = list.snapshot();
            list.pop_front().unwrap();
            list.push_back(9).unwrap();
            assert_eq!(snapshot, [1, 2, 3]);
            assert_eq!(list.snapshot(), [2, 3, 9]);
        }

        #[rstest]
        fn test_snapshot_is_idempotent() {
            let list = list_of(&[1, 2, 3]);
            assert_eq!(list.snapshot(), list.snapshot());
        }

        #[rstest]
        fn test_drain_empties() {
            let list = list_of(&[1, 2, 3]);
            assert_eq!(list.drain(), [1, 2, 3]);
            assert!(list.is_empty());
            assert_consistent(&list);
            list.push_back(4).unwrap();
            assert_eq!(list.snapshot(), [4]);
        }

        #[rstest]
        fn test_clear_is_idempotent() {
            let list = list_of(&[1, 2, 3]);
            list.clear();
            assert_eq!(list.len(), 0);
            list.clear();
            assert_eq!(list.len(), 0);
            assert_consistent(&list);
        }

        #[rstest]
        fn test_clear_releases_elements() {
            let element = Arc::new(());
            let list = SafeList::new();
            list.push_back(Arc::clone(&element)).unwrap();
            list.push_back(Arc::clone(&element)).unwrap();
            assert_eq!(Arc::strong_count(&element), 3);
            list.clear();
            assert_eq!(Arc::strong_count(&element), 1);
        }

        #[rstest]
        fn test_drop_long_list_does_not_overflow() {
            let list: SafeList<u32> = (0..500_000).collect();
            drop(list);
        }
    }

    mod nesting {
        use super::*;

        #[rstest]
        fn test_debug_of_nested_lists() {
            let outer: SafeList<SafeList<i32>> = SafeList::new();
            outer.push_back((1..=2).collect()).unwrap();
            outer.push_back(SafeList::new()).unwrap();
            assert_eq!(
                format!("{outer:?}"),
                "SafeList { capacity: None, items: [SafeList { capacity: None, items: [1, 2] }, \
                 SafeList { capacity: None, items: [] }] }"
            );
        }

        #[rstest]
        fn test_other_list_usable_while_back_held() {
            let first = list_of(&[1]);
            let second = list_of(&[2, 3]);
            let _back = first.lock_back_blocking();
            assert_eq!(second.pop_front(), Ok(2));
            assert_eq!(second.snapshot(), [3]);
        }
    }

    mod timed {
        use super::*;

        #[rstest]
        fn test_timed_operations_succeed_when_uncontended() {
            let list = SafeList::with_capacity(2).unwrap();
            let timeout = Duration::from_millis(50);
            list.push_back_timeout(1, timeout).unwrap();
            list.push_front_timeout(0, timeout).unwrap();
            assert_eq!(
                list.push_back_timeout(2, timeout),
                Err(PushTimeoutError::Full(FullError {
                    value: 2,
                    capacity: 2
                }))
            );
            assert_eq!(list.pop_back_timeout(timeout), Ok(1));
            assert_eq!(list.pop_front_timeout(timeout), Ok(0));
            assert_eq!(
                list.pop_front_timeout(timeout),
                Err(PopTimeoutError::Empty(EmptyError))
            );
        }

        #[rstest]
        fn test_timed_push_cancelled_while_front_held() {
            let list = list_of(&[1]);
            let _front = list.lock_front_blocking();
            let result = thread::scope(|scope| {
                scope
                    .spawn(|| list.push_front_timeout(0, Duration::from_millis(20)))
                    .join()
            });
            assert_eq!(result.unwrap(), Err(PushTimeoutError::Cancelled(0)));
        }

        #[rstest]
        fn test_timed_pop_cancelled_at_boundary_leaves_list_intact() {
            let list = list_of(&[1]);
            let back = list.lock_back_blocking();
            let result = thread::scope(|scope| {
                scope
                    .spawn(|| list.pop_front_timeout(Duration::from_millis(20)))
                    .join()
            });
            drop(back);
            assert!(result.unwrap().unwrap_err().is_cancelled());
            assert_eq!(list.snapshot(), [1]);
            assert_consistent(&list);
        }

        #[rstest]
        fn test_huge_timeout_behaves_like_blocking() {
            let list = list_of(&[1]);
            assert_eq!(list.pop_back_timeout(Duration::MAX), Ok(1));
        }
    }

    mod concurrency {
        use super::*;

        #[rstest]
        fn test_opposite_ends_in_parallel() {
            let list = Arc::new(SafeList::new());
            for value in 0..1_000 {
                list.push_back(value).unwrap();
            }

            let pushers: Vec<_> = (0..4)
                .map(|thread_index| {
                    let list = Arc::clone(&list);
                    thread::spawn(move || {
                        for value in 0..500 {
                            list.push_back(10_000 * (thread_index + 1) + value).unwrap();
                        }
                    })
                })
                .collect();
            let poppers: Vec<_> = (0..4)
                .map(|_| {
                    let list = Arc::clone(&list);
                    thread::spawn(move || {
                        for _ in 0..250 {
                            list.pop_front().unwrap();
                        }
                    })
                })
                .collect();

            for handle in pushers.into_iter().chain(poppers) {
                handle.join().unwrap();
            }
            assert_eq!(list.len(), 1_000 + 2_000 - 1_000);
            assert_consistent(&list);
        }

        #[rstest]
        fn test_pops_race_at_small_sizes() {
            for _ in 0..200 {
                let list = Arc::new(list_of(&[1, 2]));
                let front = {
                    let list = Arc::clone(&list);
                    thread::spawn(move || list.pop_front())
                };
                let back = {
                    let list = Arc::clone(&list);
                    thread::spawn(move || list.pop_back())
                };
                let mut popped = vec![front.join().unwrap().unwrap(), back.join().unwrap().unwrap()];
                popped.sort_unstable();
                assert_eq!(popped, vec![1, 2]);
                assert!(list.is_empty());
                assert_consistent(&list);
            }
        }
    }
}
