//! LIFO stack over a [`SafeList`].

use std::time::Duration;

use crate::list::{
    Capacity, ConstructError, EmptyError, FullError, PopTimeoutError, PushTimeoutError, SafeList,
    Snapshot,
};

/// A thread-safe LIFO stack. The top of the stack is the front of the list.
///
/// All operations work on the front end, so every caller contends for the
/// same lock; use [`SafeQueue`](super::SafeQueue) when producers and
/// consumers can be split across ends.
///
/// # Examples
///
/// ```rust
/// use twinlock::adapters::SafeStack;
///
/// let stack = SafeStack::new();
/// stack.push(1).unwrap();
/// stack.push(2).unwrap();
///
/// assert_eq!(stack.peek(), Ok(2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.pop(), Ok(1));
/// assert!(stack.pop().is_err());
/// ```
#[derive(Debug)]
pub struct SafeStack<T> {
    list: SafeList<T>,
}

impl<T> SafeStack<T> {
    /// Creates an empty, unbounded stack.
    pub const fn new() -> Self {
        Self {
            list: SafeList::new(),
        }
    }

    /// Creates an empty stack holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConstructError> {
        SafeList::with_capacity(capacity).map(Self::from)
    }

    /// Creates a stack from a capacity and initial elements, top first.
    ///
    /// # Errors
    ///
    /// See [`SafeList::try_new`].
    pub fn try_new<C, I>(capacity: C, initial: I) -> Result<Self, ConstructError>
    where
        C: TryInto<Capacity>,
        ConstructError: From<C::Error>,
        I: IntoIterator<Item = T>,
    {
        SafeList::try_new(capacity, initial).map(Self::from)
    }

    /// Pushes `value` on top.
    ///
    /// # Errors
    ///
    /// Returns [`FullError`] carrying `value` if the stack is at capacity.
    pub fn push(&self, value: T) -> Result<(), FullError<T>> {
        self.list.push_front(value)
    }

    /// Removes the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the stack is empty.
    pub fn pop(&self) -> Result<T, EmptyError> {
        self.list.pop_front()
    }

    /// [`push`](Self::push) with a bound on the lock wait.
    ///
    /// # Errors
    ///
    /// See [`SafeList::push_front_timeout`].
    pub fn push_timeout(&self, value: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        self.list.push_front_timeout(value, timeout)
    }

    /// [`pop`](Self::pop) with a bound on the lock wait.
    ///
    /// # Errors
    ///
    /// See [`SafeList::pop_front_timeout`].
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        self.list.pop_front_timeout(timeout)
    }

    /// Number of stacked elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if the stack is at capacity.
    pub fn is_full(&self) -> bool {
        self.list.is_full()
    }

    /// The maximum number of elements, or `None` when unbounded.
    pub const fn capacity(&self) -> Option<usize> {
        self.list.capacity()
    }

    /// Removes every element, top first.
    pub fn drain(&self) -> Snapshot<T> {
        self.list.drain()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.list.clear();
    }

    /// The underlying list.
    pub const fn as_list(&self) -> &SafeList<T> {
        &self.list
    }

    /// Unwraps the underlying list.
    pub fn into_inner(self) -> SafeList<T> {
        self.list
    }
}

impl<T: Clone> SafeStack<T> {
    /// Returns a copy of the top element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the stack is empty.
    pub fn peek(&self) -> Result<T, EmptyError> {
        self.list.peek_front()
    }

    /// Copies the stacked elements, top first.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.list.snapshot()
    }
}

impl<T> Default for SafeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<SafeList<T>> for SafeStack<T> {
    fn from(list: SafeList<T>) -> Self {
        Self { list }
    }
}

impl<T> FromIterator<T> for SafeStack<T> {
    /// Pushes each element in turn, so the last one yielded ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        Self::from(values.into_iter().rev().collect::<SafeList<T>>())
    }
}
