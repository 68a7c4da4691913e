//! FIFO queue over a [`SafeList`].

use std::time::Duration;

use crate::list::{
    Capacity, ConstructError, EmptyError, FullError, PopTimeoutError, PushTimeoutError, SafeList,
    Snapshot,
};

/// A thread-safe FIFO queue: elements enter at the back and leave at the front.
///
/// Producers and consumers work on opposite ends of the underlying list, so
/// they only contend while the queue holds fewer than three elements.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use twinlock::adapters::SafeQueue;
///
/// let queue = Arc::new(SafeQueue::with_capacity(16).unwrap());
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for value in 0..10 {
///             while queue.enqueue(value).is_err() {
///                 thread::yield_now();
///             }
///         }
///     })
/// };
///
/// let mut received = Vec::new();
/// while received.len() < 10 {
///     if let Ok(value) = queue.dequeue() {
///         received.push(value);
///     }
/// }
/// producer.join().unwrap();
/// assert_eq!(received, (0..10).collect::<Vec<_>>());
/// ```
#[derive(Debug)]
pub struct SafeQueue<T> {
    list: SafeList<T>,
}

impl<T> SafeQueue<T> {
    /// Creates an empty, unbounded queue.
    pub const fn new() -> Self {
        Self {
            list: SafeList::new(),
        }
    }

    /// Creates an empty queue holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConstructError> {
        SafeList::with_capacity(capacity).map(Self::from)
    }

    /// Creates a queue from a capacity and initial elements, oldest first.
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

    /// Adds `value` at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`FullError`] carrying `value` if the queue is at capacity.
    pub fn enqueue(&self, value: T) -> Result<(), FullError<T>> {
        self.list.push_back(value)
    }

    /// Removes the oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    pub fn dequeue(&self) -> Result<T, EmptyError> {
        self.list.pop_front()
    }

    /// [`enqueue`](Self::enqueue) with a bound on the lock wait.
    ///
    /// # Errors
    ///
    /// See [`SafeList::push_back_timeout`].
    pub fn enqueue_timeout(&self, value: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        self.list.push_back_timeout(value, timeout)
    }

    /// [`dequeue`](Self::dequeue) with a bound on the lock wait.
    ///
    /// # Errors
    ///
    /// See [`SafeList::pop_front_timeout`].
    pub fn dequeue_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        self.list.pop_front_timeout(timeout)
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.list.is_full()
    }

    /// The maximum number of elements, or `None` when unbounded.
    pub const fn capacity(&self) -> Option<usize> {
        self.list.capacity()
    }

    /// Removes every element, oldest first.
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

impl<T: Clone> SafeQueue<T> {
    /// Returns a copy of the oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyError`] if the queue is empty.
    pub fn peek(&self) -> Result<T, EmptyError> {
        self.list.peek_front()
    }

    /// Copies the queued elements, oldest first.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.list.snapshot()
    }
}

impl<T> Default for SafeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<SafeList<T>> for SafeQueue<T> {
    fn from(list: SafeList<T>) -> Self {
        Self { list }
    }
}

impl<T> FromIterator<T> for SafeQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<SafeList<T>>())
    }
}
