//! How an end lock is waited for: indefinitely, or until a deadline.

use std::convert::Infallible;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};

use super::Cancelled;

/// Strategy for acquiring one of the list's end locks.
///
/// `Interrupt` is what a failed acquisition yields. A strategy that always
/// succeeds uses [`Infallible`], which lets the blocking operations share
/// their code with the timed ones without any unreachable branches.
pub(crate) trait Acquire: Copy {
    type Interrupt;

    fn acquire<'a, U>(self, mutex: &'a Mutex<U>) -> Result<MutexGuard<'a, U>, Self::Interrupt>;
}

/// Waits as long as it takes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Blocking;

impl Acquire for Blocking {
    type Interrupt = Infallible;

    #[inline]
    fn acquire<'a, U>(self, mutex: &'a Mutex<U>) -> Result<MutexGuard<'a, U>, Infallible> {
        Ok(mutex.lock())
    }
}

/// Gives up once the instant has passed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline(pub(crate) Instant);

impl Acquire for Deadline {
    type Interrupt = Cancelled;

    #[inline]
    fn acquire<'a, U>(self, mutex: &'a Mutex<U>) -> Result<MutexGuard<'a, U>, Cancelled> {
        mutex.try_lock_until(self.0).ok_or(Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    fn test_blocking_acquires_free_mutex() {
        let mutex = Mutex::new(1);
        let Ok(guard) = Blocking.acquire(&mutex);
        assert_eq!(*guard, 1);
    }

    #[rstest]
    fn test_deadline_acquires_free_mutex() {
        let mutex = Mutex::new(1);
        let deadline = Deadline(Instant::now() + Duration::from_secs(1));
        assert_eq!(deadline.acquire(&mutex).map(|guard| *guard), Ok(1));
    }

    #[rstest]
    fn test_deadline_gives_up_on_held_mutex() {
        let mutex = Mutex::new(1);
        let _held = mutex.lock();
        let deadline = Deadline(Instant::now() + Duration::from_millis(10));
        assert_eq!(deadline.acquire(&mutex).map(|guard| *guard), Err(Cancelled));
    }
}
