//! End-lock guards and the front-before-back ordering check.
//!
//! Every code path that needs both end locks of a list takes the front lock
//! first. In debug builds, and in release builds with the `lock-order`
//! feature, each thread records which lists' back locks it holds, and taking
//! a front lock of a list whose back lock the thread already holds panics.
//! Holding one list's back lock while locking another list is allowed.

use std::ops::{Deref, DerefMut};

use parking_lot::{Mutex, MutexGuard};

use super::node::Link;

/// Identifies one list by the address of its back mutex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(any(debug_assertions, feature = "lock-order")), allow(dead_code))]
pub(crate) struct ListId(usize);

impl ListId {
    pub(crate) fn of<T>(back: &Mutex<Option<Link<T>>>) -> Self {
        Self(std::ptr::from_ref(back).addr())
    }
}

#[cfg(any(debug_assertions, feature = "lock-order"))]
mod tracking {
    use std::cell::RefCell;

    use super::ListId;

    thread_local! {
        static BACK_LOCKS_HELD: RefCell<Vec<ListId>> = const { RefCell::new(Vec::new()) };
    }

    pub(super) fn before_front(list: ListId) {
        let held = BACK_LOCKS_HELD.with_borrow(|held| held.contains(&list));
        assert!(
            !held,
            "lock order violated: front lock requested while holding the back lock of the same list"
        );
    }

    pub(super) fn back_acquired(list: ListId) {
        BACK_LOCKS_HELD.with_borrow_mut(|held| held.push(list));
    }

    pub(super) fn back_released(list: ListId) {
        BACK_LOCKS_HELD.with_borrow_mut(|held| {
            if let Some(position) = held.iter().rposition(|entry| *entry == list) {
                held.swap_remove(position);
            }
        });
    }

    #[cfg(test)]
    pub(super) fn back_locks_held() -> usize {
        BACK_LOCKS_HELD.with_borrow(Vec::len)
    }
}

#[cfg(not(any(debug_assertions, feature = "lock-order")))]
mod tracking {
    use super::ListId;

    #[inline(always)]
    pub(super) const fn before_front(_list: ListId) {}

    #[inline(always)]
    pub(super) const fn back_acquired(_list: ListId) {}

    #[inline(always)]
    pub(super) const fn back_released(_list: ListId) {}
}

/// Checks that the calling thread may take the front lock of `list`.
///
/// # Panics
///
/// Panics when checking is enabled and the thread holds the back lock of the
/// same list.
#[inline]
pub(crate) fn check_front_allowed(list: ListId) {
    tracking::before_front(list);
}

/// Number of back locks the calling thread holds, across all lists.
#[cfg(all(test, any(debug_assertions, feature = "lock-order")))]
pub(crate) fn back_locks_held() -> usize {
    tracking::back_locks_held()
}

pub(crate) struct FrontGuard<'a, T>(MutexGuard<'a, Option<Link<T>>>);

impl<'a, T> FrontGuard<'a, T> {
    /// Wraps a freshly acquired front guard. Call [`check_front_allowed`] before acquiring.
    pub(crate) const fn new(guard: MutexGuard<'a, Option<Link<T>>>) -> Self {
        Self(guard)
    }
}

impl<T> Deref for FrontGuard<'_, T> {
    type Target = Option<Link<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for FrontGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub(crate) struct BackGuard<'a, T> {
    guard: MutexGuard<'a, Option<Link<T>>>,
    list: ListId,
}

impl<'a, T> BackGuard<'a, T> {
    pub(crate) fn new(list: ListId, guard: MutexGuard<'a, Option<Link<T>>>) -> Self {
        tracking::back_acquired(list);
        Self { guard, list }
    }
}

impl<T> Drop for BackGuard<'_, T> {
    fn drop(&mut self) {
        tracking::back_released(self.list);
    }
}

impl<T> Deref for BackGuard<'_, T> {
    type Target = Option<Link<T>>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> DerefMut for BackGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
