//! Point-in-time copies of a list's contents.
//!
//! A [`Snapshot`] owns its elements. Taking one holds the list locks only for
//! the copy; iterating it afterwards needs no lock and is unaffected by later
//! pushes and pops. It can be iterated any number of times.
//!
//! # Examples
//!
//! ```rust
//! use twinlock::list::SafeList;
//!
//! let list: SafeList<i32> = (1..=3).collect();
//! let snapshot = list.snapshot();
//!
//! list.push_back(4).unwrap();
//!
//! assert_eq!(snapshot.as_slice(), &[1, 2, 3]);
//! assert_eq!(snapshot.iter().sum::<i32>(), 6);
//! assert_eq!(snapshot.iter().count(), 3);
//! ```

use std::ops::Deref;

/// An owned, ordered, re-iterable copy of a list taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Snapshot<T> {
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    pub(crate) const fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of elements captured.
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was captured.
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the captured elements in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The captured elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the snapshot, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Snapshot<T>> for Vec<T> {
    fn from(snapshot: Snapshot<T>) -> Self {
        snapshot.items
    }
}

impl<T: PartialEq> PartialEq<[T]> for Snapshot<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Snapshot<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Snapshot<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_snapshot() {
        let snapshot: Snapshot<i32> = Snapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.iter().next(), None);
    }

    #[rstest]
    fn test_iteration_is_restartable() {
        let snapshot = Snapshot::from_vec(vec!["a", "b", "c"]);
        let first: Vec<_> = snapshot.iter().collect();
        let second: Vec<_> = (&snapshot).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(snapshot.first(), Some(&"a"));
        assert_eq!(snapshot.last(), Some(&"c"));
    }

    #[rstest]
    fn test_comparisons() {
        let snapshot = Snapshot::from_vec(vec![1, 2]);
        assert_eq!(snapshot, [1, 2]);
        assert_eq!(snapshot, vec![1, 2]);
        assert!(snapshot == *[1, 2].as_slice());
    }

    #[rstest]
    fn test_into_vec_and_into_iter() {
        let snapshot = Snapshot::from_vec(vec![1, 2, 3]);
        assert_eq!(snapshot.clone().into_vec(), vec![1, 2, 3]);
        assert_eq!(Vec::from(snapshot.clone()), vec![1, 2, 3]);
        assert_eq!(snapshot.into_iter().rev().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
