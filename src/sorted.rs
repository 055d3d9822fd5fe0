//! A sequence that stays ordered under its comparator.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use crate::{Comparator, Iter, Result, Sequence};

/// A [`Sequence`] whose only mutations are order-preserving.
///
/// Every value is placed with stable sorted insertion, so the values are
/// always non-decreasing under the comparator and equal values keep their
/// insertion order. Lookups stop early once they pass the place where a
/// value would be. Two values are considered equal when the comparator
/// says so.
///
/// # Examples
///
/// ```
/// use linked_sequence::{Comparator, SortedSequence};
///
/// let mut sorted = SortedSequence::from_values(Comparator::natural(), [4, 1, 3]);
/// sorted.insert(2);
/// assert_eq!(sorted.to_vec(), vec![1, 2, 3, 4]);
/// assert_eq!(sorted.find(&3), Some(2));
/// assert_eq!(sorted.remove(&3), 1);
/// assert!(!sorted.contains(&3));
/// ```
#[derive(Clone)]
pub struct SortedSequence<T> {
    inner: Sequence<T>,
    comparator: Comparator<T>,
}

impl<T> SortedSequence<T> {
    pub fn new(comparator: Comparator<T>) -> Self {
        Self {
            inner: Sequence::with_comparator(comparator.clone()),
            comparator,
        }
    }

    /// Create a sorted sequence holding `values`.
    pub fn from_values<I: IntoIterator<Item = T>>(comparator: Comparator<T>, values: I) -> Self {
        let mut sorted = Self::new(comparator);
        sorted.extend(values);
        sorted
    }

    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Insert `value` after every value not greater than it, and return the
    /// index it landed at.
    pub fn insert(&mut self, value: T) -> usize {
        self.inner.insert_ordered(&self.comparator, value)
    }

    /// Index of the first value comparing equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize> {
        for (i, elt) in self.inner.iter().enumerate() {
            match self.comparator.compare(elt, value) {
                Ordering::Less => {}
                Ordering::Equal => return Some(i),
                Ordering::Greater => return None,
            }
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Remove every value comparing equal to `value` and return how many
    /// were removed.
    ///
    /// Equal values are adjacent, so the walk stops at the first value past
    /// the run.
    pub fn remove(&mut self, value: &T) -> usize {
        let Some(at) = self.find(value) else {
            return 0;
        };
        let comparator = &self.comparator;
        let mut removed = 0;
        if let Ok(mut cursor) = self.inner.cursor_mut(at) {
            while cursor
                .current()
                .map_or(false, |elt| comparator.compare(elt, value) == Ordering::Equal)
            {
                cursor.remove();
                removed += 1;
            }
        }
        trace!("removed a run of {} equal values", removed);
        removed
    }

    /// Remove the value at position `at` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if
    /// `at >= len`.
    pub fn remove_at(&mut self, at: usize) -> Result<T> {
        self.inner.remove_at(at)
    }

    /// The value at position `at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if
    /// `at >= len`.
    pub fn get(&self, at: usize) -> Result<&T> {
        self.inner.get(at)
    }

    /// The smallest value.
    pub fn first(&self) -> Option<&T> {
        self.inner.front()
    }

    /// The largest value.
    pub fn last(&self) -> Option<&T> {
        self.inner.back()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.inner.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.to_vec()
    }

    pub fn to_map(&self) -> BTreeMap<usize, T>
    where
        T: Clone,
    {
        self.inner.to_map()
    }

    pub fn as_sequence(&self) -> &Sequence<T> {
        &self.inner
    }

    /// Unwrap the underlying sequence. It keeps the comparator.
    pub fn into_inner(self) -> Sequence<T> {
        self.inner
    }
}

impl<T> Extend<T> for SortedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a SortedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SortedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SortedSequence").field(&self.inner).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SortedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
