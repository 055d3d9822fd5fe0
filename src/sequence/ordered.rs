use crate::compare::Comparator;
use crate::sequence::Sequence;
use crate::Result;
use log::trace;
use std::cmp::Ordering;

impl<T> Sequence<T> {
    /// Splice `value` in after the last element not greater than it, scanning
    /// from the back, and return its index. A value smaller than the front
    /// goes straight to the front.
    pub(crate) fn insert_ordered(&mut self, comparator: &Comparator<T>, value: T) -> usize {
        if let Some(front) = self.front() {
            if comparator.compare(front, &value) == Ordering::Greater {
                self.push_front(value);
                return 0;
            }
        }
        let mut cursor = self.cursor_end_mut();
        let mut scanned = 0_usize;
        while cursor
            .previous()
            .map_or(false, |prev| comparator.compare(prev, &value) == Ordering::Greater)
        {
            if cursor.move_prev().is_err() {
                break;
            }
            scanned += 1;
        }
        cursor.insert(value);
        trace!("sorted insertion scanned {} nodes from the back", scanned);
        cursor.index() - 1
    }

    /// Inserts `value` keeping the sequence non-decreasing under its
    /// comparator, and returns the index it landed at.
    ///
    /// The insertion is stable: `value` goes after every element that
    /// compares equal to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComparator`](crate::Error::MissingComparator)
    /// if no comparator is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Comparator, Sequence};
    ///
    /// let mut seq = Sequence::with_comparator(Comparator::natural());
    /// assert_eq!(seq.insert_sorted(3), Ok(0));
    /// assert_eq!(seq.insert_sorted(1), Ok(0));
    /// assert_eq!(seq.insert_sorted(2), Ok(1));
    /// assert_eq!(seq.insert_sorted(5), Ok(3));
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 5]);
    /// ```
    pub fn insert_sorted(&mut self, value: T) -> Result<usize> {
        let comparator = self.require_comparator()?;
        Ok(self.insert_ordered(&comparator, value))
    }

    /// Inserts every value of `values` with [`insert_sorted`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComparator`](crate::Error::MissingComparator)
    /// before inserting anything if no comparator is configured.
    ///
    /// [`insert_sorted`]: Sequence::insert_sorted
    pub fn insert_sorted_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<()> {
        let comparator = self.require_comparator()?;
        for value in values {
            self.insert_ordered(&comparator, value);
        }
        Ok(())
    }
}
