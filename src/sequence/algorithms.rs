use crate::compare::Comparator;
use crate::sequence::Sequence;
use crate::{Error, Result};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

mod sort;

use sort::merge_sort;

/// Two sequences are equal when they have the same length and pairwise
/// equal values. Comparators take no part in equality.
impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialOrd> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Sequence<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Builds new nodes holding clones of the values. The comparator is shared.
impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_optional_comparator(self.comparator.clone());
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

/// Formats the values in order, space separated and enclosed in brackets.
///
/// ```
/// use linked_sequence::Sequence;
///
/// assert_eq!(Sequence::from([1, 2, 3]).to_string(), "[1 2 3]");
/// assert_eq!(Sequence::<i32>::new().to_string(), "[]");
/// ```
impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, elt) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(elt, f)?;
        }
        f.write_str("]")
    }
}

// Value-based operations.
impl<T> Sequence<T> {
    /// Returns `true` if the `Sequence` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_back(0);
    /// seq.push_back(1);
    /// seq.push_back(2);
    ///
    /// assert_eq!(seq.contains(&0), true);
    /// assert_eq!(seq.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Finds the first element equal to `x`, scanning from the front.
    ///
    /// Returns `Ok(index)` of the first match, or `Err(len)` when no element
    /// matches. An absent value is a normal outcome, not a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from(['a', 'b', 'a']);
    /// assert_eq!(seq.search(&'a'), Ok(0));
    /// assert_eq!(seq.search(&'b'), Ok(1));
    /// assert_eq!(seq.search(&'z'), Err(3));
    /// ```
    pub fn search(&self, x: &T) -> std::result::Result<usize, usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x).ok_or(self.len())
    }

    /// Removes every element equal to `x` in a single pass and returns how
    /// many were removed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 1, 3, 1]);
    /// assert_eq!(seq.remove_all(&1), 3);
    /// assert_eq!(seq.remove_all(&7), 0);
    /// assert_eq!(seq.to_vec(), vec![2, 3]);
    /// ```
    pub fn remove_all(&mut self, x: &T) -> usize
    where
        T: PartialEq<T>,
    {
        let removed = self.len();
        self.retain(|e| e != x);
        let removed = removed - self.len();
        trace!("removed {} matching values", removed);
        removed
    }

    /// Retains only the elements specified by the predicate, visiting each
    /// element once from front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter(0..10);
    /// seq.retain(|x| x % 3 == 0);
    /// assert_eq!(seq.to_vec(), vec![0, 3, 6, 9]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_start_mut();
        loop {
            let keep_current = match cursor.current() {
                None => break,
                Some(e) => keep(e),
            };
            if keep_current {
                cursor.move_next_cyclic();
            } else {
                cursor.remove();
            }
        }
    }
}

// Higher-order combinators and exports.
impl<T> Sequence<T> {
    /// Returns a new sequence with clones of the elements for which
    /// `predicate` holds, in their original order. The comparator is
    /// inherited.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from_iter(1..=5);
    /// assert_eq!(seq.filter(|x| x % 2 == 0).to_vec(), vec![2, 4]);
    /// ```
    pub fn filter<F>(&self, mut predicate: F) -> Sequence<T>
    where
        F: FnMut(&T) -> bool,
        T: Clone,
    {
        let mut list = Self::with_optional_comparator(self.comparator.clone());
        list.extend(self.iter().filter(|e| predicate(e)).cloned());
        list
    }

    /// Returns a new sequence holding `transform` applied to each element,
    /// in order. The result has no comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from_iter(1..=5);
    /// assert_eq!(seq.map(|x| x * x).to_vec(), vec![1, 4, 9, 16, 25]);
    /// assert_eq!(seq.map(|x| x.to_string()).to_string(), "[1 2 3 4 5]");
    /// ```
    pub fn map<U, F>(&self, transform: F) -> Sequence<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(transform).collect()
    }

    /// Folds the elements from front to back, starting from a clone of the
    /// first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Error, Sequence};
    ///
    /// let seq = Sequence::from_iter(1..=5);
    /// assert_eq!(seq.reduce(|acc, x| acc + x), Ok(15));
    /// assert_eq!(Sequence::<i32>::new().reduce(|acc, x| acc + x), Err(Error::Empty));
    /// ```
    pub fn reduce<F>(&self, combine: F) -> Result<T>
    where
        F: FnMut(T, &T) -> T,
        T: Clone,
    {
        let mut iter = self.iter();
        let Some(first) = iter.next() else {
            debug!("reduce called on an empty sequence");
            return Err(Error::Empty);
        };
        Ok(iter.fold(first.clone(), combine))
    }

    /// Builds a sequence of `n` values produced by `generator(i)` for each
    /// `i` in `0..n`, ordered by `comparator` if one is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Comparator, Sequence};
    ///
    /// let seq = Sequence::generate(5, |i| i + 1, Some(Comparator::natural()));
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert!(seq.comparator().is_some());
    /// ```
    pub fn generate<F>(n: usize, generator: F, comparator: Option<Comparator<T>>) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let mut list = Self::with_optional_comparator(comparator);
        list.extend((0..n).map(generator));
        list
    }

    /// Copies the elements into a `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Moves the elements into a `Vec`, in order.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Copies the elements into a map keyed by their current position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let map = Sequence::from(["x", "y"]).to_map();
    /// assert_eq!(map.get(&0), Some(&"x"));
    /// assert_eq!(map.get(&1), Some(&"y"));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn to_map(&self) -> BTreeMap<usize, T>
    where
        T: Clone,
    {
        self.iter().cloned().enumerate().collect()
    }
}

// Ordering-dependent operations.
impl<T> Sequence<T> {
    /// Sort the sequence with its configured comparator.
    ///
    /// This sort is stable (i.e., does not reorder equal elements). Nodes
    /// are relinked; no element is moved or cloned.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComparator`] if no comparator is configured;
    /// the sequence is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Comparator, Error, Sequence};
    ///
    /// let mut seq = Sequence::from([5, 2, 4, 3, 1]);
    /// assert_eq!(seq.sort(), Err(Error::MissingComparator));
    ///
    /// seq.set_comparator(Comparator::natural());
    /// seq.sort().unwrap();
    /// assert_eq!(seq.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self) -> Result<()> {
        let comparator = self.require_comparator()?;
        merge_sort(self, |a, b| comparator.less(a, b));
        Ok(())
    }

    /// Sort the sequence by `T`'s [`Ord`], ignoring any configured
    /// comparator.
    ///
    /// ```
    /// use linked_sequence::Sequence;
    /// let mut seq = Sequence::from(["pear", "apple", "fig"]);
    /// seq.sort_natural();
    /// assert_eq!(seq.to_vec(), vec!["apple", "fig", "pear"]);
    /// ```
    pub fn sort_natural(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the sequence with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the sequence. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// For example, while [`f64`] doesn’t implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the sequence doesn’t contain a `NaN`.
    /// ```
    /// use linked_sequence::Sequence;
    /// let mut floats = Sequence::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats.into_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    /// let mut v = Sequence::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.to_vec(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the sequence with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements)
    /// and *O*(*m* \* *n* \* log(*n*)) worst-case, where the
    /// key function is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    /// let mut v = Sequence::from([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v.into_vec(), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        merge_sort(self, |a, b| f(a).lt(&f(b)));
    }

    /// Reports whether the values are non-decreasing under the configured
    /// comparator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComparator`] if no comparator is configured.
    pub fn is_sorted(&self) -> Result<bool> {
        let comparator = self.require_comparator()?;
        let mut next = self.iter();
        next.next();
        Ok(self.iter().zip(next).all(|(a, b)| !comparator.less(b, a)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Comparator, Error, Sequence};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_and_ordering() {
        let a = Sequence::from([1, 2, 3]);
        let mut b = Sequence::with_comparator(Comparator::natural());
        b.append([1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        b.push(4);
        assert_ne!(a, b);
        assert!(a < b);
        assert!(Sequence::from([2]) > b);
        assert_eq!(Sequence::<u8>::new(), Sequence::new());
    }

    #[test]
    fn clone_is_independent() {
        let mut seq = Sequence::with_comparator(Comparator::natural());
        seq.append([3, 1, 2]);
        let mut copy = seq.clone();
        copy.sort().unwrap();
        copy.push(4);
        copy.assert_links();
        assert_eq!(copy.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(seq.to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn search_and_contains() {
        let seq = Sequence::from_iter((0..20).map(|i| i * 3));
        for (i, value) in (0..20).map(|i| i * 3).enumerate() {
            assert_eq!(seq.search(&value), Ok(i));
            assert!(seq.contains(&value));
        }
        assert_eq!(seq.search(&1), Err(20));
        assert!(!seq.contains(&1));
        assert_eq!(Sequence::<i32>::new().search(&0), Err(0));
    }

    #[test]
    fn remove_all_matches() {
        let mut seq = Sequence::from([7, 7, 1, 7, 2, 7]);
        assert_eq!(seq.remove_all(&7), 4);
        seq.assert_links();
        assert_eq!(seq.to_vec(), vec![1, 2]);

        let mut same = Sequence::from([0; 5]);
        assert_eq!(same.remove_all(&0), 5);
        same.assert_links();
        assert!(same.is_empty());
    }

    #[test]
    fn combinators() {
        let seq = Sequence::generate(5, |i| i as i64 + 1, Some(Comparator::natural()));
        assert_eq!(seq.reduce(|acc, x| acc + x), Ok(15));
        let evens = seq.filter(|x| x % 2 == 0);
        assert_eq!(evens.to_vec(), vec![2, 4]);
        assert!(evens.comparator().is_some());
        let squares = seq.map(|x| x * x);
        assert_eq!(squares.to_vec(), vec![1, 4, 9, 16, 25]);
        assert!(squares.comparator().is_none());
        assert_eq!(
            Sequence::from([String::from("a"), String::from("b")])
                .reduce(|acc, x| acc + x),
            Ok(String::from("ab"))
        );
        assert_eq!(Sequence::<i64>::new().reduce(|a, b| a + b), Err(Error::Empty));
        assert_eq!(Sequence::from([9]).reduce(|a, b| a * b), Ok(9));
    }

    #[test]
    fn exports() {
        let seq = Sequence::from(['q', 'r', 's']);
        let map = seq.to_map();
        assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![(0, 'q'), (1, 'r'), (2, 's')]);
        insta::assert_snapshot!(seq.to_string(), @"[q r s]");
        insta::assert_snapshot!(Sequence::<char>::new().to_string(), @"[]");
        insta::assert_debug_snapshot!(seq, @r###"
        [
            'q',
            'r',
            's',
        ]
        "###);
        assert_eq!(seq.into_vec(), vec!['q', 'r', 's']);
    }

    #[test]
    fn sort_needs_comparator() {
        let mut seq = Sequence::from([2, 1]);
        assert_eq!(seq.sort(), Err(Error::MissingComparator));
        assert_eq!(seq.is_sorted(), Err(Error::MissingComparator));
        assert_eq!(seq.to_vec(), vec![2, 1]);

        seq.set_comparator(Comparator::natural().reversed());
        assert_eq!(seq.is_sorted(), Ok(true));
        seq.push(3);
        assert_eq!(seq.is_sorted(), Ok(false));
        seq.sort().unwrap();
        assert_eq!(seq.to_vec(), vec![3, 2, 1]);
        assert!(seq.take_comparator().is_some());
        assert!(seq.sort().is_err());
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let cmp = Comparator::by_key(|pair: &(u8, char)| pair.0);
        let mut seq = Sequence::with_comparator(cmp);
        seq.append([(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (1, 'e')]);
        seq.sort().unwrap();
        let once = seq.to_vec();
        assert_eq!(once, vec![(0, 'd'), (1, 'b'), (1, 'e'), (2, 'a'), (2, 'c')]);
        seq.sort().unwrap();
        assert_eq!(seq.to_vec(), once);
        assert_eq!(seq.is_sorted(), Ok(true));
    }
}
