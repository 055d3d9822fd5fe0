//! Orderings used by [`Sequence::sort`], sorted insertion and the heap
//! adapter.
//!
//! A [`Comparator`] is a shared three-way ordering function. Any `T: Ord` is
//! comparable through [`Comparator::natural`]; the free functions in this
//! module cover the primitive types that have no total order of their own.
//!
//! [`Sequence::sort`]: crate::Sequence::sort

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

/// A cloneable three-way ordering over values of type `T`.
///
/// Cloning a `Comparator` is cheap: clones share the same function.
///
/// # Examples
///
/// ```
/// use linked_sequence::Comparator;
/// use std::cmp::Ordering;
///
/// let by_len = Comparator::by_key(|s: &String| s.len());
/// assert_eq!(by_len.compare(&"ab".to_string(), &"c".to_string()), Ordering::Greater);
///
/// let desc = Comparator::<i32>::natural().reversed();
/// assert!(desc.less(&3, &1));
/// ```
pub struct Comparator<T> {
    compare: Arc<CompareFn<T>>,
}

impl<T: 'static> Comparator<T> {
    /// Wrap a three-way comparison function.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
        }
    }

    /// The ordering given by `T`'s [`Ord`] implementation.
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::new(natural::<T>)
    }

    /// Build a comparator from a boolean less-than signal.
    ///
    /// Two values are `Equal` when neither is less than the other.
    ///
    /// ```
    /// use linked_sequence::Comparator;
    /// use std::cmp::Ordering;
    ///
    /// let cmp = Comparator::from_less(|a: &i32, b: &i32| a < b);
    /// assert_eq!(cmp.compare(&2, &2), Ordering::Equal);
    /// assert_eq!(cmp.compare(&3, &2), Ordering::Greater);
    /// ```
    pub fn from_less<F>(less: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    /// Order values by a key extracted from each of them.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::new(move |a, b| key(a).cmp(&key(b)))
    }

    /// The same ordering with its direction flipped.
    pub fn reversed(&self) -> Self {
        let compare = Arc::clone(&self.compare);
        Self::new(move |a, b| compare(b, a))
    }
}

impl<T> Comparator<T> {
    #[inline]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    #[inline]
    pub fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}

/// Three-way comparison through [`Ord`].
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Three-way comparison of `f32`s under the IEEE 754 total order.
pub fn f32_total(a: &f32, b: &f32) -> Ordering {
    a.total_cmp(b)
}

/// Three-way comparison of `f64`s under the IEEE 754 total order.
pub fn f64_total(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Lexicographic comparison of strings ignoring ASCII case.
pub fn ascii_case_insensitive(a: &String, b: &String) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparator_natural_and_reversed() {
        let cmp = Comparator::<i32>::natural();
        assert_eq!(cmp.compare(&1, &2), Ordering::Less);
        assert_eq!(cmp.compare(&2, &2), Ordering::Equal);
        assert!(cmp.less(&-1, &0));

        let rev = cmp.reversed();
        assert_eq!(rev.compare(&1, &2), Ordering::Greater);
        assert_eq!(rev.reversed().compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn comparator_from_less() {
        let cmp = Comparator::from_less(|a: &u8, b: &u8| a < b);
        assert_eq!(cmp.compare(&1, &9), Ordering::Less);
        assert_eq!(cmp.compare(&9, &1), Ordering::Greater);
        assert_eq!(cmp.compare(&4, &4), Ordering::Equal);
    }

    #[test]
    fn comparator_by_key() {
        let cmp = Comparator::by_key(|pair: &(i32, &'static str)| pair.0);
        assert_eq!(cmp.compare(&(1, "b"), &(1, "a")), Ordering::Equal);
        assert_eq!(cmp.compare(&(0, "z"), &(1, "a")), Ordering::Less);
    }

    #[test]
    fn primitive_orderings() {
        assert_eq!(f64_total(&-0.0, &0.0), Ordering::Less);
        assert_eq!(f64_total(&f64::NAN, &1.0), Ordering::Greater);
        assert_eq!(f32_total(&1.5, &1.5), Ordering::Equal);
        assert_eq!(
            ascii_case_insensitive(&"Apple".to_string(), &"apple".to_string()),
            Ordering::Equal
        );
        assert_eq!(
            ascii_case_insensitive(&"b".to_string(), &"A".to_string()),
            Ordering::Greater
        );
        let cmp = Comparator::new(f64_total);
        assert!(cmp.less(&1.0, &2.0));
    }
}
