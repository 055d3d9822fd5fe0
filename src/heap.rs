//! Binary-heap and heapsort routines over index-addressable containers.
//!
//! The routines only see the three primitives of [`Sortable`] plus the
//! push-at-end and pop-last pair of [`Heap`], so the container never keeps
//! heap order by itself. The heap is a min-heap: [`pop`] yields the least
//! element first.
//!
//! # Examples
//!
//! ```
//! use linked_sequence::{heap, Comparator, Sequence};
//!
//! let mut seq = Sequence::with_comparator(Comparator::natural());
//! let mut view = seq.heap_view().unwrap();
//! for x in [9, 0, 8, 1, 7] {
//!     heap::push(&mut view, x);
//! }
//! assert_eq!(heap::pop(&mut view), Some(0));
//! assert_eq!(heap::pop(&mut view), Some(1));
//! ```

use crate::{Comparator, Result, Sequence};

/// A collection addressed by position whose elements can be compared and
/// exchanged.
pub trait Sortable {
    fn len(&self) -> usize;

    /// Whether the element at `i` must sort before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    fn swap(&mut self, i: usize, j: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`Sortable`] that grows and shrinks at its end.
pub trait Heap: Sortable {
    type Item;

    /// Add `item` as the last element.
    fn push(&mut self, item: Self::Item);

    /// Remove and return the last element.
    fn pop(&mut self) -> Option<Self::Item>;
}

/// Establish the heap order over all elements.
///
/// # Complexity
///
/// *O*(*n*) calls to `less` and `swap`.
pub fn init<H: Sortable + ?Sized>(h: &mut H) {
    let n = h.len();
    for i in (0..n / 2).rev() {
        down(h, i, n);
    }
}

/// Push `item` and restore the heap order.
pub fn push<H: Heap + ?Sized>(h: &mut H, item: H::Item) {
    h.push(item);
    let last = h.len() - 1;
    up(h, last);
}

/// Remove and return the least element, or `None` if the heap is empty.
pub fn pop<H: Heap + ?Sized>(h: &mut H) -> Option<H::Item> {
    let n = h.len().checked_sub(1)?;
    h.swap(0, n);
    down(h, 0, n);
    h.pop()
}

/// Remove and return the element at position `i`, or `None` if `i` is out
/// of range.
pub fn remove<H: Heap + ?Sized>(h: &mut H, i: usize) -> Option<H::Item> {
    let n = h.len().checked_sub(1)?;
    if i > n {
        return None;
    }
    if n != i {
        h.swap(i, n);
        if !down(h, i, n) {
            up(h, i);
        }
    }
    h.pop()
}

/// Restore the heap order after the element at `i` changed its value.
pub fn fix<H: Sortable + ?Sized>(h: &mut H, i: usize) {
    let n = h.len();
    if i >= n {
        return;
    }
    if !down(h, i, n) {
        up(h, i);
    }
}

/// Sort the elements in place in ascending order.
///
/// The sort is not stable.
///
/// # Examples
///
/// ```
/// use linked_sequence::heap;
///
/// let mut v = vec![3, 1, 4, 1, 5, 9, 2, 6];
/// heap::sort(&mut v);
/// assert_eq!(v, vec![1, 1, 2, 3, 4, 5, 6, 9]);
/// ```
pub fn sort<S: Sortable + ?Sized>(data: &mut S) {
    let n = data.len();
    if n < 2 {
        return;
    }
    // Max-heap over `0..n`, then move the root behind the shrinking heap.
    for i in (0..n / 2).rev() {
        sift_down_max(data, i, n);
    }
    for end in (1..n).rev() {
        data.swap(0, end);
        sift_down_max(data, 0, end);
    }
}

fn up<H: Sortable + ?Sized>(h: &mut H, mut j: usize) {
    while j > 0 {
        let i = (j - 1) / 2;
        if !h.less(j, i) {
            break;
        }
        h.swap(i, j);
        j = i;
    }
}

/// Sift the element at `i0` down within `0..n`; report whether it moved.
fn down<H: Sortable + ?Sized>(h: &mut H, i0: usize, n: usize) -> bool {
    let mut i = i0;
    loop {
        let j1 = 2 * i + 1;
        if j1 >= n {
            break;
        }
        let mut j = j1;
        let j2 = j1 + 1;
        if j2 < n && h.less(j2, j1) {
            j = j2;
        }
        if !h.less(j, i) {
            break;
        }
        h.swap(i, j);
        i = j;
    }
    i > i0
}

fn sift_down_max<S: Sortable + ?Sized>(data: &mut S, mut root: usize, hi: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= hi {
            return;
        }
        if child + 1 < hi && data.less(child, child + 1) {
            child += 1;
        }
        if !data.less(root, child) {
            return;
        }
        data.swap(root, child);
        root = child;
    }
}

/// A [`Heap`] over a [`Sequence`], ordered by the sequence's comparator.
///
/// Created by [`Sequence::heap_view`]. Positional access walks the chain,
/// so every `less` and `swap` costs *O*(*n*). An out-of-range position
/// panics, as it does for the `Vec` implementation.
pub struct HeapView<'a, T> {
    list: &'a mut Sequence<T>,
    comparator: Comparator<T>,
}

impl<'a, T> HeapView<'a, T> {
    /// The underlying sequence.
    pub fn as_sequence(&self) -> &Sequence<T> {
        self.list
    }
}

impl<T> Sequence<T> {
    /// Borrow the sequence through the [`Heap`] capability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingComparator`](crate::Error::MissingComparator)
    /// if no comparator is configured.
    pub fn heap_view(&mut self) -> Result<HeapView<'_, T>> {
        let comparator = self.require_comparator()?;
        Ok(HeapView {
            list: self,
            comparator,
        })
    }
}

impl<'a, T> Sortable for HeapView<'a, T> {
    fn len(&self) -> usize {
        self.list.len()
    }

    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range, like `Vec` does.
    fn less(&self, i: usize, j: usize) -> bool {
        self.comparator.less(&self.list[i], &self.list[j])
    }

    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    fn swap(&mut self, i: usize, j: usize) {
        if let Err(err) = self.list.swap(i, j) {
            panic!("{}", err);
        }
    }
}

impl<'a, T> Heap for HeapView<'a, T> {
    type Item = T;

    fn push(&mut self, item: T) {
        self.list.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.list.pop()
    }
}

impl<T: Ord> Sortable for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self[i] < self[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.as_mut_slice().swap(i, j);
    }
}

impl<T: Ord> Heap for Vec<T> {
    type Item = T;

    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn is_heap<S: Sortable>(h: &S) -> bool {
        (1..h.len()).all(|j| !h.less(j, (j - 1) / 2))
    }

    #[test]
    fn heap_sort_through_sequence() {
        let mut seq = Sequence::with_comparator(Comparator::natural());
        let mut view = seq.heap_view().unwrap();
        for x in [9, 0, 8, 1, 7, 2, 6, 3, 5, 4] {
            push(&mut view, x);
            assert!(is_heap(&view));
        }
        let popped: Vec<i32> = std::iter::from_fn(|| pop(&mut view)).collect();
        assert_eq!(popped, (0..10).collect::<Vec<_>>());
        assert!(view.is_empty());
        assert_eq!(pop(&mut view), None);
    }

    #[test]
    fn heap_drains_single_element() {
        let mut seq = Sequence::with_comparator(Comparator::natural());
        let mut view = seq.heap_view().unwrap();
        push(&mut view, 5);
        assert_eq!(pop(&mut view), Some(5));
        assert_eq!(pop(&mut view), None);
    }

    #[test]
    #[should_panic(expected = "index 99 is out of range")]
    fn heap_view_swap_out_of_range() {
        let mut seq = Sequence::with_comparator(Comparator::natural());
        seq.append([1, 2, 3]);
        let mut view = seq.heap_view().unwrap();
        view.swap(0, 99);
    }

    #[test]
    #[should_panic]
    fn heap_view_less_out_of_range() {
        let mut seq = Sequence::with_comparator(Comparator::natural());
        seq.append([1, 2, 3]);
        let view = seq.heap_view().unwrap();
        let _ = view.less(3, 0);
    }

    #[test]
    fn heap_view_needs_comparator() {
        let mut seq = Sequence::from([1, 2]);
        assert!(matches!(seq.heap_view(), Err(Error::MissingComparator)));
    }

    #[test]
    fn heap_follows_comparator() {
        let mut seq = Sequence::with_comparator(Comparator::natural().reversed());
        seq.append([3, 8, 1, 9]);
        let mut view = seq.heap_view().unwrap();
        init(&mut view);
        assert!(is_heap(&view));
        assert_eq!(pop(&mut view), Some(9));
        assert_eq!(pop(&mut view), Some(8));
        assert_eq!(view.as_sequence().len(), 2);
    }

    #[test]
    fn heap_init_fix_remove() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x4ea9_0001);
        let mut h: Vec<u32> = (0..100).map(|_| rng.gen_range(0..1000)).collect();
        init(&mut h);
        assert!(is_heap(&h));

        for _ in 0..20 {
            let i = rng.gen_range(0..h.len());
            h[i] = rng.gen_range(0..1000);
            fix(&mut h, i);
            assert!(is_heap(&h));
        }

        let mut model = h.clone();
        for _ in 0..30 {
            let i = rng.gen_range(0..h.len());
            let removed = remove(&mut h, i).unwrap();
            let at = model.iter().position(|x| *x == removed).unwrap();
            model.swap_remove(at);
            assert!(is_heap(&h));
        }
        assert_eq!(remove(&mut h, 500), None);

        model.sort();
        let drained: Vec<u32> = std::iter::from_fn(|| pop(&mut h)).collect();
        assert_eq!(drained, model);
    }

    #[test]
    fn heap_sort_sequence_and_vec() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x4ea9_0002);
        let values: Vec<i64> = (0..64).map(|_| rng.gen_range(-100..100)).collect();

        let mut seq = Sequence::with_comparator(Comparator::natural());
        seq.append(values.iter().copied());
        sort(&mut seq.heap_view().unwrap());
        seq.assert_links();

        let mut v = values.clone();
        sort(&mut v);

        let mut expected = values;
        expected.sort();
        assert_eq!(seq.to_vec(), expected);
        assert_eq!(v, expected);

        let mut tiny: Vec<i64> = vec![];
        sort(&mut tiny);
        let mut one = vec![1];
        sort(&mut one);
        assert_eq!(one, vec![1]);
    }
}
