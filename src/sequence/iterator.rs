use crate::sequence::{Link, Sequence};
use std::fmt;
use std::iter::FusedIterator;

/// An iterator over the elements of a `Sequence`.
///
/// It walks a closed range of nodes `front..=back` holding `len` elements,
/// shrinking it from either side.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter();
///
/// // Won't compile, because seq is already borrowed immutably.
/// seq.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a Sequence<T>,
    front: Link,
    back: Link,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a Sequence<T>) -> Self {
        Self {
            list,
            front: list.front_node(),
            back: list.back_node(),
            len: list.len(),
        }
    }

    /// Iterate `count` nodes starting from `front`.
    pub(crate) fn from_range(list: &'a Sequence<T>, front: Link, count: usize) -> Self {
        let mut back = front;
        for _ in 1..count {
            back = list.next_of(back);
        }
        Self {
            list,
            front,
            back,
            len: count,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        self.clone().for_each(|element| {
            f.field(element);
        });
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return the element at `front` and advance `front`, or return `None`
    /// if the range is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front?];
        self.front = node.next;
        self.len -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Return the element at `back` and retreat `back`, or return `None`
    /// if the range is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back?];
        self.back = node.prev;
        self.len -= 1;
        Some(&node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

struct Slot<'a, T> {
    element: &'a mut T,
    next: Link,
    prev: Link,
}

/// A mutable iterator over the elements of a `Sequence`.
///
/// The mutable borrows of all elements are split up front into slots sorted
/// by arena key, and handed out in link order. Creating the iterator takes
/// *O*(*n*) time and memory, and each step finds its slot in *O*(log *n*).
///
/// # Examples
///
/// `Sequence` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: Vec<(usize, Option<Slot<'a, T>>)>,
    front: Link,
    back: Link,
    len: usize,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut Sequence<T>) -> Self {
        let (front, back, len) = (list.head, list.tail, list.len());
        // `Slab::iter_mut` yields in ascending key order.
        let slots = list
            .nodes
            .iter_mut()
            .map(|(key, node)| {
                let slot = Slot {
                    element: &mut node.element,
                    next: node.next,
                    prev: node.prev,
                };
                (key, Some(slot))
            })
            .collect();
        Self {
            slots,
            front,
            back,
            len,
        }
    }

    fn take(&mut self, link: Link) -> Option<Slot<'a, T>> {
        let key = link?;
        let at = self.slots.binary_search_by_key(&key, |(k, _)| *k).ok()?;
        self.slots[at].1.take()
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let slot = self.take(self.front)?;
        self.front = slot.next;
        self.len -= 1;
        Some(slot.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let slot = self.take(self.back)?;
        self.back = slot.prev;
        self.len -= 1;
        Some(slot.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `Sequence`.
///
/// This `struct` is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: Sequence::into_iter
pub struct IntoIter<T> {
    list: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Sequence::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_iter(values)
    }
}

#[cfg(test)]
mod tests {
    use crate::Sequence;
    use std::fmt::Debug;

    #[test]
    fn test_iter() {
        macro_rules! test_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut seq = Sequence::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = seq.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = seq.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        test_iter!(test_iter, iter);
        test_iter!(test_iter_mut, iter_mut);
        test_iter!(test_back_iter, iter, rev);
        test_iter!(test_back_iter_mut, iter_mut, rev);

        fn test_case<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            test_iter(input.clone(), mid);
            test_iter_mut(input.clone(), mid);
            test_back_iter(input.clone(), mid);
            test_back_iter_mut(input.clone(), mid);
        }
        test_case(0..10, 10);
        test_case(0..10, 8);
        test_case(0..10, 5);
        test_case(0..10, 2);
        test_case(0..10, 0);
        test_case(0..2, 2);
        test_case(0..2, 1);
        test_case(0..2, 0);
        test_case(0..1, 1);
        test_case(0..1, 0);
        test_case(0..0, 0);
    }

    #[test]
    fn iter_mut_after_relinking() {
        let mut seq = Sequence::from_iter(0..8);
        seq.remove_at(2).unwrap();
        seq.remove_at(5).unwrap();
        seq.push_front(20);
        seq.reverse();
        seq.rotate_left();
        let expected = seq.to_vec();
        let collected: Vec<i32> = seq.iter_mut().map(|x| *x).collect();
        assert_eq!(collected, expected);
        for x in &mut seq {
            *x *= 2;
        }
        assert_eq!(
            seq.to_vec(),
            expected.iter().map(|x| x * 2).collect::<Vec<_>>()
        );
    }

    #[test]
    fn iter_mut_over_sparse_arena() {
        let mut seq = Sequence::from_iter(0..64);
        for _ in 0..60 {
            seq.pop_front();
        }
        seq.push_front(-1);
        assert_eq!(seq.iter_mut().len(), 5);
        seq.iter_mut().rev().for_each(|x| *x += 100);
        assert_eq!(seq.to_vec(), vec![99, 160, 161, 162, 163]);
        seq.assert_links();
    }

    #[test]
    fn into_iter_both_ends() {
        let seq = Sequence::from(vec!['a', 'b', 'c', 'd']);
        let mut iter = seq.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.next_back(), Some('d'));
        assert_eq!(iter.collect::<String>(), "bc");
    }

    #[test]
    fn extend_by_reference() {
        let mut seq = Sequence::from([1, 2]);
        seq.extend(&[3, 4]);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    }
}
