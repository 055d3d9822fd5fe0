use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use log::debug;
use slab::Slab;

use crate::compare::Comparator;
use crate::sequence::cursor::{Cursor, CursorMut};
use crate::{Error, Iter, IterMut, Result};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod ordered;

/// A link to a neighbouring node, or `None` for the ghost position at the
/// boundary of the sequence.
pub(crate) type Link = Option<usize>;

/// The `Sequence` is a doubly-linked list whose nodes live in a slab arena.
/// It allows inserting and removing elements at a located position in
/// constant time. In compromise, locating a position takes *O*(*n*) time,
/// walking from whichever end is closer.
///
/// The `Sequence` contains:
/// - the arena `nodes`, addressed by stable keys;
/// - `head` and `tail`, the links of the *ghost* position. `head` is what
///   follows the ghost and `tail` is what precedes it, so a node whose `prev`
///   (or `next`) is `None` is the first (or last) element;
/// - an optional [`Comparator`] used by [`sort`], sorted insertion and the
///   heap adapter.
///
/// In a sequence with length *n*, the nodes are indexed by 0, 1, ..., *n* - 1,
/// and the ghost position is always indexed by *n*.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of nodes, both inclusive;
/// - `start..end`: a half-open range of nodes, left inclusive and right
///   exclusive (probably the ghost position).
///
/// [`sort`]: Sequence::sort
pub struct Sequence<T> {
    nodes: Slab<Node<T>>,
    head: Link,
    tail: Link,
    pub(crate) comparator: Option<Comparator<T>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: Link,
    pub(crate) prev: Link,
    pub(crate) element: T,
}

// private methods
impl<T> Sequence<T> {
    pub(crate) fn with_optional_comparator(comparator: Option<Comparator<T>>) -> Self {
        Self {
            nodes: Slab::new(),
            head: None,
            tail: None,
            comparator,
        }
    }

    pub(crate) fn front_node(&self) -> Link {
        self.head
    }

    pub(crate) fn back_node(&self) -> Link {
        self.tail
    }

    /// The link after `link`, cycling through the ghost position.
    pub(crate) fn next_of(&self, link: Link) -> Link {
        match link {
            Some(key) => self.nodes[key].next,
            None => self.head,
        }
    }

    /// The link before `link`, cycling through the ghost position.
    pub(crate) fn prev_of(&self, link: Link) -> Link {
        match link {
            Some(key) => self.nodes[key].prev,
            None => self.tail,
        }
    }

    /// Make `prev` and `next` adjacent.
    pub(crate) fn connect(&mut self, prev: Link, next: Link) {
        match prev {
            Some(key) => self.nodes[key].next = next,
            None => self.head = next,
        }
        match next {
            Some(key) => self.nodes[key].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Attach a new node holding `element` between `prev` and `next`, and
    /// return its key.
    ///
    /// `prev` and `next` must be adjacent (only checked in
    /// `#[cfg(debug_assertions)]`), otherwise the sequence becomes ill-formed.
    pub(crate) fn attach_node(&mut self, prev: Link, next: Link, element: T) -> usize {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let key = self.nodes.insert(Node {
            next,
            prev,
            element,
        });
        self.connect(prev, Some(key));
        self.connect(Some(key), next);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, Some(key));
            self.assert_adjacent(Some(key), next);
        }
        key
    }

    /// Detach the node `key` from the chain, free its slot and return its
    /// element.
    pub(crate) fn detach_node(&mut self, key: usize) -> T {
        let node = self.nodes.remove(key);
        self.connect(node.prev, node.next);
        #[cfg(debug_assertions)]
        self.assert_adjacent(node.prev, node.next);
        node.element
    }

    /// Relink the node `key` so that it sits right before `to`.
    pub(crate) fn move_node(&mut self, key: usize, to: Link) {
        self.move_nodes(key, key, to);
    }

    /// Relink the nodes `front..=back` so that they sit right before `to`.
    ///
    /// `to` must not lie inside `front..=back`.
    pub(crate) fn move_nodes(&mut self, front: usize, back: usize, to: Link) {
        let (before, after) = (self.nodes[front].prev, self.nodes[back].next);
        self.connect(before, after);
        let to_prev = self.prev_of(to);
        self.connect(to_prev, Some(front));
        self.connect(Some(back), to);
    }

    /// The key of the node at position `at`.
    pub(crate) fn locate(&self, at: usize) -> Result<usize> {
        self.cursor(at)?.current.ok_or(Error::IndexOutOfRange {
            index: at,
            len: self.len(),
        })
    }

    pub(crate) fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end || end > self.len() {
            return Err(Error::RangeOutOfBounds {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_comparator(&self) -> Result<Comparator<T>> {
        self.comparator.clone().ok_or_else(|| {
            debug!("ordered operation on a sequence without comparator");
            Error::MissingComparator
        })
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Link, next: Link) {
        assert_eq!(self.next_of(prev), next);
        assert_eq!(self.prev_of(next), prev);
    }

    /// Walk the chain in both directions and check that the links are
    /// symmetric and cover exactly `len` nodes.
    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        assert_eq!(self.head.is_none(), self.is_empty());
        assert_eq!(self.tail.is_none(), self.is_empty());
        let (mut count, mut prev, mut link) = (0, None, self.head);
        while let Some(key) = link {
            assert_eq!(self.nodes[key].prev, prev);
            count += 1;
            assert!(count <= self.len(), "cycle in forward links");
            prev = link;
            link = self.nodes[key].next;
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len());
        let (mut count, mut next, mut link) = (0, None, self.tail);
        while let Some(key) = link {
            assert_eq!(self.nodes[key].next, next);
            count += 1;
            assert!(count <= self.len(), "cycle in backward links");
            next = link;
            link = self.nodes[key].prev;
        }
        assert_eq!(next, self.head);
        assert_eq!(count, self.len());
    }
}

impl<T> Sequence<T> {
    /// Create an empty `Sequence` without a comparator.
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::Sequence;
    /// let seq: Sequence<u32> = Sequence::new();
    /// assert!(seq.comparator().is_none());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_optional_comparator(None)
    }

    /// Create an empty `Sequence` ordered by `comparator`.
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::{Comparator, Sequence};
    ///
    /// let mut seq = Sequence::with_comparator(Comparator::natural());
    /// seq.append([3, 1, 2]);
    /// seq.sort().unwrap();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// ```
    #[inline]
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self::with_optional_comparator(Some(comparator))
    }

    /// The configured comparator, if any.
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        self.comparator.as_ref()
    }

    /// Configure the comparator used by ordered operations. Existing values
    /// are not reordered.
    pub fn set_comparator(&mut self, comparator: Comparator<T>) {
        self.comparator = Some(comparator);
    }

    /// Remove the comparator and return it.
    pub fn take_comparator(&mut self) -> Option<Comparator<T>> {
        self.comparator.take()
    }

    /// Returns `true` if the `Sequence` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_front(2);
    /// seq.push_front(1);
    /// seq.push_back(3);
    /// assert_eq!(seq.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Removes all elements from the `Sequence`. The comparator is kept.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Provides a reference to the front element, or `None` if the sequence
    /// is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// if let Some(x) = seq.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(seq.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let key = self.head?;
        Some(&mut self.nodes[key].element)
    }

    /// Provides a reference to the back element, or `None` if the sequence
    /// is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// sequence is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let key = self.tail?;
        Some(&mut self.nodes[key].element)
    }

    /// Adds an element first in the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Removes the first element and returns it, or `None` if the sequence
    /// is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_front(&mut self) -> Option<T> {
        self.cursor_start_mut().remove()
    }

    /// Appends an element to the back of the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Removes the last element and returns it, or `None` if the sequence
    /// is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        let key = self.tail?;
        Some(self.detach_node(key))
    }

    /// Stack-style alias of [`push_back`](Sequence::push_back).
    #[inline]
    pub fn push(&mut self, elt: T) {
        self.push_back(elt);
    }

    /// Stack-style alias of [`pop_back`](Sequence::pop_back).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push(1);
    /// seq.push(2);
    /// assert_eq!(seq.pop(), Some(2));
    /// assert_eq!(seq.pop(), Some(1));
    /// assert_eq!(seq.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.pop_back()
    }

    /// Provides a cursor at the node with given index.
    ///
    /// By convention, the cursor is pointing to the ghost position if
    /// `at == len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.cursor(1).unwrap().current(), Some(&2));
    /// assert_eq!(seq.cursor(3).unwrap().current(), None);
    /// assert!(seq.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>> {
        let mut cursor = self.cursor_start();
        cursor.seek_to(at)?;
        Ok(cursor)
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the ghost position if the sequence is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// Provides a cursor at the ghost position.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None, self.len())
    }

    /// Provides a cursor with editing operations at the node with given index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_mut(1).unwrap();
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> Result<CursorMut<'_, T>> {
        let mut cursor = self.cursor_start_mut();
        cursor.seek_to(at)?;
        Ok(cursor)
    }

    /// Provides a cursor with editing operations at the first node.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front, 0)
    }

    /// Provides a cursor with editing operations at the ghost position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len();
        CursorMut::new(self, None, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from([0, 1, 2]);
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([0, 1, 2]);
    /// for element in seq.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(seq.to_vec(), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Inserts `elt` so that it becomes the element at position `at`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at > len`; the sequence is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// seq.insert_at(2, 4).unwrap();
    /// seq.insert_at(4, 5).unwrap();
    /// seq.insert_at(0, 0).unwrap();
    /// assert_eq!(seq.to_vec(), vec![0, 1, 2, 4, 3, 5]);
    /// assert!(seq.insert_at(7, 9).is_err());
    /// ```
    pub fn insert_at(&mut self, at: usize, elt: T) -> Result<()> {
        self.cursor_mut(at)?.insert(elt);
        Ok(())
    }

    /// Removes the element at position `at` and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([3, 2, 1]);
    /// assert_eq!(seq.remove_at(1), Ok(2));
    /// assert_eq!(seq.remove_at(0), Ok(3));
    /// assert!(seq.remove_at(1).is_err());
    /// assert_eq!(seq.remove_at(0), Ok(1));
    /// assert!(seq.is_empty());
    /// ```
    pub fn remove_at(&mut self, at: usize) -> Result<T> {
        let len = self.len();
        self.cursor_mut(at)?
            .remove()
            .ok_or(Error::IndexOutOfRange { index: at, len })
    }

    /// Returns a reference to the element at position `at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at >= len`.
    pub fn get(&self, at: usize) -> Result<&T> {
        let key = self.locate(at)?;
        Ok(&self.nodes[key].element)
    }

    /// Returns a mutable reference to the element at position `at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `at >= len`.
    pub fn get_mut(&mut self, at: usize) -> Result<&mut T> {
        let key = self.locate(at)?;
        Ok(&mut self.nodes[key].element)
    }

    /// Appends all `values` to the back, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.append(['a', 'b']);
    /// seq.append(vec!['c']);
    /// assert_eq!(seq.to_vec(), vec!['a', 'b', 'c']);
    /// ```
    pub fn append<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.extend(values);
    }

    /// Inserts all `values` at the front, keeping their given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([4, 5]);
    /// seq.prepend([1, 2, 3]);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn prepend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let mut cursor = self.cursor_start_mut();
        values.into_iter().for_each(|value| cursor.insert(value));
    }

    /// Exchanges the values at positions `i` and `j`. The nodes stay where
    /// they are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if either position is `>= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3, 4]);
    /// seq.swap(0, 3).unwrap();
    /// assert_eq!(seq.to_vec(), vec![4, 2, 3, 1]);
    /// ```
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let (a, b) = (self.locate(i)?, self.locate(j)?);
        if a == b {
            return Ok(());
        }
        if let Some((a, b)) = self.nodes.get2_mut(a, b) {
            std::mem::swap(&mut a.element, &mut b.element);
        }
        Ok(())
    }

    /// Reverses the whole sequence by relinking its nodes.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    pub fn reverse(&mut self) {
        let mut link = self.head;
        while let Some(key) = link {
            let node = &mut self.nodes[key];
            std::mem::swap(&mut node.next, &mut node.prev);
            link = node.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Reverses the values in positions `start..end`, swapping values from
    /// both ends inward until the two walks meet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if `end < start` or `end > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([0, 1, 2, 3, 4, 5]);
    /// seq.reverse_range(1, 5).unwrap();
    /// assert_eq!(seq.to_vec(), vec![0, 4, 3, 2, 1, 5]);
    /// ```
    pub fn reverse_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_range(start, end)?;
        if end - start < 2 {
            return Ok(());
        }
        let (mut front, mut back) = (self.locate(start)?, self.locate(end - 1)?);
        for _ in 0..(end - start) / 2 {
            if let Some((a, b)) = self.nodes.get2_mut(front, back) {
                std::mem::swap(&mut a.element, &mut b.element);
            }
            let (Some(next), Some(prev)) = (self.nodes[front].next, self.nodes[back].prev) else {
                break;
            };
            front = next;
            back = prev;
        }
        Ok(())
    }

    /// Moves the front element to the back. No-op if `len <= 1`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// seq.rotate_left();
    /// assert_eq!(seq.to_vec(), vec![2, 3, 1]);
    /// seq.rotate_right();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn rotate_left(&mut self) {
        if let Some(front) = self.head.filter(|_| self.len() > 1) {
            self.move_node(front, None);
        }
    }

    /// Moves the back element to the front. No-op if `len <= 1`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn rotate_right(&mut self) {
        if let Some(back) = self.tail.filter(|_| self.len() > 1) {
            let front = self.head;
            self.move_node(back, front);
        }
    }

    /// Returns a new sequence holding copies of the values in positions
    /// `start..end`. The comparator is inherited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if `end < start` or `end > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from([0, 1, 2, 3, 4]);
    /// assert_eq!(seq.sub_list(1, 4).unwrap().to_vec(), vec![1, 2, 3]);
    /// assert!(seq.sub_list(1, 4).unwrap().len() == 3);
    /// assert!(seq.sub_list(3, 2).is_err());
    /// ```
    pub fn sub_list(&self, start: usize, end: usize) -> Result<Sequence<T>>
    where
        T: Clone,
    {
        self.check_range(start, end)?;
        let front = self.cursor(start)?.current;
        let mut sub = Self::with_optional_comparator(self.comparator.clone());
        sub.extend(Iter::from_range(self, front, end - start).cloned());
        Ok(sub)
    }

    /// Appends a copy of every value of each sequence in `others`, in order.
    /// The sequences in `others` are not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1]);
    /// let (a, b) = (Sequence::from([2, 3]), Sequence::from([4]));
    /// seq.join([&a, &b]);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    /// assert_eq!(a.len(), 2);
    /// ```
    pub fn join<'s, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'s Sequence<T>>,
        T: Clone + 's,
    {
        for other in others {
            self.extend(other.iter().cloned());
        }
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `at >= len`.
    fn index(&self, at: usize) -> &T {
        match self.get(at) {
            Ok(element) => element,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, at: usize) -> &mut T {
        match self.get_mut(at) {
            Ok(element) => element,
            Err(err) => panic!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Sequence};
    use std::cell::RefCell;
    use std::fmt::Debug;

    fn seq_eq<T, I>(seq: &Sequence<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        seq.assert_links();
        assert_eq!(seq.to_vec(), Vec::from_iter(expected));
    }

    #[test]
    fn sequence_create() {
        let mut seq = Sequence::<i32>::new();
        assert!(seq.is_empty());
        seq.push_back(1);
        assert!(!seq.is_empty());
        assert_eq!(seq.pop_back(), Some(1));
        assert!(seq.is_empty());
        seq.assert_links();
    }

    #[test]
    fn sequence_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut seq = Sequence::new();
        seq.push_back(DropChecker::new(1, &dropped));
        seq.push_back(DropChecker::new(2, &dropped));
        seq.push_back(DropChecker::new(3, &dropped));
        let removed = seq.remove_at(1).unwrap();
        assert_eq!(removed.value, 2);
        assert!(dropped.borrow().is_empty());
        drop(removed);
        drop(seq);
        let mut dropped = dropped.into_inner();
        dropped.sort();
        assert_eq!(dropped, vec![1, 2, 3]);
    }

    #[test]
    fn sequence_push_and_pop() {
        let mut seq = Sequence::new();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.pop_back(), None);

        seq.push_back(1);
        assert_eq!(seq.back(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), None);
        assert!(seq.is_empty());

        seq.push_front(1);
        seq.push_front(2);
        seq.push_back(3);
        seq_eq(&seq, [2, 1, 3]);
        assert_eq!(seq.back(), Some(&3));
        assert_eq!(seq.front(), Some(&2));
        assert_eq!(seq.pop_front(), Some(2));
        assert_eq!(seq.pop_back(), Some(3));

        assert_eq!(seq.front(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        seq_eq(&seq, None);
    }

    #[test]
    fn sequence_insert_and_remove() {
        let mut seq = Sequence::from_iter(0..10);
        seq.insert_at(5, 10).unwrap();
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..10));

        assert_eq!(seq.remove_at(10), Ok(9));
        assert_eq!(seq.back(), Some(&8));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9));

        seq.insert_at(0, 11).unwrap();
        assert_eq!(seq.front(), Some(&11));
        seq_eq(&seq, Some(11).into_iter().chain(0..5).chain(Some(10)).chain(5..9));

        assert_eq!(seq.remove_at(0), Ok(11));
        assert_eq!(seq.front(), Some(&0));

        seq.insert_at(10, 12).unwrap();
        assert_eq!(seq.back(), Some(&12));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));
    }

    #[test]
    fn sequence_out_of_range() {
        let mut seq = Sequence::from([1, 2, 3]);
        assert_eq!(
            seq.remove_at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            seq.insert_at(4, 0),
            Err(Error::IndexOutOfRange { index: 4, len: 3 })
        );
        assert_eq!(seq.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
        assert!(seq.get_mut(7).is_err());
        assert!(seq.swap(0, 3).is_err());
        seq_eq(&seq, [1, 2, 3]);

        let mut empty = Sequence::<u8>::new();
        assert_eq!(
            empty.remove_at(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        );
        assert!(empty.get(0).is_err());
        seq_eq(&empty, None);
    }

    #[test]
    fn sequence_get_walks_from_both_ends() {
        let mut seq = Sequence::from_iter(0..9);
        for i in 0..9 {
            assert_eq!(seq.get(i), Ok(&i));
            assert_eq!(seq[i], i);
        }
        *seq.get_mut(7).unwrap() = 70;
        seq[1] = 10;
        seq_eq(&seq, [0, 10, 2, 3, 4, 5, 6, 70, 8]);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for a sequence of length 3")]
    fn sequence_index_panics() {
        let seq = Sequence::from([1, 2, 3]);
        let _ = seq[3];
    }

    #[test]
    fn sequence_append_prepend() {
        let mut seq = Sequence::new();
        seq.prepend([3, 4]);
        seq.prepend(Vec::new());
        seq.prepend([1, 2]);
        seq.append([5, 6]);
        seq_eq(&seq, 1..=6);
    }

    #[test]
    fn sequence_swap() {
        let mut seq = Sequence::from_iter(0..5);
        seq.swap(1, 3).unwrap();
        seq.swap(2, 2).unwrap();
        seq_eq(&seq, [0, 3, 2, 1, 4]);
        seq.swap(4, 0).unwrap();
        seq_eq(&seq, [4, 3, 2, 1, 0]);
    }

    #[test]
    fn sequence_swap_same_position() {
        let mut seq = Sequence::from([1, 2, 3]);
        seq.swap(1, 1).unwrap();
        seq_eq(&seq, [1, 2, 3]);
        let mut single = Sequence::from([7]);
        single.swap(0, 0).unwrap();
        seq_eq(&single, [7]);
        assert_eq!(
            seq.swap(3, 3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        seq.assert_links();
    }

    #[test]
    fn sequence_reverse() {
        let mut seq = Sequence::from_iter(0..6);
        seq.reverse();
        seq_eq(&seq, (0..6).rev());
        seq.reverse_range(0, 6).unwrap();
        seq_eq(&seq, 0..6);
        seq.reverse_range(1, 4).unwrap();
        seq_eq(&seq, [0, 3, 2, 1, 4, 5]);
        seq.reverse_range(2, 3).unwrap();
        seq.reverse_range(6, 6).unwrap();
        seq_eq(&seq, [0, 3, 2, 1, 4, 5]);
        assert_eq!(
            seq.reverse_range(4, 2),
            Err(Error::RangeOutOfBounds {
                start: 4,
                end: 2,
                len: 6
            })
        );
        assert!(seq.reverse_range(0, 7).is_err());

        let mut empty = Sequence::<i32>::new();
        empty.reverse();
        seq_eq(&empty, None);
    }

    #[test]
    fn sequence_rotate() {
        let mut seq = Sequence::from_iter(0..4);
        seq.rotate_left();
        seq_eq(&seq, [1, 2, 3, 0]);
        seq.rotate_right();
        seq.rotate_right();
        seq_eq(&seq, [3, 0, 1, 2]);

        let mut single = Sequence::from([7]);
        single.rotate_left();
        single.rotate_right();
        seq_eq(&single, [7]);

        let mut pair = Sequence::from([1, 2]);
        pair.rotate_right();
        seq_eq(&pair, [2, 1]);
    }

    #[test]
    fn sequence_sub_list_and_join() {
        let seq = Sequence::from_iter(0..6);
        seq_eq(&seq.sub_list(0, 6).unwrap(), 0..6);
        seq_eq(&seq.sub_list(2, 5).unwrap(), 2..5);
        seq_eq(&seq.sub_list(6, 6).unwrap(), None);
        assert!(seq.sub_list(0, 7).is_err());

        let mut joined = Sequence::new();
        joined.join([&seq.sub_list(0, 2).unwrap(), &Sequence::new(), &seq]);
        seq_eq(&joined, (0..2).chain(0..6));
        seq_eq(&seq, 0..6);
    }

    #[test]
    fn sequence_reuses_slots() {
        let mut seq = Sequence::new();
        for _ in 0..3 {
            seq.append(0..16);
            while seq.len() > 4 {
                seq.remove_at(seq.len() / 2).unwrap();
            }
            seq.assert_links();
            assert_eq!(seq.len(), 4);
            seq.clear();
            seq.assert_links();
        }
    }
}
