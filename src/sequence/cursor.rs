use crate::sequence::{Link, Sequence};
use crate::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `Sequence`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a sequence with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the ghost position.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost position
/// is denoted by `#`).
/// ```
/// use linked_sequence::Sequence;
///
/// // Create a sequence: [ A B C D #]
/// let seq = Sequence::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = seq.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#] (index = 4)
/// let mut cursor = seq.cursor_end();
/// assert_eq!(cursor.current(), None);
///
/// // Move cursor backward: [ A B C|D #] (index = 3)
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // Move cursor forward, cyclically: [|A B C D #] (index = 0)
/// let mut cursor = seq.cursor_end();
/// assert!(cursor.move_next().is_err());
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link,
    pub(crate) list: &'a Sequence<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same sequence and have the same positions
/// are considered equal.
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by its position.
///
/// Only cursors belong to the same sequence can compare, so it is
/// `PartialOrd` but not `Ord`.
///
/// # Examples
/// ```
/// use linked_sequence::Sequence;
///
/// let seq = Sequence::from([1, 2, 3]);
/// let cursor1 = seq.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// cursor2.move_next_cyclic();
/// assert!(cursor1 < cursor2);
///
/// let another = seq.clone();
/// assert_eq!(cursor1.partial_cmp(&another.cursor_end()), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_list_with(other) {
            return None;
        }
        Some(self.index().cmp(&other.index()))
    }
}

/// A cursor over a `Sequence` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely mutate the sequence during iteration. The
/// lifetime of its yielded references is tied to its own lifetime, so it
/// cannot yield multiple elements at once.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut cursor = seq.cursor_start_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link,
    pub(crate) list: &'a mut Sequence<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current.is_none()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node().is_none()
            }
            pub(crate) fn next_node(&self) -> Link {
                self.list.next_of(self.current)
            }
            pub(crate) fn prev_node(&self) -> Link {
                self.list.prev_of(self.current)
            }

            /// Move forward the cursor by given steps, without checking whether
            /// it will pass through the ghost position.
            fn seek_forward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_add(steps);
                (0..steps).for_each(|_| self.current = self.next_node());
            }

            /// Move backward the cursor by given steps, without checking whether
            /// it will pass through the ghost position.
            fn seek_backward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_sub(steps);
                (0..steps).for_each(|_| self.current = self.prev_node());
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the index of the cursor
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `Sequence` is empty.
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost position is allowed.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_ghost_node() {
                    self.index = 0;
                } else {
                    self.index += 1;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost position is allowed.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_front_node() {
                    self.index = self.list.len();
                } else {
                    self.index -= 1;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error
            /// when passing through the ghost position is happened.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across ghost boundary")
            }

            /// Move the cursor to the previous position, or return an error
            /// when passing through the ghost position is happened.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across ghost boundary")
            }

            /// Move forward the cursor by given steps, or return the number of
            /// steps taken when passing through the ghost position is happened.
            ///
            /// If an error occurs, the cursor will stay at the ghost position.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Move backward the cursor by given steps, or return the number of
            /// steps taken when passing through the ghost position is happened.
            ///
            /// If an error occurs, the cursor will stay at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| i))
            }

            /// Move the cursor to the given position `target`, walking from
            /// whichever of the start, the cursor and the end is closest.
            ///
            /// If an error occurs, the cursor will stay put.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Errors
            ///
            /// Returns [`Error::IndexOutOfRange`] when `target > len`.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_start();
            ///
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_to(5).is_err());
            /// assert_eq!(cursor.current(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<()> {
                if target == self.index {
                    return Ok(());
                }
                let len = self.list.len();
                match target {
                    target if target > len => {
                        return Err(Error::IndexOutOfRange { index: target, len })
                    }
                    0 => self.move_to_start(),
                    target if target == len => self.move_to_end(),
                    // current=c, target=t, ghost=#
                    target if target > self.index => {
                        // target is at the right side of current: [   c----->t   #]
                        if target - self.index <= len - target {
                            // target is near the right side of current: [    c-->t     #]
                            self.seek_forward_fast(target - self.index);
                        } else {
                            // target is far from the right side of current: [ c     t<--#]
                            self.move_to_end();
                            self.seek_backward_fast(len - target);
                        }
                    }
                    _ => {
                        // target is at the left side of current: [   t<-----c   #]
                        if self.index - target <= target {
                            // target is near the left side of current: [    t<--c     #]
                            self.seek_backward_fast(self.index - target);
                        } else {
                            // target is far from the left side of current: [-->t      c #]
                            self.move_to_start();
                            self.seek_forward_fast(target);
                        }
                    }
                }
                Ok(())
            }

            /// Set the cursor to the start of the sequence (i.e. the first node).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the sequence (i.e. the ghost position).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = None;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a Sequence<T>, current: Link, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.cursor(0).unwrap().current(), Some(&1));
    /// assert_eq!(seq.cursor(2).unwrap().current(), Some(&3));
    /// assert_eq!(seq.cursor(3).unwrap().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        let list = self.list;
        self.current.map(|key| &list.nodes[key].element)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.cursor(0).unwrap().previous(), None);
    /// assert_eq!(seq.cursor(1).unwrap().previous(), Some(&1));
    /// assert_eq!(seq.cursor(3).unwrap().previous(), Some(&3));
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        let list = self.list;
        self.prev_node().map(|key| &list.nodes[key].element)
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut Sequence<T>, current: Link, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }
}

// Methods that does not change the linking structure of the sequence.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    pub fn current(&self) -> Option<&T> {
        self.current.map(|key| &self.list.nodes[key].element)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous(&self) -> Option<&T> {
        self.prev_node().map(|key| &self.list.nodes[key].element)
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_mut(0).unwrap();
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// cursor.move_to_end();
    /// assert_eq!(cursor.current_mut(), None);
    /// assert_eq!(seq.to_vec(), vec![5, 2, 3]);
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let key = self.current?;
        Some(&mut self.list.nodes[key].element)
    }

    /// Return a mutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        let key = self.prev_node()?;
        Some(&mut self.list.nodes[key].element)
    }

    /// Create a read-only cursor at the same position, borrowing from this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Temporarily view the whole sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_start_mut();
    /// cursor.insert(0);
    /// assert_eq!(cursor.view().to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &Sequence<T> {
        self.list
    }
}

// Methods that change the linking structure of the sequence.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Insert a new element before the cursor. After insertion, the cursor
    /// still points to the same node, whose index becomes `index + 1`.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_mut(1).unwrap();
    ///
    /// cursor.insert(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.index(), 2);
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(seq.to_vec(), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) {
        let prev = self.prev_node();
        self.list.attach_node(prev, self.current, item);
        self.index += 1;
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost position. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut seq = Sequence::from_iter(0..10);
    /// let mut cursor = seq.cursor_mut(5).unwrap();
    ///
    /// assert_eq!(cursor.remove(), Some(5));
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    ///
    /// assert_eq!(seq.to_vec(), vec![0, 1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        let key = self.current?;
        self.current = self.next_node();
        Some(self.list.detach_node(key))
    }
}
