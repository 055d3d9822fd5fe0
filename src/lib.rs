//! This crate provides a generic doubly-linked sequence whose nodes live in a
//! slab arena.
//!
//! The [`Sequence`] allows inserting and removing elements at a located
//! position in constant time. In compromise, locating a position takes
//! *O*(*n*) time, walking from whichever end is closer.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut seq = Sequence::from([1, 2, 3, 4]);
//!
//! let mut cursor = seq.cursor_start_mut();
//!
//! cursor.insert(0); // insert 0 at the beginning of the sequence
//! assert_eq!(cursor.current(), Some(&1));
//! assert_eq!(cursor.view(), &Sequence::from([0, 1, 2, 3, 4]));
//!
//! cursor.seek_to(3).unwrap(); // move the cursor to position 3, and removes it.
//! assert_eq!(cursor.remove(), Some(3));
//! assert_eq!(cursor.view(), &Sequence::from([0, 1, 2, 4]));
//!
//! seq.insert_at(0, 5).unwrap(); // positional editing is also allowed
//! assert_eq!(seq.to_string(), "[5 0 1 2 4]");
//! ```
//!
//! # Memory Layout
//!
//! The nodes are stored in a [`slab::Slab`] and refer to each other by key:
//! ```text
//!             slab key:      0             3             1
//!                      ╔═══════════╗ ╔═══════════╗ ╔═══════════╗
//!            None ←─── ║   prev    ║ ║   prev    ║ ║   prev    ║
//!                      ╟───────────╢ ╟───────────╢ ╟───────────╢
//!                      ║   next    ║→║   next    ║→║   next    ║ ───→ None
//!                      ╟───────────╢ ╟───────────╢ ╟───────────╢
//!                      ║ payload T ║ ║ payload T ║ ║ payload T ║
//!                      ╚═══════════╝ ╚═══════════╝ ╚═══════════╝
//!                         index 0       index 1       index 2
//!                            ↑                           ↑
//!                   head ────┘                  tail ────┘
//! ```
//! The `Sequence` contains:
//! - the arena of nodes. Freed slots are reused by later insertions, and the
//!   length is the number of live slots;
//! - `head` and `tail`, the keys of the first and last node. Together they
//!   act as the *ghost* position: a `None` link means "the boundary";
//! - an optional [`Comparator`] for ordered operations.
//!
//! In convention, in a sequence with length *n*, the nodes are indexed by 0,
//! 1, ..., *n* - 1, and the ghost position is always indexed by *n*.
//!
//! # Iteration
//!
//! Iterating over a sequence is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended, exact-size iterators and iterate the sequence like
//! an array (fused and non-cyclic). [`IterMut`] provides mutability of the
//! elements (but not the linked structure of the sequence).
//!
//! ## Examples
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut seq = Sequence::from([1, 2, 3]);
//! let mut iter = seq.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! seq.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(seq), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] move forward or backward over the
//! sequence. In a sequence with length *n*, there are *n* + 1 valid locations
//! for the cursor, indexed by 0, 1, ..., *n*, where *n* is the ghost position.
//! [`CursorMut`] can also [`insert`] before and [`remove`] at its position.
//!
//! # Ordering
//!
//! A [`Comparator`] configured on the sequence drives [`Sequence::sort`]
//! (a stable merge sort that relinks nodes) and [`Sequence::insert_sorted`].
//! Operations that need one fail with [`Error::MissingComparator`] when none
//! is set. [`SortedSequence`] keeps its values ordered at all times.
#![cfg_attr(
    feature = "heap",
    doc = "The [`heap`] adapter orders a sequence through the same comparator."
)]
//!
//! ```
//! use linked_sequence::{Comparator, Sequence};
//!
//! let mut seq = Sequence::generate(5, |i| i + 1, Some(Comparator::natural()));
//! seq.reverse();
//! seq.sort().unwrap();
//! assert_eq!(seq.reduce(|acc, x| acc + x), Ok(15));
//! assert_eq!(seq.filter(|x| x % 2 == 0).to_vec(), vec![2, 4]);
//! assert_eq!(seq.map(|x| x * x).to_vec(), vec![1, 4, 9, 16, 25]);
//! ```
//!
//! # Features
//!
//! - `heap` (default): binary-heap routines over a sequence.
#![cfg_attr(
    feature = "heap",
    doc = "  See the [`heap`] module and [`Sequence::heap_view`]."
)]
//!
//! [`Cursor`]: crate::sequence::cursor::Cursor
//! [`CursorMut`]: crate::sequence::cursor::CursorMut
//! [`insert`]: crate::sequence::cursor::CursorMut::insert
//! [`remove`]: crate::sequence::cursor::CursorMut::remove

#[doc(inline)]
pub use compare::Comparator;
#[doc(inline)]
pub use error::{Error, Result};
#[cfg(feature = "heap")]
#[doc(inline)]
pub use heap::HeapView;
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::Sequence;
#[doc(inline)]
pub use sorted::SortedSequence;

pub mod compare;
#[cfg(feature = "heap")]
pub mod heap;
pub mod sequence;
pub mod sorted;

mod error;
