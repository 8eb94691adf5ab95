//! This crate provides a doubly-linked sequence container with owned nodes,
//! anchored by a head and a tail.
//!
//! The [`Sequence`] inserts and removes elements at either end in constant
//! time, and by position or by value in *O*(*n*) time. Every operation that
//! can fail returns a [`Result`] with a [`SequenceError`], reports the error
//! to the diagnostics sink (see [Diagnostics](#diagnostics)) and leaves the
//! sequence exactly as it was.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use linked_sequence::{Sequence, SequenceError};
//!
//! let mut sequence = Sequence::from([1, 2, 3, 4, 5, 5, 1, 2, 3]);
//!
//! assert_eq!(sequence.pop_value(&2), Ok(2)); // every `2` is gone
//! assert_eq!(sequence.to_string(), "1 3 4 5 5 1 3");
//!
//! sequence.push_at(1, 9).unwrap(); // splice in before position 1
//! assert_eq!(sequence.at(1), Ok(&9));
//!
//! assert_eq!(sequence.pop_duplicates(), Ok(3)); // sort, then collapse runs
//! assert_eq!(sequence, Sequence::from([1, 3, 4, 5, 9]));
//!
//! assert_eq!(
//!     sequence.at(5),
//!     Err(SequenceError::InvalidPosition { pos: 5, len: 5 })
//! );
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the sequence is like the following graph:
//! ```text
//!                       Node 0                  Node 1                  Node N-1
//!                   ╔═══════════╗           ╔═══════════╗           ╔═══════════╗
//!         None ←─── ║   prev    ║ ←──────── ║   prev    ║ ←┄┄┄┄┄┄┄─ ║   prev    ║
//!                   ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                   ║   next    ║ ════════⇒ ║   next    ║ ═┄┄┄┄┄┄┄⇒ ║   next    ║ ───→ None
//!                   ╟───────────╢           ╟───────────╢           ╟───────────╢
//!                   ║ payload T ║           ║ payload T ║           ║ payload T ║
//!                   ╚═══════════╝           ╚═══════════╝           ╚═══════════╝
//!                         ⇑                                               ↑
//! ╔═══════════╗           ║                                               │
//! ║   head    ║ ══════════╝                                               │
//! ╟───────────╢                                                           │
//! ║   tail    ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!    Sequence
//! ```
//! (`═⇒` owns, `─→` merely refers.)
//!
//! The `Sequence` contains:
//! - `head`, which owns the first node;
//! - `tail`, which refers to the last node;
//! - `len`, the number of nodes.
//!
//! Each node of the sequence `Sequence<T>` is allocated on heap, which contains:
//! - the `next` pointer that owns the next node (or nothing for the last one);
//! - the `prev` pointer that refers back to the previous node (or nothing for the
//!   first one). It is never used to release a node;
//! - the payload `T`.
//!
//! In convention, in a sequence with length *n*, the nodes are indexed by 0, 1,
//! ..., *n* - 1. Positional operations walk from whichever end is closer.
//!
//! # Iteration
//!
//! Iterating over a sequence is by the [`Iter`] and [`IterMut`] iterators. These
//! are double-ended, exact-size and fused. [`IterMut`] provides mutability of the
//! elements (but not the linked structure of the sequence).
//!
//! ## Examples
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut sequence = Sequence::from([1, 2, 3]);
//! let mut iter = sequence.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused
//!
//! sequence.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(sequence), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] move forward or
//! backward over a sequence. In a sequence with length *n*, there are *n* + 1
//! valid locations for a cursor, indexed by 0, 1, ..., *n*, where *n* is the
//! "ghost" position that holds no element.
//!
//! A cursor borrows its sequence, so the sequence cannot be relinked while the
//! cursor is alive.
//!
//! ```
//! use linked_sequence::Sequence;
//!
//! let mut sequence = Sequence::from(['a', 'b', 'c']);
//!
//! let mut cursor = sequence.cursor_start_mut();
//! while cursor.as_cursor() != cursor.view().cursor_end() {
//!     if let Some(c) = cursor.current_mut() {
//!         *c = c.to_ascii_uppercase();
//!     }
//!     cursor.move_next_cyclic();
//! }
//! assert_eq!(sequence.to_string(), "A B C");
//! ```
//!
//! # Diagnostics
//!
//! With the default `diagnostics` feature, every failed operation emits one
//! `WARN` event through [`tracing`](https://docs.rs/tracing) with target
//! `linked_sequence`. Install any subscriber to see them:
//! ```text
//! [dependencies]
//! linked_sequence = { version = "0.1", default-features = false } # returns errors silently
//! ```

#[doc(inline)]
pub use error::{Result, SequenceError};
#[doc(inline)]
pub use sequence::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::Sequence;

pub mod sequence;

mod error;
