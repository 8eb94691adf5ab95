use crate::error::{report, Result, SequenceError};
use crate::sequence::{Link, Sequence};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `Sequence`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a sequence with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the "ghost" position. The
/// ghost position holds no element; it stands for both "one past the last"
/// and "one before the first" element.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost position
/// is denoted by `#`).
/// ```
/// use linked_sequence::Sequence;
///
/// // Create a sequence: [ A B C D #]
/// let sequence = Sequence::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = sequence.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#] (index = 4)
/// let mut cursor = sequence.cursor_end();
/// assert_eq!(cursor.current(), None);
///
/// // Move cursor backward: [ A B C|D #] (index = 3)
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // Create a cursor in the end and move forward: [ A B C D|#] (index = 4)
/// let mut cursor = sequence.cursor_end();
/// assert!(cursor.move_next().is_err());
/// // Move cursor forward, cyclically: [|A B C D #] (index = 0)
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link<T>,
    pub(crate) sequence: &'a Sequence<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Cursor::new(self.sequence, self.current, self.index)
    }
}

/// Compare cursors by their position.
///
/// Only cursors that belong to the same sequence and have the same position
/// are considered equal. Comparing with [`Sequence::cursor_end`] tells whether
/// a cursor reached the ghost position.
///
/// # Examples
/// ```
/// use linked_sequence::Sequence;
///
/// let sequence = Sequence::from([1, 2, 3]);
/// let cursor1 = sequence.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same sequence, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next_cyclic();
/// // The same sequence, but different positions.
/// assert_ne!(cursor1, cursor2);
///
/// let another = sequence.clone();
/// let cursor3 = another.cursor_start();
/// // Different sequences.
/// assert_ne!(cursor1, cursor3);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_sequence_with(other) && self.index == other.index
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by their position.
///
/// Only cursors of the same sequence can compare, so it is `PartialOrd`
/// but not `Ord`.
///
/// # Examples
/// ```
/// use linked_sequence::Sequence;
///
/// let sequence = Sequence::from([1, 2, 3]);
/// let cursor1 = sequence.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// cursor2.move_next_cyclic();
/// assert!(cursor1 < cursor2);
///
/// let another = sequence.clone();
/// let cursor3 = another.cursor_end();
/// assert_eq!(cursor1.partial_cmp(&cursor3), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_sequence_with(other) {
            return None;
        }
        Some(self.index.cmp(&other.index))
    }
}

/// A cursor over a `Sequence` with mutable access to the elements.
///
/// The lifetime of the references a `CursorMut` yields is tied to the cursor
/// itself rather than to the sequence, so it cannot hand out two mutable
/// references at once. It never changes the linking structure: insertion and
/// removal go through the [`Sequence`] methods, which cannot be called while
/// the cursor is alive.
///
/// [`CursorMut::view`] temporarily borrows the sequence immutably.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut sequence = Sequence::from([1, 2, 3]);
/// let mut cursor = sequence.cursor_start_mut();
/// sequence.push_back(4);
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link<T>,
    pub(crate) sequence: &'a mut Sequence<T>,
}

/// Borrow the element of `node` for an arbitrary lifetime.
///
/// It is unsafe because the caller must tie `'b` to a borrow of the sequence
/// owning `node`.
unsafe fn element<'b, T>(node: Link<T>) -> Option<&'b T> {
    node.map(|node| &(*node.as_ptr()).element)
}

unsafe fn element_mut<'b, T>(node: Link<T>) -> Option<&'b mut T> {
    node.map(|node| &mut (*node.as_ptr()).element)
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current.is_none()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.current.is_some() && self.current == self.sequence.head_node()
            }
            /// The following position, where the ghost position is followed by
            /// the first node.
            pub(crate) fn next_node(&self) -> Link<T> {
                match self.current {
                    // SAFETY: `current` is a node of the borrowed sequence.
                    Some(node) => unsafe { node.as_ref().next },
                    None => self.sequence.head_node(),
                }
            }
            /// The preceding position, where the ghost position is preceded by
            /// the last node.
            pub(crate) fn prev_node(&self) -> Link<T> {
                match self.current {
                    // SAFETY: `current` is a node of the borrowed sequence.
                    Some(node) => unsafe { node.as_ref().prev },
                    None => self.sequence.tail_node(),
                }
            }

            /// Move forward by given steps without checking whether the walk
            /// crosses the ghost position. Callers keep it within `0..=len`.
            fn seek_forward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_add(steps);
                (0..steps).for_each(|_| self.current = self.next_node());
            }

            /// Move backward by given steps without checking whether the walk
            /// crosses the ghost position. Callers keep it within `0..=len`.
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

            /// Returns the length of the `Sequence`. See [`Sequence::len`].
            pub fn len(&self) -> usize {
                self.sequence.len()
            }

            /// Returns `true` if the `Sequence` is empty. See [`Sequence::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.sequence.is_empty()
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost position is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_end();
            ///
            /// // The cursor is at the ghost position
            /// assert_eq!(cursor.peek_prev(), Some(&3));
            /// cursor.move_next_cyclic();
            ///
            /// // The cursor is now at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
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
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_start();
            ///
            /// cursor.move_prev_cyclic();
            /// // The cursor is now at the ghost position
            /// assert_eq!(cursor.current(), None);
            /// assert_eq!(cursor.index(), 3);
            /// ```
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_front_node() {
                    self.index = self.sequence.len();
                } else {
                    self.index -= 1;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error
            /// when it would pass the ghost position.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Errors
            ///
            /// [`SequenceError::InvalidPosition`] with `pos == len + 1` if the
            /// cursor is at the ghost position. The cursor stays put.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::{Sequence, SequenceError};
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_end();
            ///
            /// assert_eq!(
            ///     cursor.move_next(),
            ///     Err(SequenceError::InvalidPosition { pos: 4, len: 3 })
            /// );
            /// assert_eq!(cursor.peek_prev(), Some(&3));
            /// ```
            pub fn move_next(&mut self) -> Result<()> {
                if !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err(report(SequenceError::InvalidPosition {
                    pos: self.index + 1,
                    len: self.len(),
                }))
            }

            /// Move the cursor to the previous position, or return an error
            /// when it would pass the ghost position.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Errors
            ///
            /// [`SequenceError::InvalidPosition`] if the cursor is at the first
            /// node (or the sequence is empty). The reported `pos` is
            /// `usize::MAX`, the wrapped "one before 0". The cursor stays put.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_start();
            ///
            /// assert!(cursor.move_prev().is_err());
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<()> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err(report(SequenceError::InvalidPosition {
                    pos: self.index.wrapping_sub(1),
                    len: self.len(),
                }))
            }

            /// Move forward the cursor by given steps, or return an error
            /// when it would pass the ghost position.
            ///
            /// If an error occurs, the cursor stays at the ghost position.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_start();
            ///
            /// assert!(cursor.seek_forward(5).is_err());
            /// assert_eq!(cursor.index(), 3);
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<()> {
                (0..steps).try_for_each(|_| self.move_next())
            }

            /// Move backward the cursor by given steps, or return an error
            /// when it would pass the ghost position.
            ///
            /// If an error occurs, the cursor stays at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_backward(&mut self, steps: usize) -> Result<()> {
                (0..steps).try_for_each(|_| self.move_prev())
            }

            /// Move the cursor to the given position `target`, walking from
            /// whichever of the current position, the start or the end is
            /// closest.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Errors
            ///
            /// [`SequenceError::InvalidPosition`] if `target > len`. The cursor
            /// stays put.
            ///
            /// # Examples
            ///
            /// ```
            /// use linked_sequence::Sequence;
            ///
            /// let sequence = Sequence::from([1, 2, 3]);
            /// let mut cursor = sequence.cursor_start();
            ///
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_to(5).is_err());
            /// assert_eq!(cursor.current(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<()> {
                let len = self.sequence.len();
                if target > len {
                    return Err(report(SequenceError::InvalidPosition { pos: target, len }));
                }
                if target == self.index {
                    return Ok(());
                }
                match target {
                    0 => self.move_to_start(),
                    target if target == len => self.move_to_end(),
                    // current=c, target=t, ghost=#
                    target if target > self.index => {
                        if target - self.index <= len - target {
                            // [    c-->t     #]
                            self.seek_forward_fast(target - self.index);
                        } else {
                            // [ c     t<--#]
                            self.move_to_end();
                            self.seek_backward_fast(len - target);
                        }
                    }
                    target => {
                        if self.index - target <= target {
                            // [    t<--c     #]
                            self.seek_backward_fast(self.index - target);
                        } else {
                            // [-->t      c #]
                            self.move_to_start();
                            self.seek_forward_fast(target);
                        }
                    }
                }
                Ok(())
            }

            /// Set the cursor to the first node (the ghost position if the
            /// sequence is empty).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.sequence.head_node();
            }

            /// Set the cursor to the ghost position.
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.sequence.len();
                self.current = None;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("sequence", &self.sequence)
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
    pub(crate) fn new(sequence: &'a Sequence<T>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            sequence,
        }
    }

    fn same_sequence_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.sequence, other.sequence)
    }

    /// Return a reference to the element at the cursor, or `None` at the
    /// ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3]);
    /// assert_eq!(sequence.cursor(0).unwrap().current(), Some(&1));
    /// assert_eq!(sequence.cursor(2).unwrap().current(), Some(&3));
    /// assert_eq!(sequence.cursor(3).unwrap().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: the node belongs to the sequence borrowed for `'a`.
        unsafe { element(self.current) }
    }

    /// Return a reference to the element at the next position. At the ghost
    /// position this is the first element; at the last node it is `None`.
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: the node belongs to the sequence borrowed for `'a`.
        unsafe { element(self.next_node()) }
    }

    /// Return a reference to the element at the previous position. At the
    /// ghost position this is the last element; at the first node it is
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3]);
    /// assert_eq!(sequence.cursor(0).unwrap().peek_prev(), None);
    /// assert_eq!(sequence.cursor(1).unwrap().peek_prev(), Some(&1));
    /// assert_eq!(sequence.cursor(3).unwrap().peek_prev(), Some(&3));
    /// ```
    pub fn peek_prev(&self) -> Option<&'a T> {
        // SAFETY: the node belongs to the sequence borrowed for `'a`.
        unsafe { element(self.prev_node()) }
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut Sequence<T>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            sequence,
        }
    }

    /// Unlink and return the element at the cursor, leaving the cursor at the
    /// successor (which now has the same index). Does nothing at the ghost
    /// position.
    pub(crate) fn remove_current(&mut self) -> Option<T> {
        let node = self.current?;
        self.current = self.next_node();
        // SAFETY: `node` is a node of the borrowed sequence.
        Some(unsafe { self.sequence.detach_node(node) }.into_element())
    }
}

// Methods that do not change the linking structure of the sequence.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return a reference to the element at the cursor, or `None` at the
    /// ghost position.
    pub fn current(&self) -> Option<&T> {
        // SAFETY: the node belongs to the sequence, borrowed through `self`.
        unsafe { element(self.current) }
    }

    /// See [`Cursor::peek_next`].
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: the node belongs to the sequence, borrowed through `self`.
        unsafe { element(self.next_node()) }
    }

    /// See [`Cursor::peek_prev`].
    pub fn peek_prev(&self) -> Option<&T> {
        // SAFETY: the node belongs to the sequence, borrowed through `self`.
        unsafe { element(self.prev_node()) }
    }

    /// Return a mutable reference to the element at the cursor, or `None` at
    /// the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3]);
    ///
    /// let mut cursor = sequence.cursor_mut(0).unwrap();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // The ghost position holds no element.
    /// assert!(sequence.cursor_mut(3).unwrap().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the node belongs to the sequence, borrowed mutably through
        // `self`.
        unsafe { element_mut(self.current) }
    }

    /// See [`Cursor::peek_next`].
    pub fn peek_next_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the node belongs to the sequence, borrowed mutably through
        // `self`.
        unsafe { element_mut(self.next_node()) }
    }

    /// See [`Cursor::peek_prev`].
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3]);
    ///
    /// let mut cursor = sequence.cursor_end_mut();
    /// *cursor.peek_prev_mut().unwrap() *= 5;
    /// assert_eq!(cursor.peek_prev(), Some(&15));
    /// ```
    pub fn peek_prev_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the node belongs to the sequence, borrowed mutably through
        // `self`.
        unsafe { element_mut(self.prev_node()) }
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.sequence, self.current, self.index)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        let CursorMut {
            index,
            current,
            sequence,
        } = self;
        Cursor::new(sequence, current, index)
    }

    /// Temporarily view the sequence via an immutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3]);
    /// let mut cursor = sequence.cursor_start_mut();
    ///
    /// assert_eq!(cursor.view().back(), Ok(&3));
    /// *cursor.current_mut().unwrap() = 4;
    /// assert_eq!(Vec::from_iter(sequence), vec![4, 2, 3]);
    /// ```
    pub fn view(&self) -> &Sequence<T> {
        self.sequence
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
