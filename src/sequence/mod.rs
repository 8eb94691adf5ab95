use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{report, Result, SequenceError};
use crate::sequence::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod output;

/// The `Sequence` is a doubly-linked list with owned nodes, anchored by a
/// `head` and a `tail` pointer.
///
/// Inserting and removing at either end takes constant time; positional and
/// value-keyed operations walk the chain and take *O*(*n*) time.
///
/// The `Sequence` contains:
/// - `head`, the owning link to the first node;
/// - `tail`, a non-owning alias of the last node (already owned through the
///   forward chain);
/// - `len`, the cached number of nodes.
///
/// # Ownership
///
/// Ownership flows strictly forward: the sequence owns the first node and
/// every node owns its `next`. The `prev` link of a node is a plain
/// back-reference and is never used to release a node, so the chain never
/// contains an ownership cycle.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of nodes, both inclusive;
/// - `None` in place of a node stands for the boundary before the first
///   node or after the last one.
pub struct Sequence<T> {
    head: Link<T>,
    tail: Link<T>,
    /// the number of nodes reachable from `head`
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

pub(crate) struct Node<T> {
    /// owning link to the following node
    pub(crate) next: Link<T>,
    /// back-reference to the preceding node
    pub(crate) prev: Link<T>,
    pub(crate) element: T,
}

/// Nodes fragment detached from a sequence, used in splitting and
/// appending.
///
/// When detached from a sequence, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> Sequence<T> {
    pub(crate) fn head_node(&self) -> Link<T> {
        self.head
    }
    pub(crate) fn tail_node(&self) -> Link<T> {
        self.tail
    }

    /// Make `prev` and `next` neighbours. A `None` side is the boundary of the
    /// sequence, in which case the matching anchor is updated instead.
    unsafe fn connect(&mut self, prev: Link<T>, next: Link<T>) {
        match prev {
            Some(mut prev) => prev.as_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(mut next) => next.as_mut().prev = prev,
            None => self.tail = prev,
        }
    }

    /// Detach a single node `node` from the sequence, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the
    /// sequence.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        self.len -= 1;
        let mut node = Box::from_raw(node.as_ptr());
        self.connect(node.prev, node.next);
        node.prev = None;
        node.next = None;
        node
    }

    /// Attach a single node `node` to the sequence, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the sequence, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(&mut self, prev: Link<T>, next: Link<T>, node: NonNull<Node<T>>) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, Some(node));
        self.connect(Some(node), next);
        self.len += 1;
    }

    /// Detach a range of nodes `front..=back` holding `len` nodes, and return
    /// the detached nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a
    /// valid range of the sequence, or whether `len` is its length.
    unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        len: usize,
    ) -> DetachedNodes<T> {
        self.len -= len;
        self.connect(front.as_ref().prev, back.as_ref().next);
        DetachedNodes::new(front, back, len)
    }

    /// Attach a range of detached nodes to the sequence, between `prev` and
    /// `next`.
    ///
    /// It is unsafe for the same reasons as [`Sequence::attach_node`].
    unsafe fn attach_nodes(&mut self, prev: Link<T>, next: Link<T>, detached: DetachedNodes<T>) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.connect(prev, Some(detached.front));
        self.connect(Some(detached.back), next);
        self.len += detached.len;
    }

    /// Detach all nodes, or return `None` if the sequence is empty.
    fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        let (front, back) = (self.head?, self.tail?);
        // SAFETY: `head..=tail` is the whole chain and `len` is its length.
        Some(unsafe { self.detach_nodes(front, back, self.len) })
    }

    fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut sequence = Sequence::new();
        // SAFETY: both boundaries of an empty sequence are adjacent.
        unsafe { sequence.attach_nodes(None, None, detached) };
        sequence
    }

    /// Splice a new node holding `element` right before `next`, where `None`
    /// means after the last node.
    unsafe fn insert_before(&mut self, next: Link<T>, element: T) {
        let prev = match next {
            Some(next) => next.as_ref().prev,
            None => self.tail,
        };
        self.attach_node(prev, next, Node::new_detached(element));
    }

    /// Splice a new node holding `element` right after `prev`, where `None`
    /// means before the first node.
    unsafe fn insert_after(&mut self, prev: Link<T>, element: T) {
        let next = match prev {
            Some(prev) => prev.as_ref().next,
            None => self.head,
        };
        self.attach_node(prev, next, Node::new_detached(element));
    }

    pub(crate) fn take_front_node(&mut self) -> Option<Box<Node<T>>> {
        let head = self.head?;
        // SAFETY: `head` is a node of this sequence.
        Some(unsafe { self.detach_node(head) })
    }

    pub(crate) fn take_back_node(&mut self) -> Option<Box<Node<T>>> {
        let tail = self.tail?;
        // SAFETY: `tail` is a node of this sequence.
        Some(unsafe { self.detach_node(tail) })
    }

    /// Walk to the node at `pos`, starting from the closer end.
    pub(crate) fn node_at(&self, pos: usize) -> Link<T> {
        if pos >= self.len {
            return None;
        }
        // SAFETY: `pos < len`, so every step stays inside the chain.
        unsafe {
            if pos <= self.len / 2 {
                let mut node = self.head?;
                for _ in 0..pos {
                    node = node.as_ref().next?;
                }
                Some(node)
            } else {
                let mut node = self.tail?;
                for _ in pos + 1..self.len {
                    node = node.as_ref().prev?;
                }
                Some(node)
            }
        }
    }

    /// The first node holding a value equal to `value`.
    fn find_node(&self, value: &T) -> Link<T>
    where
        T: PartialEq,
    {
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: `current` is either `head` or the `next` of a node of this
            // sequence.
            let node_ref = unsafe { node.as_ref() };
            if node_ref.element == *value {
                return Some(node);
            }
            current = node_ref.next;
        }
        None
    }

    /// Like [`Sequence::find_node`], but reports `Empty` or `NotFound`.
    fn find_anchor(&self, anchor: &T) -> Result<NonNull<Node<T>>>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        self.find_node(anchor)
            .ok_or_else(|| report(SequenceError::NotFound))
    }

    fn invalid_position(&self, pos: usize) -> SequenceError {
        report(SequenceError::InvalidPosition { pos, len: self.len })
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Link<T>, next: Link<T>) {
        unsafe {
            match prev {
                Some(prev) => assert_eq!(prev.as_ref().next, next),
                None => assert_eq!(self.head, next),
            }
            match next {
                Some(next) => assert_eq!(next.as_ref().prev, prev),
                None => assert_eq!(self.tail, prev),
            }
        }
    }

    /// Walk the whole chain and check the structural invariants: the anchors
    /// agree with `len`, every back-reference mirrors its forward link, and
    /// the forward chain is acyclic and holds exactly `len` nodes.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.head.is_none(), self.tail.is_none());
        let mut count = 0;
        let mut prev: Link<T> = None;
        let mut current = self.head;
        while let Some(node) = current {
            let node_ref = unsafe { node.as_ref() };
            assert_eq!(node_ref.prev, prev, "broken back-reference at {}", count);
            count += 1;
            assert!(count <= self.len, "forward chain is longer than len");
            prev = current;
            current = node_ref.next;
        }
        assert_eq!(count, self.len);
        assert_eq!(self.tail, prev);
    }
}

impl<T> Sequence<T> {
    /// Create an empty `Sequence`
    ///
    /// # Examples
    /// ```
    /// use linked_sequence::Sequence;
    /// let sequence: Sequence<u32> = Sequence::new();
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `Sequence` is empty.
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
    /// let mut sequence = Sequence::new();
    /// assert!(sequence.is_empty());
    ///
    /// sequence.push_front("foo");
    /// assert!(!sequence.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the `Sequence`.
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
    /// let mut sequence = Sequence::new();
    ///
    /// sequence.push_front(2);
    /// assert_eq!(sequence.len(), 1);
    ///
    /// sequence.push_back(3);
    /// assert_eq!(sequence.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `Sequence`.
    ///
    /// Clearing an empty sequence does nothing.
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
    /// let mut sequence = Sequence::from([1, 2]);
    /// sequence.clear();
    /// assert_eq!(sequence.len(), 0);
    /// assert!(sequence.front().is_err());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        while self.take_front_node().is_some() {}
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.front(), Err(SequenceError::Empty));
    ///
    /// sequence.push_front(1);
    /// assert_eq!(sequence.front(), Ok(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.cursor_start()
            .current()
            .ok_or_else(|| report(SequenceError::Empty))
    }

    /// Provides a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    pub fn front_mut(&mut self) -> Result<&mut T> {
        match self.head {
            // SAFETY: `head` is a node owned by this sequence, which is borrowed
            // mutably for the lifetime of the returned reference.
            Some(mut head) => Ok(unsafe { &mut head.as_mut().element }),
            None => Err(report(SequenceError::Empty)),
        }
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.back(), Err(SequenceError::Empty));
    ///
    /// sequence.push_back(1);
    /// assert_eq!(sequence.back(), Ok(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Result<&T> {
        self.cursor_end()
            .peek_prev()
            .ok_or_else(|| report(SequenceError::Empty))
    }

    /// Provides a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.tail {
            // SAFETY: `tail` is a node owned by this sequence, which is borrowed
            // mutably for the lifetime of the returned reference.
            Some(mut tail) => Ok(unsafe { &mut tail.as_mut().element }),
            None => Err(report(SequenceError::Empty)),
        }
    }

    /// Provides a reference to the element at position `pos`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] unless `pos < len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let sequence = Sequence::from([10, 20, 30]);
    /// assert_eq!(sequence.at(1), Ok(&20));
    /// assert_eq!(
    ///     sequence.at(3),
    ///     Err(SequenceError::InvalidPosition { pos: 3, len: 3 })
    /// );
    /// ```
    pub fn at(&self, pos: usize) -> Result<&T> {
        self.node_at(pos)
            // SAFETY: the node belongs to this sequence, which outlives the
            // returned reference.
            .map(|node| unsafe { &(*node.as_ptr()).element })
            .ok_or_else(|| self.invalid_position(pos))
    }

    /// Provides a mutable reference to the element at position `pos`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] unless `pos < len`.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        match self.node_at(pos) {
            // SAFETY: the node belongs to this sequence, which is borrowed
            // mutably for the lifetime of the returned reference.
            Some(mut node) => Ok(unsafe { &mut node.as_mut().element }),
            None => Err(self.invalid_position(pos)),
        }
    }

    /// Adds an element first in the sequence.
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
    /// let mut sequence = Sequence::new();
    ///
    /// sequence.push_front(2);
    /// assert_eq!(sequence.front(), Ok(&2));
    ///
    /// sequence.push_front(1);
    /// assert_eq!(sequence.front(), Ok(&1));
    /// ```
    pub fn push_front(&mut self, element: T) {
        // SAFETY: the boundary before the first node and the first node are
        // adjacent.
        unsafe { self.insert_before(self.head, element) }
    }

    /// Appends an element to the back of the sequence.
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
    /// let mut sequence = Sequence::new();
    /// sequence.push_back(1);
    /// sequence.push_back(3);
    /// assert_eq!(sequence.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, element: T) {
        // SAFETY: the last node and the boundary after it are adjacent.
        unsafe { self.insert_after(self.tail, element) }
    }

    /// Prepends every element of `iter` in turn, so the last one yielded ends
    /// up at the front.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the number
    /// of elements yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([4, 5]);
    /// sequence.extend_front([3, 2, 1]);
    /// assert_eq!(sequence, Sequence::from([1, 2, 3, 4, 5]));
    /// ```
    pub fn extend_front<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|element| self.push_front(element));
    }

    /// Inserts an element at position `pos`.
    ///
    /// Exactly one of three things happens: at position 0 the element becomes
    /// the new front; at the last position (`len - 1`) it is appended as the
    /// new back; anywhere in between it is spliced in before the element
    /// currently at `pos`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] unless `pos < len`. An empty
    /// sequence has no valid position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([10, 20, 30]);
    /// sequence.push_at(1, 99).unwrap();
    /// assert_eq!(sequence, Sequence::from([10, 99, 20, 30]));
    ///
    /// // the last position appends
    /// sequence.push_at(3, 40).unwrap();
    /// assert_eq!(sequence, Sequence::from([10, 99, 20, 30, 40]));
    /// ```
    pub fn push_at(&mut self, pos: usize, element: T) -> Result<()> {
        match pos {
            pos if pos >= self.len => return Err(self.invalid_position(pos)),
            0 => self.push_front(element),
            pos if pos == self.len - 1 => self.push_back(element),
            pos => {
                let next = self.node_at(pos);
                // SAFETY: `next` is an inner node of this sequence.
                unsafe { self.insert_before(next, element) }
            }
        }
        Ok(())
    }

    /// Inserts an element right after the element at position `pos`.
    ///
    /// Position 0 delegates to [`Sequence::push_front`] and the last position
    /// to [`Sequence::push_back`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] unless `pos < len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([10, 20, 30]);
    /// sequence.push_after_node(1, 25).unwrap();
    /// sequence.push_after_node(3, 35).unwrap();
    /// sequence.push_after_node(0, 5).unwrap();
    /// assert_eq!(sequence, Sequence::from([5, 10, 20, 25, 30, 35]));
    /// ```
    pub fn push_after_node(&mut self, pos: usize, element: T) -> Result<()> {
        match pos {
            pos if pos >= self.len => return Err(self.invalid_position(pos)),
            0 => self.push_front(element),
            pos if pos == self.len - 1 => self.push_back(element),
            pos => {
                let prev = self.node_at(pos);
                // SAFETY: `prev` is a node of this sequence with a successor.
                unsafe { self.insert_after(prev, element) }
            }
        }
        Ok(())
    }

    /// Inserts an element right after the first element equal to `anchor`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] on an empty sequence,
    /// [`SequenceError::NotFound`] if no element equals `anchor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from(['a', 'c', 'a']);
    /// sequence.push_after_value(&'a', 'b').unwrap();
    /// assert_eq!(sequence, Sequence::from(['a', 'b', 'c', 'a']));
    /// assert_eq!(sequence.push_after_value(&'z', 'y'), Err(SequenceError::NotFound));
    /// ```
    pub fn push_after_value(&mut self, anchor: &T, element: T) -> Result<()>
    where
        T: PartialEq,
    {
        let anchor = self.find_anchor(anchor)?;
        // SAFETY: `anchor` is a node of this sequence.
        unsafe { self.insert_after(Some(anchor), element) };
        Ok(())
    }

    /// Inserts an element right before the first element equal to `anchor`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] on an empty sequence,
    /// [`SequenceError::NotFound`] if no element equals `anchor`.
    pub fn push_before_value(&mut self, anchor: &T, element: T) -> Result<()>
    where
        T: PartialEq,
    {
        let anchor = self.find_anchor(anchor)?;
        // SAFETY: `anchor` is a node of this sequence.
        unsafe { self.insert_before(Some(anchor), element) };
        Ok(())
    }

    /// Removes the first element and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.pop_front(), Err(SequenceError::Empty));
    ///
    /// sequence.push_front(1);
    /// sequence.push_front(3);
    /// assert_eq!(sequence.pop_front(), Ok(3));
    /// assert_eq!(sequence.pop_front(), Ok(1));
    /// assert!(sequence.is_empty());
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        self.take_front_node()
            .map(Node::into_element)
            .ok_or_else(|| report(SequenceError::Empty))
    }

    /// Removes the last element and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        self.take_back_node()
            .map(Node::into_element)
            .ok_or_else(|| report(SequenceError::Empty))
    }

    /// Removes the element at position `pos` and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] unless `pos < len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([3, 2, 1]);
    ///
    /// assert_eq!(sequence.pop_at(1), Ok(2));
    /// assert_eq!(sequence.pop_at(0), Ok(3));
    /// assert_eq!(sequence.pop_at(0), Ok(1));
    /// assert!(sequence.pop_at(0).is_err());
    /// ```
    pub fn pop_at(&mut self, pos: usize) -> Result<T> {
        match pos {
            pos if pos >= self.len => Err(self.invalid_position(pos)),
            0 => self.pop_front(),
            pos if pos == self.len - 1 => self.pop_back(),
            pos => {
                let node = self.node_at(pos).ok_or_else(|| self.invalid_position(pos))?;
                // SAFETY: `node` is an inner node of this sequence.
                Ok(unsafe { self.detach_node(node) }.into_element())
            }
        }
    }

    /// Removes every element equal to `value`, and returns how many were
    /// removed. The remaining elements keep their relative order.
    ///
    /// The scan is a single forward pass: after each removal it resumes at
    /// the successor of the removed node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty. Finding no match is
    /// not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3, 4, 5, 5, 1, 2, 3]);
    /// assert_eq!(sequence.pop_value(&2), Ok(2));
    /// assert_eq!(sequence, Sequence::from([1, 3, 4, 5, 5, 1, 3]));
    /// assert_eq!(sequence.pop_value(&9), Ok(0));
    /// ```
    pub fn pop_value(&mut self, value: &T) -> Result<usize>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        let mut removed = 0;
        let mut cursor = self.cursor_start_mut();
        while let Some(element) = cursor.current() {
            if element == value {
                cursor.remove_current();
                removed += 1;
            } else {
                cursor.move_next_cyclic();
            }
        }
        Ok(removed)
    }

    /// Provides a cursor at the node with given index.
    ///
    /// By convention, the cursor is pointing to the "ghost" position if
    /// `at == len`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3]);
    /// assert_eq!(sequence.cursor(1).unwrap().current(), Some(&2));
    /// assert_eq!(sequence.cursor(3).unwrap().current(), None);
    /// assert!(sequence.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>> {
        let mut cursor = self.cursor_start();
        cursor.seek_to(at)?;
        Ok(cursor)
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the "ghost" position if the sequence is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head, 0)
    }

    /// Provides a cursor at the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3]);
    /// let cursor = sequence.cursor_end();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.peek_prev(), Some(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None, self.len)
    }

    /// Provides a cursor with mutable access at the node with given index.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3]);
    /// let mut cursor = sequence.cursor_mut(1).unwrap();
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

    /// Provides a cursor with mutable access at the first node.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.head;
        CursorMut::new(self, head, 0)
    }

    /// Provides a cursor with mutable access at the ghost position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, None, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([0, 1, 2]);
    ///
    /// let mut iter = sequence.iter();
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
    /// let mut sequence = Sequence::from([0, 1, 2]);
    ///
    /// for element in sequence.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(sequence, Sequence::from([10, 11, 12]));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements from `other` to the end of the sequence.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut first = Sequence::from(['a']);
    /// let mut second = Sequence::from(['b', 'c']);
    ///
    /// first.append(&mut second);
    ///
    /// assert_eq!(first, Sequence::from(['a', 'b', 'c']));
    /// assert!(second.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the last node and the boundary after it are adjacent.
            unsafe { self.attach_nodes(self.tail, None, detached) }
        }
    }

    /// Moves all elements from `other` to the beginning of the sequence.
    ///
    /// After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: the boundary before the first node and the first node
            // are adjacent.
            unsafe { self.attach_nodes(None, self.head, detached) }
        }
    }

    /// Splits the sequence into two at the given index. Returns everything
    /// from the given index on (inclusive), moving the nodes rather than
    /// copying them.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InvalidPosition`] if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([1, 2, 3]);
    /// let split = sequence.split_off(2).unwrap();
    ///
    /// assert_eq!(sequence, Sequence::from([1, 2]));
    /// assert_eq!(split, Sequence::from([3]));
    /// ```
    pub fn split_off(&mut self, at: usize) -> Result<Sequence<T>> {
        if at > self.len {
            return Err(self.invalid_position(at));
        }
        let (front, back) = match (self.node_at(at), self.tail) {
            (Some(front), Some(back)) => (front, back),
            _ => return Ok(Sequence::new()),
        };
        let len = self.len - at;
        // SAFETY: `front` is at position `at`, so `front..=tail` is a valid range
        // of `len - at` nodes.
        Ok(Sequence::from_detached(unsafe {
            self.detach_nodes(front, back, len)
        }))
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

impl<T> Node<T> {
    /// Create a detached node with given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            element,
        })))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid range and its length is equal to `len`.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for Sequence<T> {}

unsafe impl<T: Sync> Sync for Sequence<T> {}

// Ensure that `Sequence` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: Sequence<&'static str>) -> Sequence<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
