use crate::error::{report, Result, SequenceError};
use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod sort;

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

/// Deep copy: the clone owns fresh nodes holding clones of every value.
impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrite the values of the existing nodes, then grow or truncate.
    fn clone_from(&mut self, other: &Self) {
        let mut iter_other = other.iter();
        for (element, element_other) in self.iter_mut().zip(&mut iter_other) {
            element.clone_from(element_other);
        }
        while self.len() > other.len() {
            self.take_back_node();
        }
        self.extend(iter_other.cloned());
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T> Sequence<T> {
    /// Returns `true` if the `Sequence` contains an element equal to the
    /// given value.
    ///
    /// Searching an empty sequence reports [`SequenceError::Empty`] to the
    /// diagnostics sink and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([0, 1, 2]);
    ///
    /// assert_eq!(sequence.search(&0), true);
    /// assert_eq!(sequence.search(&10), false);
    /// assert_eq!(Sequence::new().search(&0), false);
    /// ```
    pub fn search(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        if self.is_empty() {
            report(SequenceError::Empty);
            return false;
        }
        self.iter().any(|element| element == target)
    }

    /// Returns the 0-based position of the first element equal to `target`,
    /// or `None` if there is none.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from(['a', 'b', 'b']);
    /// assert_eq!(sequence.locate(&'b'), Ok(Some(1)));
    /// assert_eq!(sequence.locate(&'z'), Ok(None));
    /// ```
    pub fn locate(&self, target: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        Ok(self.iter().position(|element| element == target))
    }

    /// Sort the sequence, ascending or descending.
    ///
    /// This sort is stable (i.e., does not reorder equal elements), and only
    /// values move: every node keeps its place in the chain.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time and *O*(1) memory.
    /// An already sorted sequence costs a single *O*(*n*) pass.
    ///
    /// # Current Implementation
    ///
    /// Bubble passes over adjacent pairs, swapping values that are out of
    /// order, repeated until a pass performs no swap.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([3, 1, 2]);
    ///
    /// sequence.sort(false);
    /// assert_eq!(sequence, Sequence::from([1, 2, 3]));
    ///
    /// sequence.sort(true);
    /// assert_eq!(sequence, Sequence::from([3, 2, 1]));
    /// ```
    pub fn sort(&mut self, descending: bool)
    where
        T: Ord,
    {
        if descending {
            sort::bubble_sort(self, |a, b| a < b);
        } else {
            sort::bubble_sort(self, |a, b| a > b);
        }
    }

    /// Sort the sequence with a comparator function, ascending with respect
    /// to `compare`.
    ///
    /// This sort is stable. The comparator must define a total ordering of
    /// the elements, otherwise the resulting order is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut floats = Sequence::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats, Sequence::from([1.0, 2.0, 3.0, 4.0, 5.0]));
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::bubble_sort(self, |a, b| compare(a, b) == Ordering::Greater)
    }

    /// Returns `true` if every element is less than or equal to its
    /// successor. Empty and single-element sequences are sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// assert!(Sequence::from([1, 1, 2]).is_sorted());
    /// assert!(!Sequence::from([2, 1]).is_sorted());
    /// assert!(Sequence::<i32>::new().is_sorted());
    /// ```
    pub fn is_sorted(&self) -> bool
    where
        T: PartialOrd,
    {
        self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b)
    }

    /// Sort ascending, then keep only the first element of every run of
    /// equal values. Returns how many elements were removed.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let mut sequence = Sequence::from([3, 1, 3, 2, 1]);
    /// assert_eq!(sequence.pop_duplicates(), Ok(2));
    /// assert_eq!(sequence, Sequence::from([1, 2, 3]));
    /// ```
    pub fn pop_duplicates(&mut self) -> Result<usize>
    where
        T: Ord,
    {
        if self.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        self.sort(false);
        let mut removed = 0;
        let mut cursor = self.cursor_start_mut();
        cursor.move_next_cyclic();
        while let Some(current) = cursor.current() {
            if cursor.peek_prev() == Some(current) {
                cursor.remove_current();
                removed += 1;
            } else {
                cursor.move_next_cyclic();
            }
        }
        Ok(removed)
    }

    /// Copy the first half of the values (`len / 2`, rounded down) to the
    /// back of `first` and the rest to the back of `second`. The sequence
    /// itself is left untouched.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if the sequence is empty; neither output is
    /// modified then.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::Sequence;
    ///
    /// let sequence = Sequence::from([1, 2, 3, 4, 5]);
    /// let (mut first, mut second) = (Sequence::new(), Sequence::new());
    /// sequence.split(&mut first, &mut second).unwrap();
    ///
    /// assert_eq!(first, Sequence::from([1, 2]));
    /// assert_eq!(second, Sequence::from([3, 4, 5]));
    /// ```
    pub fn split(&self, first: &mut Self, second: &mut Self) -> Result<()>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        let mut iter = self.iter();
        first.extend(iter.by_ref().take(self.len() / 2).cloned());
        second.extend(iter.cloned());
        Ok(())
    }

    /// Append copies of all values of `first`, then of `second`, to the back
    /// of the sequence. Both operands are left untouched.
    ///
    /// # Errors
    ///
    /// [`SequenceError::Empty`] if either operand is empty; nothing is
    /// appended then. See [`Sequence::merge_lenient`] for a variant that
    /// accepts empty operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_sequence::{Sequence, SequenceError};
    ///
    /// let mut sequence = Sequence::from([0]);
    /// sequence.merge(&Sequence::from([1, 2]), &Sequence::from([3])).unwrap();
    /// assert_eq!(sequence, Sequence::from([0, 1, 2, 3]));
    ///
    /// let empty = Sequence::new();
    /// assert_eq!(sequence.merge(&empty, &Sequence::from([4])), Err(SequenceError::Empty));
    /// assert_eq!(sequence.len(), 4);
    /// ```
    pub fn merge(&mut self, first: &Self, second: &Self) -> Result<()>
    where
        T: Clone,
    {
        if first.is_empty() || second.is_empty() {
            return Err(report(SequenceError::Empty));
        }
        self.merge_lenient(first, second);
        Ok(())
    }

    /// Like [`Sequence::merge`], but empty operands simply contribute
    /// nothing.
    pub fn merge_lenient(&mut self, first: &Self, second: &Self)
    where
        T: Clone,
    {
        self.extend(first.iter().chain(second).cloned());
    }
}
