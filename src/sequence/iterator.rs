use crate::sequence::{Link, Node, Sequence};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// An iterator over the elements of a `Sequence`.
///
/// It keeps the closed range `front..=back` of nodes not yet yielded, together
/// with its length; the range is exhausted once `len` reaches 0.
///
/// Though the `Iter` does not hold a reference to the sequence, it actually
/// *borrows* (immutably) from it, so a phantom marker of `&'a Sequence<T>` is
/// added to protect the sequence from being written.
///
/// # Examples
///
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut sequence = Sequence::from([1, 2, 3]);
/// let mut iter = sequence.iter();
///
/// // Won't compile, because the sequence is already borrowed immutably.
/// sequence.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    front: Link<T>,
    back: Link<T>,
    len: usize,
    _marker: PhantomData<&'a Sequence<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(sequence: &'a Sequence<T>) -> Self {
        Self {
            front: sequence.head_node(),
            back: sequence.tail_node(),
            len: sequence.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

/// Walk `len` nodes forward from `front`.
fn debug_range<T: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    front: Link<T>,
    len: usize,
) -> fmt::Result {
    let mut f = f.debug_tuple(name);
    let mut ptr = front;
    for _ in 0..len {
        let Some(node) = ptr else { break };
        // SAFETY: the `len` nodes from `front` are the unvisited range of a
        // borrowed sequence.
        let current = unsafe { node.as_ref() };
        f.field(&current.element);
        ptr = current.next;
    }
    f.finish()
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_range(f, "Iter", self.front, self.len)
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*front` and shrink the range to `(front.next)..=back`,
    /// or return `None` if the range is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.front?;
        // SAFETY: the range is not empty, so `front` is a node of the
        // borrowed sequence.
        let current = unsafe { node.as_ref() };
        self.front = current.next;
        self.len -= 1;
        Some(&current.element)
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
    /// Return `*back` and shrink the range to `front..=(back.prev)`,
    /// or return `None` if the range is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.back?;
        // SAFETY: the range is not empty, so `back` is a node of the
        // borrowed sequence.
        let current = unsafe { node.as_ref() };
        self.back = current.prev;
        self.len -= 1;
        Some(&current.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Sequence`.
///
/// Though the `IterMut` does not hold a reference to the sequence, it
/// actually *borrows* (mutably) from it, so a phantom marker of
/// `&'a mut Sequence<T>` is added to protect the sequence from being read.
///
/// # Examples
///
/// `Sequence` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use linked_sequence::Sequence;
///
/// let mut sequence = Sequence::from([1, 2, 3]);
/// let mut iter = sequence.iter_mut();
/// println!("{:?}", sequence.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    front: Link<T>,
    back: Link<T>,
    len: usize,
    _marker: PhantomData<&'a mut Sequence<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut Sequence<T>) -> Self {
        Self {
            front: sequence.head_node(),
            back: sequence.tail_node(),
            len: sequence.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_range(f, "IterMut", self.front, self.len)
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let mut node = self.front?;
        // SAFETY: the range is not empty, and every node is yielded at most
        // once, so the mutable references never alias.
        let current = unsafe { node.as_mut() };
        self.front = current.next;
        self.len -= 1;
        Some(&mut current.element)
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
        let mut node = self.back?;
        // SAFETY: the range is not empty, and every node is yielded at most
        // once, so the mutable references never alias.
        let current = unsafe { node.as_mut() };
        self.back = current.prev;
        self.len -= 1;
        Some(&mut current.element)
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
    sequence: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.take_front_node().map(Node::into_element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sequence.len;
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
        self.sequence.take_back_node().map(Node::into_element)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { sequence: self }
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
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

/// Build a sequence holding the array's values in order.
impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(array: [T; N]) -> Self {
        Self::from_iter(array)
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|element| self.push_back(element));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

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
                    let mut sequence = Sequence::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = sequence.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = sequence.$ITER() $( .$REV() )?;
                    for item in vec.$ITER() $( .$REV() )?.take(mid) {
                        assert_eq!(iter.next(), Some(item));
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )?.skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
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
            test_back_iter_mut(input, mid);
        }
        for (len, mid) in [(10, 10), (10, 5), (10, 0), (2, 1), (1, 1), (1, 0), (0, 0)] {
            test_case(0..len, mid);
        }
    }

    #[test]
    fn into_iter_from_both_ends() {
        let sequence = Sequence::from(["a", "b", "c", "d"]);
        let mut iter = sequence.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some("a"));
        assert_eq!(iter.next_back(), Some("d"));
        assert_eq!(iter.collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn extend_by_reference() {
        let mut sequence = Sequence::from([1, 2]);
        sequence.extend(&[3, 4]);
        sequence.extend(vec![5]);
        sequence.assert_invariants();
        assert_eq!(Vec::from_iter(&sequence), [&1, &2, &3, &4, &5]);
        let mut iter = sequence.iter();
        assert_eq!(iter.nth(2), Some(&3));
        assert_eq!(format!("{:?}", iter), "Iter(4, 5)");
    }
}
