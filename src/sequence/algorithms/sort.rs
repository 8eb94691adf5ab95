use crate::sequence::{Link, Sequence};

/// Bubble-sort `sequence` in place by swapping the values of adjacent nodes.
///
/// `out_of_order(a, b)` tells whether `a` must not precede `b`. Passes are
/// repeated until one completes without a swap, so an already ordered
/// sequence costs a single pass. Equal values are never swapped, which keeps
/// the sort stable. No node is relinked.
pub(crate) fn bubble_sort<T, F>(sequence: &mut Sequence<T>, mut out_of_order: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if sequence.len() < 2 {
        return;
    }
    // after every pass the greatest unsorted value has reached its place,
    // so each pass can stop one node earlier
    let mut unsorted = sequence.len();
    let mut swapped = true;
    while swapped && unsorted > 1 {
        swapped = false;
        // SAFETY: the sequence is borrowed mutably and holds at least
        // `unsorted` nodes, so every `current` and `next` below is a node of it.
        unsafe { swapped |= bubble_pass(sequence.head_node(), unsorted, &mut out_of_order) };
        unsorted -= 1;
    }
}

/// Compare and swap along the first `len` nodes from `front`, returning
/// whether anything was swapped.
unsafe fn bubble_pass<T, F>(front: Link<T>, len: usize, out_of_order: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    let mut swapped = false;
    let mut current = front;
    for _ in 1..len {
        let (Some(a), Some(b)) = (current, current.and_then(|node| node.as_ref().next)) else {
            break;
        };
        if out_of_order(&a.as_ref().element, &b.as_ref().element) {
            std::mem::swap(&mut (*a.as_ptr()).element, &mut (*b.as_ptr()).element);
            swapped = true;
        }
        current = Some(b);
    }
    swapped
}

#[cfg(test)]
mod tests {
    use super::bubble_sort;
    use crate::Sequence;

    #[test]
    fn sort_in_place() {
        fn test_sort(input: &[i32]) {
            let mut sequence = Sequence::from_iter(input.iter().copied());
            bubble_sort(&mut sequence, |a, b| a > b);
            sequence.assert_invariants();
            let mut expected = input.to_vec();
            expected.sort();
            assert_eq!(Vec::from_iter(sequence), expected);
        }
        test_sort(&[]);
        test_sort(&[1]);
        test_sort(&[2, 1]);
        test_sort(&[1, 2, 3, 4]);
        test_sort(&[4, 3, 2, 1]);
        test_sort(&[3, 1, 3, 2, 1, 0, 9, 3]);
    }

    #[test]
    fn nodes_stay_in_place() {
        let mut sequence = Sequence::from([3, 1, 2]);
        let nodes = (0..3).map(|pos| sequence.node_at(pos)).collect::<Vec<_>>();
        bubble_sort(&mut sequence, |a, b| a > b);
        let after = (0..3).map(|pos| sequence.node_at(pos)).collect::<Vec<_>>();
        assert_eq!(nodes, after);
        assert_eq!(sequence, Sequence::from([1, 2, 3]));
    }

    #[test]
    fn stable_on_equal_keys() {
        let mut sequence = Sequence::from([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        bubble_sort(&mut sequence, |a, b| a.0 > b.0);
        assert_eq!(
            sequence,
            Sequence::from([(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')])
        );
    }
}
