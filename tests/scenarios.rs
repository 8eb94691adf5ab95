use linked_sequence::{Sequence, SequenceError};
use rstest::rstest;

fn values<T: Clone>(sequence: &Sequence<T>) -> Vec<T> {
    sequence.iter().cloned().collect()
}

#[rstest]
#[case(&[1, 2, 3, 4, 5, 5, 1, 2, 3], 2, &[1, 3, 4, 5, 5, 1, 3], 2)]
#[case(&[2, 2, 2], 2, &[], 3)]
#[case(&[1, 3], 2, &[1, 3], 0)]
#[case(&[2, 1, 2], 2, &[1], 2)]
fn pop_value_keeps_relative_order(
    #[case] input: &[i32],
    #[case] value: i32,
    #[case] expected: &[i32],
    #[case] removed: usize,
) {
    let mut sequence = Sequence::from_iter(input.iter().copied());
    assert_eq!(sequence.pop_value(&value), Ok(removed));
    assert_eq!(values(&sequence), expected);
    assert_eq!(sequence.len(), expected.len());
}

#[rstest]
#[case(&[3, 1, 2])]
#[case(&[5, 4, 3, 2, 1])]
#[case(&[1, 1, 1])]
#[case(&[7])]
#[case(&[])]
fn sort_orders_both_ways(#[case] input: &[i32]) {
    let mut sequence = Sequence::from_iter(input.iter().copied());
    let mut ascending = input.to_vec();
    ascending.sort();

    sequence.sort(false);
    assert!(sequence.is_sorted());
    assert_eq!(values(&sequence), ascending);

    sequence.sort(true);
    ascending.reverse();
    assert_eq!(values(&sequence), ascending);
}

#[rstest]
#[case(&[1, 1, 2, 2, 3], &[1, 2, 3], 2)]
#[case(&[3, 2, 1], &[1, 2, 3], 0)]
#[case(&[4, 4, 4, 4], &[4], 3)]
fn pop_duplicates_is_idempotent(
    #[case] input: &[i32],
    #[case] expected: &[i32],
    #[case] removed: usize,
) {
    let mut sequence = Sequence::from_iter(input.iter().copied());
    assert_eq!(sequence.pop_duplicates(), Ok(removed));
    assert_eq!(values(&sequence), expected);

    assert_eq!(sequence.pop_duplicates(), Ok(0));
    assert_eq!(values(&sequence), expected);
}

#[rstest]
fn empty_sequence_reports_empty() {
    let mut sequence = Sequence::<i32>::new();
    assert_eq!(sequence.front(), Err(SequenceError::Empty));
    assert_eq!(sequence.back(), Err(SequenceError::Empty));
    assert_eq!(sequence.pop_front(), Err(SequenceError::Empty));
    assert_eq!(sequence.pop_value(&1), Err(SequenceError::Empty));
    assert_eq!(sequence.front().copied().unwrap_or_default(), 0);
    assert_eq!(sequence.len(), 0);
}

#[rstest]
#[case(&[10, 20, 30], 1, 99, Ok(&[10, 99, 20, 30][..]))]
#[case(&[10, 20, 30], 0, 99, Ok(&[99, 10, 20, 30][..]))]
#[case(&[10, 20, 30], 2, 99, Ok(&[10, 20, 30, 99][..]))]
#[case(&[10], 0, 99, Ok(&[99, 10][..]))]
#[case(&[10, 20, 30], 3, 99, Err(SequenceError::InvalidPosition { pos: 3, len: 3 }))]
#[case(&[], 0, 99, Err(SequenceError::InvalidPosition { pos: 0, len: 0 }))]
fn push_at_takes_exactly_one_branch(
    #[case] input: &[i32],
    #[case] pos: usize,
    #[case] value: i32,
    #[case] expected: Result<&[i32], SequenceError>,
) {
    let mut sequence = Sequence::from_iter(input.iter().copied());
    match expected {
        Ok(expected) => {
            assert_eq!(sequence.push_at(pos, value), Ok(()));
            assert_eq!(values(&sequence), expected);
            assert_eq!(sequence.len(), input.len() + 1);
        }
        Err(error) => {
            assert_eq!(sequence.push_at(pos, value), Err(error));
            assert_eq!(values(&sequence), input);
        }
    }
}

#[rstest]
#[case(&[10, 20, 30], 0, 99, Ok(&[99, 10, 20, 30][..]))]
#[case(&[10, 20, 30], 1, 99, Ok(&[10, 20, 99, 30][..]))]
#[case(&[10, 20, 30], 2, 99, Ok(&[10, 20, 30, 99][..]))]
#[case(&[10], 0, 99, Ok(&[99, 10][..]))]
#[case(&[10, 20, 30], 3, 99, Err(SequenceError::InvalidPosition { pos: 3, len: 3 }))]
#[case(&[], 0, 99, Err(SequenceError::InvalidPosition { pos: 0, len: 0 }))]
fn push_after_node_delegates_at_both_ends(
    #[case] input: &[i32],
    #[case] pos: usize,
    #[case] value: i32,
    #[case] expected: Result<&[i32], SequenceError>,
) {
    let mut sequence = Sequence::from_iter(input.iter().copied());
    match expected {
        Ok(expected) => {
            assert_eq!(sequence.push_after_node(pos, value), Ok(()));
            assert_eq!(values(&sequence), expected);
            assert_eq!(sequence.front(), Ok(&expected[0]));
            assert_eq!(sequence.back(), Ok(&expected[expected.len() - 1]));
        }
        Err(error) => {
            assert_eq!(sequence.push_after_node(pos, value), Err(error));
            assert_eq!(values(&sequence), input);
        }
    }
}

#[rstest]
#[case(&[1])]
#[case(&[1, 2])]
#[case(&[4, 8, 15, 16, 23, 42])]
fn at_matches_front_and_back(#[case] input: &[i32]) {
    let sequence = Sequence::from_iter(input.iter().copied());
    assert_eq!(sequence.at(0), sequence.front());
    assert_eq!(sequence.at(sequence.len() - 1), sequence.back());
    for (pos, value) in input.iter().enumerate() {
        assert_eq!(sequence.at(pos), Ok(value));
    }
}

#[rstest]
fn push_pop_round_trip() {
    let mut sequence = Sequence::from([1, 2]);
    sequence.push_back(3);
    let before = sequence.clone();

    sequence.push_back(4);
    assert_eq!(sequence.pop_back(), Ok(4));

    assert_eq!(sequence, before);
    assert_eq!(sequence.len(), before.len());
    assert_eq!(sequence.front(), before.front());
    assert_eq!(sequence.back(), before.back());
}

#[rstest]
fn copies_are_independent() {
    let original = Sequence::from([String::from("a"), String::from("b")]);
    let mut copy = original.clone();
    copy.push_back(String::from("c"));
    copy.front_mut().unwrap().push('!');

    assert_eq!(values(&original), ["a", "b"]);
    assert_eq!(values(&copy), ["a!", "b", "c"]);
}

#[rstest]
fn swap_values_through_mutable_iterators() {
    let mut first = Sequence::from([1, 2, 3, 4, 5, 5, 1, 2, 3]);
    first.pop_value(&2).unwrap();
    let mut second = Sequence::from_iter(std::iter::repeat(2).take(first.len()));

    for (a, b) in first.iter_mut().zip(second.iter_mut()) {
        std::mem::swap(a, b);
    }

    assert_eq!(first.to_string(), "2 2 2 2 2 2 2");
    assert_eq!(second.to_string(), "1 3 4 5 5 1 3");
}

#[rstest]
#[case(true, '\n', "1 3 4\n")]
#[case(false, '\n', "4 3 1\n")]
#[case(true, ',', "1 3 4,")]
fn write_values_formats(#[case] ascending: bool, #[case] terminator: char, #[case] expected: &str) {
    let sequence = Sequence::from([1, 3, 4]);
    let mut out = Vec::new();
    assert_eq!(sequence.write_values(&mut out, ascending, terminator).unwrap(), 3);
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[rstest]
fn write_values_on_empty_writes_none() {
    let mut out = Vec::new();
    assert_eq!(Sequence::<i32>::new().write_values(&mut out, true, '\n').unwrap(), 0);
    assert!(out.is_empty());
}
