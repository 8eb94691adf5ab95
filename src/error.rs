use thiserror::Error;

/// Soft failures of [`Sequence`](crate::Sequence) operations.
///
/// None of them is fatal: the sequence is left exactly as it was before the
/// failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SequenceError {
    /// The operation needs at least one element.
    #[error("sequence is empty")]
    Empty,
    /// A value-keyed lookup found no matching element.
    #[error("value not found")]
    NotFound,
    /// A position outside the valid range of the sequence.
    #[error("invalid position {pos} for a sequence of length {len}")]
    InvalidPosition { pos: usize, len: usize },
}

/// A `Result` whose error is a [`SequenceError`].
pub type Result<T, E = SequenceError> = std::result::Result<T, E>;

/// Emit `error` to the diagnostics sink and hand it back to the caller.
///
/// Every error is reported once, where it is created.
pub(crate) fn report(error: SequenceError) -> SequenceError {
    #[cfg(feature = "diagnostics")]
    tracing::warn!(target: "linked_sequence", %error, "sequence operation failed");
    error
}
