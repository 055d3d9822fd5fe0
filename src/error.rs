use thiserror::Error;

/// Errors produced by [`Sequence`](crate::Sequence) and its adapters.
///
/// A failing operation never modifies the sequence it was called on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A position argument fell outside the valid domain of the operation:
    /// `0..=len` for insertion points and `0..len` for element access.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// A `start..end` range with `end < start` or `end > len`.
    #[error("range {start}..{end} is out of bounds for a sequence of length {len}")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    /// The operation orders values but no comparator is configured.
    #[error("no comparator is configured for this sequence")]
    MissingComparator,
    /// Reducing a sequence without elements.
    #[error("cannot reduce an empty sequence")]
    Empty,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
