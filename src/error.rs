//! Error type shared by the attribute wrappers, the sizing engine and the codecs.

use std::collections::TryReserveError;

/// Errors raised while sizing, assigning, reading or writing attributes.
///
/// Every variant is a hard failure: nothing is retried and a failed assignment leaves the
/// array buffer in an unspecified (but memory-safe) state until it is assigned again.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Stream failure, including end-of-stream in the middle of a field.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    /// An array value's length disagrees with the length computed from the size functions.
    #[error("Size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// An array's stored dimensions no longer match what its size functions compute.
    #[error("Stale shape: stored dims {stored:?}, size functions now give {required:?}")]
    StaleShape { stored: Vec<usize>, required: Vec<usize> },
    /// A bounded array would need more elements than its fixed capacity.
    #[error("Capacity overflow: {required} elements required, capacity is {capacity}")]
    CapacityOverflow { required: usize, capacity: usize },
    /// The product of the dimensions does not fit in `usize`.
    #[error("Dimension overflow: product of {dims:?} does not fit in usize")]
    DimensionOverflow { dims: Vec<usize> },
    /// The flat buffer of a dynamic array could not grow.
    #[error("Allocation: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
