use thiserror::Error;

/// Errors raised by [`crate::SizeAndPositionManager`] queries.
///
/// Every variant describes a caller bug (a bad index, a broken size source, a bad scroll
/// offset); none of them is transient.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    #[error("index {index} is out of range 0..{count}")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("item size for index {index} must be a finite, non-negative number (got {size})")]
    InvalidSize { index: usize, size: f64 },
    #[error("invalid scroll offset {offset}")]
    InvalidOffset { offset: f64 },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
