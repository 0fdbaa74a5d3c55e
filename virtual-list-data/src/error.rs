use thiserror::Error;

/// Errors raised by [`crate::DataCoordinator`] and [`crate::ListWindow`].
///
/// Configuration variants are only returned at construction; later patches with bad values are
/// logged and dropped instead.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    #[error("an on_change callback is required")]
    MissingOnChange,
    #[error("column must be at least 1 (got {0})")]
    InvalidColumn(usize),
    #[error("sticky indices must be strictly ascending")]
    UnsortedStickyIndices,
    #[error("estimated size must be a finite, positive number (got {0})")]
    InvalidEstimatedSize(f64),
    #[error("fixed item size must be a finite, non-negative number (got {0})")]
    InvalidItemSize(f64),
    #[error(transparent)]
    Layout(#[from] virtual_list::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
