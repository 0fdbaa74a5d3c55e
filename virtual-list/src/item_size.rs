use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Axis, DEFAULT_ITEM_SIZE};

/// A per-index size closure.
pub type SizeFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// A closure returning the extent assumed for every item that has not been measured yet.
pub type EstimatedSizeGetter = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Where item sizes come from.
///
/// The variants are resolved once into a [`SizeGetter`] when the manager is configured, so
/// queries never branch on the kind of source.
#[derive(Clone)]
pub enum ItemSize {
    /// Every item has the same extent.
    Fixed(f64),
    /// Item `i` has extent `table[i]`.
    Table(Arc<[f64]>),
    /// Item `i` has extent `f(i)`.
    Computed(SizeFn),
}

impl ItemSize {
    pub fn computed(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Returns the constant size for [`ItemSize::Fixed`].
    pub fn fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed(size) => Some(*size),
            _ => None,
        }
    }

    /// Resolves the source into a uniform per-index getter.
    ///
    /// Table lookups past the end yield `NaN`, which the manager rejects as an invalid size.
    pub fn getter(&self) -> SizeGetter {
        let f: SizeFn = match self {
            Self::Fixed(size) => {
                let size = *size;
                Arc::new(move |_| size)
            }
            Self::Table(table) => {
                let table = Arc::clone(table);
                Arc::new(move |i| table.get(i).copied().unwrap_or(f64::NAN))
            }
            Self::Computed(f) => Arc::clone(f),
        };
        SizeGetter::Resolved(f)
    }
}

impl Default for ItemSize {
    fn default() -> Self {
        Self::Fixed(DEFAULT_ITEM_SIZE)
    }
}

impl From<f64> for ItemSize {
    fn from(size: f64) -> Self {
        Self::Fixed(size)
    }
}

impl From<Vec<f64>> for ItemSize {
    fn from(table: Vec<f64>) -> Self {
        Self::Table(table.into())
    }
}

impl From<&[f64]> for ItemSize {
    fn from(table: &[f64]) -> Self {
        Self::Table(table.into())
    }
}

/// Closures compare by identity, tables and constants by value.
impl PartialEq for ItemSize {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Table(a), Self::Table(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl core::fmt::Debug for ItemSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::Table(table) => f.debug_tuple("Table").field(&table.len()).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A resolved item size getter.
#[derive(Clone)]
pub enum SizeGetter {
    /// A plain per-index closure.
    Resolved(SizeFn),
    /// Dynamic mode: sizes come from the manager's [`crate::CellCache`] along the given axis,
    /// falling back to the estimated size for items that have not been measured.
    Measured(Axis),
}

impl SizeGetter {
    pub fn from_fn(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Resolved(Arc::new(f))
    }
}

impl core::fmt::Debug for SizeGetter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Resolved(_) => f.write_str("Resolved(..)"),
            Self::Measured(axis) => f.debug_tuple("Measured").field(axis).finish(),
        }
    }
}

/// Builds the estimate used for unmeasured items.
///
/// Picks the first positive value of: `estimated_size`, the fixed item size, and
/// [`DEFAULT_ITEM_SIZE`].
pub fn estimated_size_getter(
    estimated_size: Option<f64>,
    item_size: &ItemSize,
) -> EstimatedSizeGetter {
    let estimate = estimated_size
        .filter(|&s| s > 0.0)
        .or_else(|| item_size.fixed().filter(|&s| s > 0.0))
        .unwrap_or(DEFAULT_ITEM_SIZE);
    Arc::new(move || estimate)
}
