#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::CellSize;

#[cfg(feature = "std")]
type CellMap = HashMap<usize, CellSize>;
#[cfg(not(feature = "std"))]
type CellMap = BTreeMap<usize, CellSize>;

/// Sparse index → measured size map for dynamically sized items.
///
/// The cache has no invalidation logic of its own: whoever records a measurement is expected to
/// call [`crate::SizeAndPositionManager::reset_item`] for the same index so the new size is
/// picked up on the next query.
#[derive(Clone, Debug, Default)]
pub struct CellCache {
    cells: CellMap,
}

impl CellCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<CellSize> {
        self.cells.get(&index).copied()
    }

    pub fn set(&mut self, index: usize, size: CellSize) {
        self.cells.insert(index, size);
    }

    /// Forgets the measurement for a single index.
    pub fn remove(&mut self, index: usize) -> Option<CellSize> {
        self.cells.remove(&index)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
