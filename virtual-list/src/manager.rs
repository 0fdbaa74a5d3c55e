use alloc::vec::Vec;

use crate::item_size::{EstimatedSizeGetter, SizeGetter};
use crate::{Align, CellCache, Error, ItemSize, Result, SizeAndPosition, VisibleRange};

/// Partial reconfiguration for [`SizeAndPositionManager::update_config`].
///
/// Unset fields are left untouched.
#[derive(Clone, Default)]
pub struct ManagerUpdate {
    pub item_count: Option<usize>,
    pub item_size_getter: Option<SizeGetter>,
    pub estimated_size_getter: Option<EstimatedSizeGetter>,
}

impl ManagerUpdate {
    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = Some(item_count);
        self
    }

    pub fn with_item_size_getter(mut self, getter: SizeGetter) -> Self {
        self.item_size_getter = Some(getter);
        self
    }

    pub fn with_estimated_size_getter(mut self, getter: EstimatedSizeGetter) -> Self {
        self.estimated_size_getter = Some(getter);
        self
    }
}

/// An incremental offset index over items of non-uniform size.
///
/// Sizes are read lazily: the manager keeps a measured prefix (`[0, frontier]`) and extends it
/// only as far as a query needs. Everything past the frontier is approximated with the
/// estimated size. Re-querying a measured index is O(1), measuring a new one is amortized O(1),
/// and offset → index lookups are O(log n).
///
/// The manager is meant to live as long as the list it serves. When a size source changes,
/// reconfigure it with [`Self::update_config`] and move the frontier back with
/// [`Self::reset_item`] instead of building a new one.
#[derive(Clone)]
pub struct SizeAndPositionManager {
    item_count: usize,
    item_size: SizeGetter,
    estimated_size: EstimatedSizeGetter,
    cell_cache: CellCache,
    // entries[i] is exact for every i; the frontier is entries.len() - 1.
    entries: Vec<SizeAndPosition>,
}

impl SizeAndPositionManager {
    pub fn new(
        item_count: usize,
        item_size: SizeGetter,
        estimated_size: EstimatedSizeGetter,
    ) -> Self {
        vdebug!(item_count, "SizeAndPositionManager::new");
        Self {
            item_count,
            item_size,
            estimated_size,
            cell_cache: CellCache::new(),
            entries: Vec::new(),
        }
    }

    /// Builds a manager from an [`ItemSize`] and an optional estimate.
    pub fn from_item_size(
        item_count: usize,
        item_size: &ItemSize,
        estimated_size: Option<f64>,
    ) -> Self {
        Self::new(
            item_count,
            item_size.getter(),
            crate::estimated_size_getter(estimated_size, item_size),
        )
    }

    /// Replaces the item count and/or getters. Does not touch measured entries: call
    /// [`Self::reset_item`] when the meaning of the sizes changed.
    pub fn update_config(&mut self, update: ManagerUpdate) {
        if let Some(item_count) = update.item_count {
            self.item_count = item_count;
        }
        if let Some(getter) = update.item_size_getter {
            self.item_size = getter;
        }
        if let Some(getter) = update.estimated_size_getter {
            self.estimated_size = getter;
        }
        vtrace!(item_count = self.item_count, "SizeAndPositionManager::update_config");
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn estimated_size(&self) -> f64 {
        (self.estimated_size)()
    }

    /// The highest index whose geometry is known exactly.
    pub fn last_measured_index(&self) -> Option<usize> {
        self.measured_len().checked_sub(1)
    }

    pub fn cell_cache(&self) -> &CellCache {
        &self.cell_cache
    }

    pub fn cell_cache_mut(&mut self) -> &mut CellCache {
        &mut self.cell_cache
    }

    /// Moves the frontier back so that `index` and everything after it is measured again on
    /// the next query. Entries before `index` are kept.
    pub fn reset_item(&mut self, index: usize) {
        if index < self.entries.len() {
            vtrace!(index, "reset_item");
            self.entries.truncate(index);
        }
    }

    pub fn get_size_and_position_for_index(&mut self, index: usize) -> Result<SizeAndPosition> {
        if index >= self.item_count {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.item_count,
            });
        }

        if let Some(entry) = self.entries.get(index) {
            return Ok(*entry);
        }

        let mut offset = self.get_size_and_position_of_last_measured().end();
        self.entries.reserve(index + 1 - self.entries.len());
        for i in self.entries.len()..=index {
            let size = self.read_size(i);
            if !size.is_finite() || size < 0.0 {
                vwarn!(index = i, size, "invalid item size");
                return Err(Error::InvalidSize { index: i, size });
            }
            self.entries.push(SizeAndPosition { offset, size });
            offset += size;
        }

        Ok(self.entries[index])
    }

    /// Geometry of the frontier item, or a zero entry when nothing is measured.
    pub fn get_size_and_position_of_last_measured(&self) -> SizeAndPosition {
        self.entries.last().copied().unwrap_or_default()
    }

    /// Measured extent plus the estimate for every item past the frontier.
    pub fn get_total_size(&self) -> f64 {
        let measured = self.measured_len();
        let rest = (self.item_count - measured) as f64;
        self.measured_end() + rest * self.estimated_size()
    }

    /// Returns the items overlapping `[current_offset, current_offset + container_size)`,
    /// expanded by `overscan` on both sides.
    ///
    /// Returns `None` when there is nothing to show (empty list or zero-sized container).
    pub fn get_visible_range(
        &mut self,
        current_offset: f64,
        container_size: f64,
        overscan: usize,
    ) -> Result<Option<VisibleRange>> {
        if current_offset.is_nan() {
            return Err(Error::InvalidOffset {
                offset: current_offset,
            });
        }

        let total_size = self.get_total_size();
        if total_size == 0.0 || container_size == 0.0 {
            return Ok(None);
        }

        let current_offset = current_offset.max(0.0);
        let max_offset = current_offset + container_size;
        let start = self.find_nearest_index(current_offset)?;

        let mut end = start;
        let mut offset = self.get_size_and_position_for_index(start)?.end();
        let last_index = self.item_count - 1;
        while offset < max_offset && end < last_index {
            end += 1;
            offset += self.get_size_and_position_for_index(end)?.size;
        }

        Ok(Some(VisibleRange {
            start: start.saturating_sub(overscan),
            end: end.saturating_add(overscan).min(last_index),
        }))
    }

    /// Returns the last index whose leading edge is at or before `offset`.
    pub fn find_nearest_index(&mut self, offset: f64) -> Result<usize> {
        if offset.is_nan() {
            return Err(Error::InvalidOffset { offset });
        }

        let last = self.measured_len().saturating_sub(1);
        if offset <= self.measured_end() {
            self.binary_search(0, last, offset)
        } else {
            self.exponential_search(last, offset)
        }
    }

    /// Computes the scroll offset that shows `target_index` according to `align`.
    ///
    /// The result is clamped to `[0, total_size - container_size]`.
    pub fn get_updated_offset_for_index(
        &mut self,
        align: Align,
        target_index: usize,
        current_offset: f64,
        container_size: f64,
    ) -> Result<f64> {
        if container_size <= 0.0 {
            return Ok(0.0);
        }

        let item = self.get_size_and_position_for_index(target_index)?;
        let max_offset = item.offset;
        let min_offset = item.end() - container_size;

        let offset = match align {
            Align::Start => max_offset,
            Align::End => min_offset,
            Align::Center => max_offset - container_size / 2.0 + item.size / 2.0,
            Align::Auto => current_offset.max(min_offset).min(max_offset),
        };

        let total_size = self.get_total_size();
        Ok(offset.min(total_size - container_size).max(0.0))
    }

    // A shrunken item count may leave stale entries past the end; they are ignored here.
    fn measured_len(&self) -> usize {
        self.entries.len().min(self.item_count)
    }

    fn measured_end(&self) -> f64 {
        self.measured_len()
            .checked_sub(1)
            .map(|i| self.entries[i].end())
            .unwrap_or(0.0)
    }

    fn read_size(&self, index: usize) -> f64 {
        match &self.item_size {
            SizeGetter::Resolved(f) => f(index),
            SizeGetter::Measured(axis) => match self.cell_cache.get(index) {
                Some(cell) => cell.along(*axis),
                None => self.estimated_size(),
            },
        }
    }

    fn exponential_search(&mut self, mut index: usize, offset: f64) -> Result<usize> {
        let mut interval = 1usize;
        while index < self.item_count
            && self.get_size_and_position_for_index(index)?.offset < offset
        {
            index = index.saturating_add(interval);
            interval = interval.saturating_mul(2);
        }

        let high = index.min(self.item_count.saturating_sub(1));
        self.binary_search(index / 2, high, offset)
    }

    fn binary_search(&mut self, mut low: usize, mut high: usize, offset: f64) -> Result<usize> {
        while low <= high {
            let middle = low + (high - low) / 2;
            let current = self.get_size_and_position_for_index(middle)?.offset;
            if current > offset {
                if middle == 0 {
                    return Ok(0);
                }
                high = middle - 1;
            } else if current < offset {
                low = middle + 1;
            } else {
                return Ok(middle);
            }
        }
        Ok(low.saturating_sub(1))
    }
}

impl core::fmt::Debug for ManagerUpdate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManagerUpdate")
            .field("item_count", &self.item_count)
            .field("item_size_getter", &self.item_size_getter)
            .field("estimated_size_getter", &self.estimated_size_getter.is_some())
            .finish()
    }
}

impl core::fmt::Debug for SizeAndPositionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizeAndPositionManager")
            .field("item_count", &self.item_count)
            .field("item_size", &self.item_size)
            .field("last_measured_index", &self.last_measured_index())
            .field("cell_cache_len", &self.cell_cache.len())
            .finish_non_exhaustive()
    }
}
