use alloc::sync::Arc;
use alloc::vec::Vec;

use virtual_list::{DEFAULT_OVERSCAN, ItemSize};

use crate::{Error, ItemData, Result, StatusKind};

/// Default number of elements packed into one row.
pub const DEFAULT_COLUMN: usize = 1;

/// Receives the render descriptors whenever they change.
pub type OnChangeCallback<T, S = StatusKind> = Arc<dyn Fn(&[ItemData<T, S>]) + Send + Sync>;

/// Construction options for [`crate::DataCoordinator`].
///
/// `on_change` is required; everything else has a default.
pub struct ListOptions<T, S = StatusKind> {
    pub item_size: ItemSize,
    /// Extent assumed for items not measured yet. `None` uses the fixed item size, or
    /// [`virtual_list::DEFAULT_ITEM_SIZE`].
    pub estimated_size: Option<f64>,
    pub overscan: usize,
    /// Strictly ascending.
    pub sticky_indices: Vec<usize>,
    pub column: usize,
    pub on_change: Option<OnChangeCallback<T, S>>,
}

impl<T, S> ListOptions<T, S> {
    pub fn new() -> Self {
        Self {
            item_size: ItemSize::default(),
            estimated_size: None,
            overscan: DEFAULT_OVERSCAN,
            sticky_indices: Vec::new(),
            column: DEFAULT_COLUMN,
            on_change: None,
        }
    }

    pub fn with_item_size(mut self, item_size: impl Into<ItemSize>) -> Self {
        self.item_size = item_size.into();
        self
    }

    pub fn with_estimated_size(mut self, estimated_size: f64) -> Self {
        self.estimated_size = Some(estimated_size);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_sticky_indices(mut self, sticky_indices: impl Into<Vec<usize>>) -> Self {
        self.sticky_indices = sticky_indices.into();
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_on_change(
        mut self,
        f: impl Fn(&[ItemData<T, S>]) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Validates the options and splits off the callback.
    pub(crate) fn into_parts(self) -> Result<(ListConfig, OnChangeCallback<T, S>)> {
        let on_change = self.on_change.ok_or(Error::MissingOnChange)?;
        check_item_size(&self.item_size)?;
        check_estimated_size(self.estimated_size)?;
        check_sticky_indices(&self.sticky_indices)?;
        check_column(self.column)?;

        let config = ListConfig {
            item_size: self.item_size,
            estimated_size: self.estimated_size,
            overscan: self.overscan,
            sticky_indices: self.sticky_indices,
            column: self.column,
        };
        Ok((config, on_change))
    }
}

impl<T, S> Default for ListOptions<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial update for [`crate::DataCoordinator::update_config`]. Unset fields are kept.
pub struct ConfigPatch<T, S = StatusKind> {
    pub item_size: Option<ItemSize>,
    pub estimated_size: Option<f64>,
    pub overscan: Option<usize>,
    pub sticky_indices: Option<Vec<usize>>,
    pub column: Option<usize>,
    pub on_change: Option<OnChangeCallback<T, S>>,
}

impl<T, S> ConfigPatch<T, S> {
    pub fn new() -> Self {
        Self {
            item_size: None,
            estimated_size: None,
            overscan: None,
            sticky_indices: None,
            column: None,
            on_change: None,
        }
    }

    pub fn with_item_size(mut self, item_size: impl Into<ItemSize>) -> Self {
        self.item_size = Some(item_size.into());
        self
    }

    pub fn with_estimated_size(mut self, estimated_size: f64) -> Self {
        self.estimated_size = Some(estimated_size);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = Some(overscan);
        self
    }

    pub fn with_sticky_indices(mut self, sticky_indices: impl Into<Vec<usize>>) -> Self {
        self.sticky_indices = Some(sticky_indices.into());
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_on_change(
        mut self,
        f: impl Fn(&[ItemData<T, S>]) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }
}

impl<T, S> Default for ConfigPatch<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// The validated, value-comparable part of the coordinator's configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ListConfig {
    pub item_size: ItemSize,
    pub estimated_size: Option<f64>,
    pub overscan: usize,
    pub sticky_indices: Vec<usize>,
    pub column: usize,
}

impl ListConfig {
    /// Merges the value fields of `patch`. Returns whether anything changed.
    ///
    /// Invalid values are skipped; the rest of the patch still applies.
    pub(crate) fn apply<T, S>(&mut self, patch: ConfigPatch<T, S>) -> bool {
        let mut changed = false;

        if let Some(item_size) = patch.item_size {
            if check_item_size(&item_size).is_err() {
                vwarn!(?item_size, "ignoring invalid item_size");
            } else if item_size != self.item_size {
                self.item_size = item_size;
                changed = true;
            }
        }

        if let Some(estimated_size) = patch.estimated_size {
            if check_estimated_size(Some(estimated_size)).is_err() {
                vwarn!(estimated_size, "ignoring invalid estimated_size");
            } else if self.estimated_size != Some(estimated_size) {
                self.estimated_size = Some(estimated_size);
                changed = true;
            }
        }

        if let Some(overscan) = patch.overscan.filter(|&o| o != self.overscan) {
            self.overscan = overscan;
            changed = true;
        }

        if let Some(sticky_indices) = patch.sticky_indices {
            if check_sticky_indices(&sticky_indices).is_err() {
                vwarn!(?sticky_indices, "ignoring unsorted sticky_indices");
            } else if sticky_indices != self.sticky_indices {
                self.sticky_indices = sticky_indices;
                changed = true;
            }
        }

        if let Some(column) = patch.column {
            if check_column(column).is_err() {
                vwarn!(column, "ignoring invalid column");
            } else if column != self.column {
                self.column = column;
                changed = true;
            }
        }

        changed
    }

    pub fn is_sticky(&self, index: usize) -> bool {
        self.sticky_indices.binary_search(&index).is_ok()
    }
}

fn check_item_size(item_size: &ItemSize) -> Result<()> {
    match item_size.fixed() {
        Some(size) if !size.is_finite() || size < 0.0 => Err(Error::InvalidItemSize(size)),
        _ => Ok(()),
    }
}

fn check_estimated_size(estimated_size: Option<f64>) -> Result<()> {
    match estimated_size {
        Some(size) if !size.is_finite() || size <= 0.0 => Err(Error::InvalidEstimatedSize(size)),
        _ => Ok(()),
    }
}

fn check_sticky_indices(sticky_indices: &[usize]) -> Result<()> {
    if sticky_indices.windows(2).all(|pair| pair[0] < pair[1]) {
        Ok(())
    } else {
        Err(Error::UnsortedStickyIndices)
    }
}

fn check_column(column: usize) -> Result<()> {
    if column == 0 {
        Err(Error::InvalidColumn(column))
    } else {
        Ok(())
    }
}
