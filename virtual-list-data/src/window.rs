#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::HashMap;

use virtual_list::{
    Align, Axis, CellSize, ItemSize, ManagerUpdate, SizeAndPositionManager, SizeGetter,
    estimated_size_getter,
};

use crate::{Entry, ItemData, ListState, Result, RowItem, Updater};

/// Stacking order given to sticky items.
pub const DEFAULT_Z_INDEX: u32 = 10;

#[cfg(feature = "std")]
type StyleMap = HashMap<usize, ItemStyle>;
#[cfg(not(feature = "std"))]
type StyleMap = BTreeMap<usize, ItemStyle>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    #[default]
    Absolute,
    /// Stays pinned while the list scrolls past it.
    Sticky,
}

/// Placement of one rendered slot along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub position: Position,
    /// Leading edge of the slot.
    pub offset: f64,
    /// `None` lets the view size the slot itself (dynamic mode, not measured yet).
    pub size: Option<f64>,
    /// `None` means the view's default stacking.
    pub z_index: Option<u32>,
}

impl ItemStyle {
    pub fn absolute(offset: f64, size: Option<f64>) -> Self {
        Self {
            position: Position::Absolute,
            offset,
            size,
            z_index: None,
        }
    }

    pub fn sticky(offset: f64, size: Option<f64>) -> Self {
        Self {
            position: Position::Sticky,
            offset,
            size,
            z_index: Some(DEFAULT_Z_INDEX),
        }
    }
}

/// View-side settings of a [`ListWindow`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowOptions {
    pub axis: Axis,
    /// Viewport extent along `axis`.
    pub container_size: f64,
    pub scroll_offset: f64,
    /// Alignment used by [`ListWindow::scroll_offset_for_index`].
    pub align: Align,
    /// Read sizes from measurements reported with [`ListWindow::record_measured_size`] instead
    /// of the configured item size.
    pub dynamic: bool,
}

impl WindowOptions {
    pub fn new(container_size: f64) -> Self {
        Self {
            axis: Axis::default(),
            container_size,
            scroll_offset: 0.0,
            align: Align::default(),
            dynamic: false,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_scroll_offset(mut self, scroll_offset: f64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// The default [`Updater`]: maps the rows overlapping the viewport to positioned descriptors.
///
/// It owns the list's [`SizeAndPositionManager`] for its whole life and keeps it in sync with
/// the coordinator's state, invalidating only as much of the measured prefix as a change
/// requires.
#[derive(Debug)]
pub struct ListWindow {
    manager: SizeAndPositionManager,
    options: WindowOptions,
    // Last state seen through `state_changed`.
    item_count: usize,
    item_size: ItemSize,
    estimated_size: Option<f64>,
    sticky_indices: Vec<usize>,
    column: usize,
    overscan: usize,
    styles: StyleMap,
}

impl ListWindow {
    pub fn new(options: WindowOptions) -> Self {
        let item_size = ItemSize::default();
        let manager = SizeAndPositionManager::new(
            0,
            Self::size_getter(&options, &item_size),
            estimated_size_getter(None, &item_size),
        );
        Self {
            manager,
            options,
            item_count: 0,
            item_size,
            estimated_size: None,
            sticky_indices: Vec::new(),
            column: crate::DEFAULT_COLUMN,
            overscan: virtual_list::DEFAULT_OVERSCAN,
            styles: StyleMap::default(),
        }
    }

    fn size_getter(options: &WindowOptions, item_size: &ItemSize) -> SizeGetter {
        if options.dynamic {
            SizeGetter::Measured(options.axis)
        } else {
            item_size.getter()
        }
    }

    pub fn manager(&self) -> &SizeAndPositionManager {
        &self.manager
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn scroll_offset(&self) -> f64 {
        self.options.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.options.scroll_offset = scroll_offset;
    }

    pub fn container_size(&self) -> f64 {
        self.options.container_size
    }

    pub fn set_container_size(&mut self, container_size: f64) {
        self.options.container_size = container_size;
    }

    pub fn total_size(&self) -> f64 {
        self.manager.get_total_size()
    }

    /// Drops cached styles and re-measures from `index` on the next query.
    pub fn recompute_sizes(&mut self, index: usize) {
        self.styles.clear();
        self.manager.reset_item(index);
    }

    /// Stores a size reported by the view and invalidates from `index`.
    pub fn record_measured_size(&mut self, index: usize, size: CellSize) {
        vtrace!(index, width = size.width, height = size.height, "record_measured_size");
        self.manager.cell_cache_mut().set(index, size);
        self.recompute_sizes(index);
    }

    /// Scroll offset that reveals `index` with the configured alignment.
    ///
    /// An index outside the list scrolls to the first item.
    pub fn scroll_offset_for_index(&mut self, index: usize) -> Result<f64> {
        let count = self.manager.item_count();
        if count == 0 {
            return Ok(0.0);
        }
        let index = if index < count { index } else { 0 };
        let offset = self.manager.get_updated_offset_for_index(
            self.options.align,
            index,
            self.options.scroll_offset,
            self.options.container_size,
        )?;
        Ok(offset)
    }

    fn style(&mut self, index: usize, sticky: bool) -> Result<ItemStyle> {
        if let Some(style) = self.styles.get(&index) {
            return Ok(*style);
        }

        let item = self.manager.get_size_and_position_for_index(index)?;
        let size = if self.options.dynamic {
            self.manager
                .cell_cache()
                .get(index)
                .map(|cell| cell.along(self.options.axis))
                .filter(|&size| size > 0.0)
        } else {
            Some(item.size)
        };

        let style = if sticky {
            ItemStyle::sticky(item.offset, size)
        } else {
            ItemStyle::absolute(item.offset, size)
        };
        self.styles.insert(index, style);
        Ok(style)
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::new(WindowOptions::default())
    }
}

impl<T: Clone, S: Clone> Updater<T, S> for ListWindow {
    fn state_changed(&mut self, state: &ListState<'_, T, S>) {
        let config = state.config;
        let mut update = ManagerUpdate::default();
        let mut reset_from = None;

        let item_count = state.rows.len();
        if item_count != self.item_count {
            update = update.with_item_count(item_count);
            if item_count < self.item_count {
                reset_from = Some(item_count);
            }
            self.item_count = item_count;
        }

        if config.item_size != self.item_size || config.estimated_size != self.estimated_size {
            update = update
                .with_item_size_getter(Self::size_getter(&self.options, &config.item_size))
                .with_estimated_size_getter(estimated_size_getter(
                    config.estimated_size,
                    &config.item_size,
                ));
            self.item_size = config.item_size.clone();
            self.estimated_size = config.estimated_size;
            reset_from = Some(0);
        }

        if config.sticky_indices != self.sticky_indices || config.column != self.column {
            self.sticky_indices.clone_from(&config.sticky_indices);
            self.column = config.column;
            reset_from = Some(0);
        }

        // Rows at and after the first changed element may hold different entries.
        if let Some(index) = state.first_changed {
            let row = state.rows.first_row_touching(index);
            reset_from = Some(reset_from.map_or(row, |from: usize| from.min(row)));
        }

        self.overscan = config.overscan;
        self.manager.update_config(update);
        if let Some(index) = reset_from {
            self.manager.reset_item(index);
        }
        self.styles.clear();
    }

    fn update(&mut self, state: &ListState<'_, T, S>) -> Result<Vec<ItemData<T, S>>> {
        let mut items = Vec::new();
        let Some(range) = self.manager.get_visible_range(
            self.options.scroll_offset,
            self.options.container_size,
            self.overscan,
        )?
        else {
            return Ok(items);
        };

        if state.config.column > 1 {
            items.reserve(range.count());
            for row in range.iter() {
                let Some(group) = state.rows.get(row).and_then(|span| state.data.get(span)) else {
                    continue;
                };
                let style = self.style(row, false)?;
                let group: Vec<Entry<T, S>> = group.to_vec();
                items.push(ItemData {
                    index: row,
                    style,
                    item: RowItem::Group(group),
                });
            }
            return Ok(items);
        }

        items.reserve(state.config.sticky_indices.len() + range.count());
        for &index in &state.config.sticky_indices {
            let Some(entry) = state.data.get(index) else {
                vwarn!(index, len = state.data.len(), "sticky index out of range");
                continue;
            };
            let style = self.style(index, true)?;
            items.push(ItemData {
                index,
                style,
                item: RowItem::Single(entry.clone()),
            });
        }

        for index in range.iter() {
            if state.config.is_sticky(index) {
                continue;
            }
            let Some(entry) = state.data.get(index) else {
                continue;
            };
            let style = self.style(index, false)?;
            items.push(ItemData {
                index,
                style,
                item: RowItem::Single(entry.clone()),
            });
        }

        Ok(items)
    }
}
