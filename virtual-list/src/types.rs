/// Default extent used when neither an estimate nor a fixed item size is configured.
pub const DEFAULT_ITEM_SIZE: f64 = 50.0;

/// Default number of items rendered beyond each edge of the visible range.
pub const DEFAULT_OVERSCAN: usize = 3;

/// How a target item is placed in the viewport by
/// [`crate::SizeAndPositionManager::get_updated_offset_for_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scroll as little as possible; keep the offset if the item is already fully visible.
    #[default]
    Auto,
}

/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Geometry of one item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeAndPosition {
    /// Sum of the sizes of all preceding items.
    pub offset: f64,
    pub size: f64,
}

impl SizeAndPosition {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }
}

/// A measured item box reported by the view layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `axis` (`height` for vertical lists).
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

/// Inclusive index bounds of the items to render, overscan included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl VisibleRange {
    pub fn count(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn iter(&self) -> core::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}
