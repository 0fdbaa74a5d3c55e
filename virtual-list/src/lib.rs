//! An incremental size-and-position index for virtualized lists.
//!
//! For the data side (mutations, load-status rows, debounced change notifications), see the
//! `virtual-list-data` crate.
//!
//! This crate answers the geometric questions a virtualized list asks on every frame: where
//! item `i` starts, how long the whole list is, which items overlap the viewport, and where to
//! scroll to reveal an item. Sizes may be constant, tabulated, computed per index, or measured
//! after render; they are read lazily and cached behind a measurement frontier.
//!
//! It is UI-agnostic. A view layer is expected to provide:
//! - the container size along the scroll axis
//! - the current scroll offset
//! - (dynamic mode) the measured size of rendered items
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cell_cache;
mod error;
mod item_size;
mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use cell_cache::CellCache;
pub use error::{Error, Result};
pub use item_size::{EstimatedSizeGetter, ItemSize, SizeFn, SizeGetter, estimated_size_getter};
pub use manager::{ManagerUpdate, SizeAndPositionManager};
pub use types::{
    Align, Axis, CellSize, DEFAULT_ITEM_SIZE, DEFAULT_OVERSCAN, SizeAndPosition, VisibleRange,
};
