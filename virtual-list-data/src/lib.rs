//! Data coordination for the `virtual-list` crate.
//!
//! `virtual-list` answers geometric questions. This crate owns the list's data and turns it into
//! render descriptors:
//!
//! - [`DataCoordinator`]: the item sequence and its configuration, batched mutations, and
//!   change notification that stays silent when nothing observable changed
//! - load-status sentinels ("loading…", "no more data") for infinite scrolling
//! - column packing of consecutive items into rows
//! - [`ListWindow`]: the updater that maps the visible rows to positioned descriptors
//!
//! Recomputes are deferred: the host calls [`DataCoordinator::tick`] on each turn of its task
//! queue (timer, frame callback, event loop iteration).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod coordinator;
mod entry;
mod error;
mod rows;
mod scheduler;
mod window;


pub use config::{ConfigPatch, DEFAULT_COLUMN, ListConfig, ListOptions, OnChangeCallback};
pub use coordinator::{DataCoordinator, ItemData, ItemLayout, ListState, RowItem, Updater};
pub use entry::{Entry, LoadStatus, LoadStatusHandle, StatusId, StatusKind};
pub use error::{Error, Result};
pub use rows::RowLayout;
pub use scheduler::{TaskHandle, UpdateScheduler};
pub use window::{DEFAULT_Z_INDEX, ItemStyle, ListWindow, Position, WindowOptions};
