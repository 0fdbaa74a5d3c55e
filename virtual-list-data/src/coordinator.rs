use alloc::vec::Vec;

use virtual_list::CellSize;

use crate::{
    ConfigPatch, Entry, ItemStyle, ListConfig, ListOptions, ListWindow, LoadStatus,
    LoadStatusHandle, OnChangeCallback, Result, RowLayout, StatusId, StatusKind, UpdateScheduler,
};

/// What a rendered slot holds: one element, or a packed row when `column > 1`.
#[derive(Clone, Debug, PartialEq)]
pub enum RowItem<T, S = StatusKind> {
    Single(Entry<T, S>),
    Group(Vec<Entry<T, S>>),
}

impl<T, S> RowItem<T, S> {
    pub fn entries(&self) -> &[Entry<T, S>] {
        match self {
            Self::Single(entry) => core::slice::from_ref(entry),
            Self::Group(entries) => entries,
        }
    }
}

/// A render-ready descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemData<T, S = StatusKind> {
    /// Row index (equal to the sequence index when `column == 1`).
    pub index: usize,
    pub style: ItemStyle,
    pub item: RowItem<T, S>,
}

impl<T, S> ItemData<T, S> {
    pub fn layout(&self) -> ItemLayout {
        ItemLayout {
            index: self.index,
            style: self.style,
        }
    }
}

/// The part of an [`ItemData`] compared to decide whether listeners must be notified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemLayout {
    pub index: usize,
    pub style: ItemStyle,
}

/// A read-only view of the coordinator handed to its [`Updater`].
#[derive(Debug)]
pub struct ListState<'a, T, S = StatusKind> {
    pub data: &'a [Entry<T, S>],
    pub rows: &'a RowLayout,
    pub config: &'a ListConfig,
    /// Every element from this sequence index on may have changed. `None` when the sequence
    /// itself is untouched (configuration change, new updater).
    pub first_changed: Option<usize>,
}

/// Turns the coordinator's state into descriptors.
///
/// [`ListWindow`] is the stock implementation; a view can install its own.
pub trait Updater<T, S = StatusKind> {
    /// Called synchronously after every mutation or effective configuration change.
    fn state_changed(&mut self, state: &ListState<'_, T, S>);

    /// Computes the descriptors to render for `state`.
    fn update(&mut self, state: &ListState<'_, T, S>) -> Result<Vec<ItemData<T, S>>>;
}

/// Owns a list's data and decides when the view must re-render.
///
/// Mutations never notify directly. They resync the updater and schedule one deferred
/// recompute; the host runs it with [`Self::tick`] on its next task-queue turn. However many
/// mutations happen before that, listeners see a single `on_change` call with the latest state,
/// and none at all if the descriptors came out unchanged.
///
/// `S` is the payload carried by load-status sentinels.
pub struct DataCoordinator<T, S = StatusKind, U = ListWindow> {
    data: Vec<Entry<T, S>>,
    rows: RowLayout,
    config: ListConfig,
    on_change: OnChangeCallback<T, S>,
    updater: U,
    scheduler: UpdateScheduler,
    last_layout: Option<Vec<ItemLayout>>,
    next_status_id: u64,
}

impl<T, S, U: Updater<T, S>> DataCoordinator<T, S, U> {
    pub fn new(options: ListOptions<T, S>, updater: U) -> Result<Self> {
        let (config, on_change) = options.into_parts()?;
        vdebug!(
            column = config.column,
            overscan = config.overscan,
            "DataCoordinator::new"
        );

        let mut coordinator = Self {
            data: Vec::new(),
            rows: RowLayout::pack::<T, S>(&[], config.column),
            config,
            on_change,
            updater,
            scheduler: UpdateScheduler::new(),
            last_layout: None,
            next_status_id: 0,
        };
        coordinator.notify_state_change(None);
        Ok(coordinator)
    }

    pub fn get(&self) -> &[Entry<T, S>] {
        &self.data
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn rows(&self) -> &RowLayout {
        &self.rows
    }

    /// Number of virtualized slots: the sequence length, or the packed row count when
    /// `column > 1`.
    pub fn get_item_count(&self) -> usize {
        self.rows.len()
    }

    pub fn updater(&self) -> &U {
        &self.updater
    }

    pub fn updater_mut(&mut self) -> &mut U {
        &mut self.updater
    }

    /// Installs a new updater, synchronizes it and schedules a recompute. Returns the old one.
    pub fn set_updater(&mut self, updater: U) -> U {
        let previous = core::mem::replace(&mut self.updater, updater);
        self.notify_state_change(None);
        self.request_update();
        previous
    }

    /// Appends items. Returns the new sequence length.
    pub fn push(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let start = self.data.len();
        self.data.extend(items.into_iter().map(Entry::Item));
        self.data_changed(start);
        self.data.len()
    }

    /// Replaces the whole sequence.
    pub fn set(&mut self, items: impl IntoIterator<Item = T>) {
        self.data = items.into_iter().map(Entry::Item).collect();
        self.data_changed(0);
    }

    /// Removes `delete_count` elements at `start`, inserts `items` there and returns the
    /// removed elements. Both bounds are clamped to the sequence.
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Vec<Entry<T, S>> {
        let start = start.min(self.data.len());
        let end = start + delete_count.min(self.data.len() - start);
        let removed = self
            .data
            .splice(start..end, items.into_iter().map(Entry::Item))
            .collect();
        self.data_changed(start);
        removed
    }

    pub fn pop(&mut self) -> Option<Entry<T, S>> {
        let entry = self.data.pop()?;
        self.data_changed(self.data.len());
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.data_changed(0);
    }

    /// Merges `patch` into the configuration.
    ///
    /// A recompute is scheduled only if a value actually changed; replacing the callback alone
    /// does not count. Invalid fields are logged and skipped.
    pub fn update_config(&mut self, mut patch: ConfigPatch<T, S>) {
        if let Some(on_change) = patch.on_change.take() {
            self.on_change = on_change;
        }

        if !self.config.apply(patch) {
            vtrace!("update_config: nothing changed");
            return;
        }

        if self.rows.column() != self.config.column {
            self.rows = RowLayout::pack(&self.data, self.config.column);
        }
        self.notify_state_change(None);
        self.request_update();
    }

    /// Appends a sentinel carrying `data` and returns the handle that replaces it with items.
    pub fn set_load_status(&mut self, data: S) -> LoadStatusHandle {
        let id = StatusId(self.next_status_id);
        self.next_status_id += 1;

        vtrace!(id = id.0, "set_load_status");
        let start = self.data.len();
        self.data.push(Entry::Status(LoadStatus { id, data }));
        self.data_changed(start);
        LoadStatusHandle::new(id)
    }

    /// Removes the sentinels with `id`, or every sentinel when `id` is `None`. Returns how many
    /// were removed.
    pub fn clear_all_load_status(&mut self, id: Option<StatusId>) -> usize {
        let Some(first) = self.data.iter().position(|entry| entry.is_status_with(id)) else {
            return 0;
        };
        let removed = self.remove_status(id);
        self.data_changed(first);
        removed
    }

    pub(crate) fn replace_load_status(&mut self, id: StatusId, items: impl IntoIterator<Item = T>) {
        let first = self
            .data
            .iter()
            .position(|entry| entry.is_status_with(Some(id)));
        self.remove_status(Some(id));
        let start = first.unwrap_or(self.data.len());
        self.data.extend(items.into_iter().map(Entry::Item));
        self.data_changed(start);
    }

    /// Schedules a recompute for the next [`Self::tick`], replacing any pending one.
    pub fn request_update(&mut self) {
        self.scheduler.schedule(false);
    }

    pub fn has_pending_update(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Runs the pending recompute, if any. Returns whether one ran.
    ///
    /// The host calls this once per turn of its task queue.
    pub fn tick(&mut self) -> Result<bool> {
        let Some(task) = self.scheduler.take_pending() else {
            return Ok(false);
        };
        self.run_update(task.is_forced())?;
        Ok(true)
    }

    /// Recomputes now and notifies even if nothing changed.
    pub fn force_update(&mut self) -> Result<()> {
        self.run_update(true)?;
        Ok(())
    }

    /// Cancels the pending recompute and releases the updater and the callback.
    pub fn destroy(mut self) {
        self.scheduler.cancel_pending();
        vdebug!(len = self.data.len(), "DataCoordinator::destroy");
    }

    /// Returns whether `on_change` was called.
    fn run_update(&mut self, forced: bool) -> Result<bool> {
        let state = ListState {
            data: &self.data,
            rows: &self.rows,
            config: &self.config,
            first_changed: None,
        };
        let items = self.updater.update(&state)?;
        let layout: Vec<ItemLayout> = items.iter().map(ItemData::layout).collect();

        if !forced && self.last_layout.as_ref() == Some(&layout) {
            vtrace!(len = layout.len(), "update suppressed");
            return Ok(false);
        }

        vtrace!(len = layout.len(), forced, "update emitted");
        self.last_layout = Some(layout);
        (self.on_change)(&items);
        Ok(true)
    }

    fn data_changed(&mut self, first_changed: usize) {
        self.rows = RowLayout::pack(&self.data, self.config.column);
        self.notify_state_change(Some(first_changed));
        self.request_update();
    }

    fn notify_state_change(&mut self, first_changed: Option<usize>) {
        let state = ListState {
            data: &self.data,
            rows: &self.rows,
            config: &self.config,
            first_changed,
        };
        self.updater.state_changed(&state);
    }

    fn remove_status(&mut self, id: Option<StatusId>) -> usize {
        let before = self.data.len();
        self.data.retain(|entry| !entry.is_status_with(id));
        before - self.data.len()
    }
}

impl<T: Clone, S: Clone> DataCoordinator<T, S, ListWindow> {
    /// Records the viewport's scroll offset and schedules a recompute.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.updater.set_scroll_offset(scroll_offset);
        self.request_update();
    }

    pub fn set_container_size(&mut self, container_size: f64) {
        self.updater.set_container_size(container_size);
        self.request_update();
    }

    /// Feeds a measured size back into the window.
    ///
    /// The next [`Self::tick`] notifies unconditionally, even if another request replaced this
    /// one in the meantime.
    pub fn record_measured_size(&mut self, index: usize, size: CellSize) {
        self.updater.record_measured_size(index, size);
        self.scheduler.schedule(true);
    }

    pub fn scroll_offset_for_index(&mut self, index: usize) -> Result<f64> {
        self.updater.scroll_offset_for_index(index)
    }

    pub fn total_size(&self) -> f64 {
        self.updater.total_size()
    }
}

impl<T, S, U> core::fmt::Debug for DataCoordinator<T, S, U>
where
    T: core::fmt::Debug,
    S: core::fmt::Debug,
    U: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataCoordinator")
            .field("data", &self.data)
            .field("config", &self.config)
            .field("updater", &self.updater)
            .field("pending", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}
