use crate::{DataCoordinator, Updater};

/// Identifies the sentinels inserted by one [`DataCoordinator::set_load_status`] call.
///
/// Ids are unique per coordinator and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusId(pub(crate) u64);

impl StatusId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A ready-made load-status payload. Any caller type can be used instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    #[default]
    Loading,
    /// No more data will arrive.
    End,
    Failed,
}

/// A sentinel row: the generated id plus whatever the caller passed to
/// [`DataCoordinator::set_load_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStatus<S = StatusKind> {
    pub id: StatusId,
    pub data: S,
}

/// One element of the coordinator's sequence: real data or a load-status sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entry<T, S = StatusKind> {
    Item(T),
    Status(LoadStatus<S>),
}

impl<T, S> Entry<T, S> {
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Status(_) => None,
        }
    }

    pub fn status(&self) -> Option<&LoadStatus<S>> {
        match self {
            Self::Item(_) => None,
            Self::Status(status) => Some(status),
        }
    }

    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Status(_) => None,
        }
    }

    /// Whether this is a sentinel with `id`, or any sentinel when `id` is `None`.
    pub(crate) fn is_status_with(&self, id: Option<StatusId>) -> bool {
        self.status()
            .is_some_and(|status| id.is_none_or(|id| status.id == id))
    }
}

impl<T, S> From<T> for Entry<T, S> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}

/// Returned by [`DataCoordinator::set_load_status`].
///
/// Replacing the sentinel with real data works exactly once; see [`Self::clear_and_add_data`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves the sentinel in place until `clear_all_load_status`"]
pub struct LoadStatusHandle {
    id: StatusId,
    used: bool,
}

impl LoadStatusHandle {
    pub(crate) fn new(id: StatusId) -> Self {
        Self { id, used: false }
    }

    pub fn id(&self) -> StatusId {
        self.id
    }

    /// Whether [`Self::clear_and_add_data`] already ran.
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Removes every sentinel carrying this handle's id and appends `items`.
    ///
    /// Only the first call has an effect; later calls return `false` and leave the sequence
    /// untouched.
    pub fn clear_and_add_data<T, S, U: Updater<T, S>>(
        &mut self,
        coordinator: &mut DataCoordinator<T, S, U>,
        items: impl IntoIterator<Item = T>,
    ) -> bool {
        if self.used {
            vtrace!(id = self.id.0, "clear_and_add_data: already used");
            return false;
        }
        self.used = true;
        coordinator.replace_load_status(self.id, items);
        true
    }
}
