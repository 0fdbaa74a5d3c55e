/// A scheduled recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskHandle {
    id: u64,
    forced: bool,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Forced tasks notify even when the output did not change.
    pub fn is_forced(&self) -> bool {
        self.forced
    }
}

/// A single-slot deferred task queue.
///
/// At most one recompute is pending at a time. Scheduling again replaces the pending task, so
/// any number of requests before the next [`Self::take_pending`] collapse into one run. A
/// forced request stays forced when a plain one replaces it.
#[derive(Clone, Debug, Default)]
pub struct UpdateScheduler {
    next_id: u64,
    pending: Option<TaskHandle>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, forced: bool) -> TaskHandle {
        vtrace!(replaced = ?self.pending, forced, "schedule");
        let forced = forced || self.pending.is_some_and(|task| task.forced);

        let task = TaskHandle {
            id: self.next_id,
            forced,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(task);
        task
    }

    pub fn cancel_pending(&mut self) -> Option<TaskHandle> {
        let task = self.pending.take();
        vtrace!(cancelled = ?task, "cancel_pending");
        task
    }

    /// Removes the pending task so the caller can run it.
    pub fn take_pending(&mut self) -> Option<TaskHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
