//! Delayed Task Scheduling
//!
//! One-shot deferred tasks on the logical tick stream. There is no
//! cancellation; tasks that are no longer relevant re-check current state
//! when they fire and no-op.

/// A task queued for a future tick.
#[derive(Clone, Debug)]
struct Scheduled<T> {
    /// Tick at which the task becomes due.
    due: u64,
    /// Insertion sequence, for stable ordering within a tick.
    seq: u64,
    /// The task itself.
    task: T,
}

/// Tick-driven one-shot task queue.
///
/// `after` registers a task relative to the current tick; `advance` moves
/// the clock forward one tick and returns every task that became due, in
/// scheduling order.
#[derive(Clone, Debug)]
pub struct TickScheduler<T> {
    now: u64,
    next_seq: u64,
    queue: Vec<Scheduled<T>>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TickScheduler<T> {
    /// Create an empty scheduler at tick 0.
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: Vec::new(),
        }
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks still pending.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule a task to fire `delay_ticks` from now. A delay of zero
    /// fires on the next `advance`.
    pub fn after(&mut self, delay_ticks: u64, task: T) {
        let entry = Scheduled {
            due: self.now.saturating_add(delay_ticks),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(entry);
    }

    /// Advance the clock one tick and drain every due task.
    pub fn advance(&mut self) -> Vec<T> {
        self.now += 1;
        let now = self.now;

        let mut due: Vec<Scheduled<T>> = Vec::new();
        let mut remaining: Vec<Scheduled<T>> = Vec::new();
        for entry in self.queue.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.queue = remaining;

        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.task).collect()
    }
}
