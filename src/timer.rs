//! Clock and single-shot timer plumbing.
//!
//! Everything here is single-threaded. The host drives [`TimerQueue`] from
//! its event loop by calling [`TimerQueue::run_due`] whenever the next
//! deadline may have passed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock backed by [`Instant`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Opaque handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

pub type Task = Box<dyn FnOnce()>;

/// Single-shot delayed callbacks with cancellation.
pub trait Scheduler {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Cancel a pending task. Returns `false` if it already ran or was canceled.
    fn cancel(&self, handle: TimerHandle) -> bool;

    fn is_pending(&self, handle: TimerHandle) -> bool;
}

struct Entry {
    deadline: Duration,
    task: Task,
}

/// Deadline-ordered timer queue driven by the host loop.
pub struct TimerQueue {
    clock: Rc<dyn Clock>,
    next_id: Cell<u64>,
    entries: RefCell<BTreeMap<TimerHandle, Entry>>,
}

impl TimerQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: Cell::new(1),
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    /// Number of tasks still waiting
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Earliest deadline among pending tasks
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.borrow().values().map(|e| e.deadline).min()
    }

    /// Time left until the earliest deadline, zero if already overdue
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Run every task whose deadline has passed, in deadline order.
    ///
    /// Each task is removed before it runs and the queue is not borrowed while
    /// it runs, so tasks may schedule or cancel freely. Tasks scheduled by a
    /// running task are not run in the same pass.
    pub fn run_due(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<(Duration, TimerHandle)> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, e)| e.deadline <= now)
            .map(|(h, e)| (e.deadline, *h))
            .collect();
        due.sort();

        let mut ran = 0;
        for (_, handle) in due {
            // An earlier task in this pass may have canceled this one
            let entry = self.entries.borrow_mut().remove(&handle);
            if let Some(entry) = entry {
                (entry.task)();
                ran += 1;
            }
        }
        ran
    }

    /// Drop every pending task without running it
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handle = TimerHandle(id);
        let deadline = self.clock.now() + delay;
        self.entries
            .borrow_mut()
            .insert(handle, Entry { deadline, task });
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.entries.borrow_mut().remove(&handle).is_some()
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.borrow().contains_key(&handle)
    }
}
