//! Clock and one-shot scheduling seams, plus a deterministic virtual-time
//! implementation of both.
//!
//! The controller never sleeps or spawns timers. It asks an injected
//! [`Timeline`] to start and stop the repeating clock and to schedule
//! deferred tasks, then pulls due [`Wakeup`]s out of it one at a time while
//! time is advanced. Tests advance [`ManualTimeline`] by hand; the terminal
//! front-end advances the same type by measured wall-clock deltas.

use std::time::Duration;

use tracing::{debug, instrument, trace};

/// A repeating tick source.
pub trait Clock {
    /// Starts ticking every `interval`, replacing any clock already running.
    fn start(&mut self, interval: Duration);

    /// Stops ticking. Does nothing if the clock is not running.
    fn stop(&mut self);

    /// Returns true while the clock is ticking.
    fn is_running(&self) -> bool;
}

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("task#{_0}")]
pub struct TaskId(u64);

/// A one-shot "after delay" scheduling primitive.
pub trait Scheduler<T> {
    /// Schedules `task` to come due `delay` from now.
    fn schedule(&mut self, delay: Duration, task: T) -> TaskId;

    /// Drops every task that has not come due yet.
    fn cancel_all(&mut self);

    /// Number of tasks waiting to come due.
    fn pending(&self) -> usize;
}

/// Something that came due on a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wakeup<T> {
    /// The repeating clock ticked.
    Tick,
    /// A scheduled task came due.
    Deferred(T),
}

/// A clock and scheduler sharing one notion of "now".
pub trait Timeline<T>: Clock + Scheduler<T> {
    /// Current time since the timeline was created.
    fn now(&self) -> Duration;

    /// Pops the earliest wakeup due at or before `deadline`, moving "now" to
    /// its due time. Returns `None` once nothing else is due.
    ///
    /// Callers dispatch each wakeup before asking for the next one, so a
    /// wakeup that stops the clock or schedules a task affects what follows.
    fn next_wakeup(&mut self, deadline: Duration) -> Option<Wakeup<T>>;

    /// Moves "now" to `deadline` after all due wakeups have been popped.
    fn settle(&mut self, deadline: Duration);
}

#[derive(Debug, Clone, Copy)]
struct Ticker {
    interval: Duration,
    next_tick: Duration,
}

#[derive(Debug)]
struct Scheduled<T> {
    due: Duration,
    id: TaskId,
    task: T,
}

/// Virtual-time [`Timeline`].
///
/// At equal due times a clock tick comes before tasks, and tasks come out in
/// the order they were scheduled.
#[derive(Debug)]
pub struct ManualTimeline<T> {
    now: Duration,
    ticker: Option<Ticker>,
    tasks: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> ManualTimeline<T> {
    /// Creates a timeline at time zero with no clock and no tasks.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            ticker: None,
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    fn earliest_task(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.id))
            .map(|(position, _)| position)
    }

    fn pop_task(&mut self, position: usize) -> Wakeup<T> {
        let scheduled = self.tasks.remove(position);
        self.now = self.now.max(scheduled.due);
        trace!(id = %scheduled.id, "Task due");
        Wakeup::Deferred(scheduled.task)
    }
}

impl<T> Default for ManualTimeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clock for ManualTimeline<T> {
    #[instrument(skip(self))]
    fn start(&mut self, interval: Duration) {
        if self.ticker.is_some() {
            debug!("Replacing running clock");
        }
        self.ticker = Some(Ticker {
            interval,
            next_tick: self.now + interval,
        });
    }

    #[instrument(skip(self))]
    fn stop(&mut self) {
        self.ticker = None;
    }

    fn is_running(&self) -> bool {
        self.ticker.is_some()
    }
}

impl<T> Scheduler<T> for ManualTimeline<T> {
    #[instrument(skip(self, task))]
    fn schedule(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Scheduled {
            due: self.now + delay,
            id,
            task,
        });
        trace!(%id, "Task scheduled");
        id
    }

    #[instrument(skip(self))]
    fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            debug!(cancelled = self.tasks.len(), "Cancelling pending tasks");
        }
        self.tasks.clear();
    }

    fn pending(&self) -> usize {
        self.tasks.len()
    }
}

impl<T> Timeline<T> for ManualTimeline<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn next_wakeup(&mut self, deadline: Duration) -> Option<Wakeup<T>> {
        let tick_due = self
            .ticker
            .map(|ticker| ticker.next_tick)
            .filter(|due| *due <= deadline);
        let task = self
            .earliest_task()
            .filter(|position| self.tasks[*position].due <= deadline);

        match (tick_due, task) {
            (Some(tick), Some(position)) if self.tasks[position].due < tick => {
                Some(self.pop_task(position))
            }
            (Some(tick), _) => {
                self.now = tick;
                if let Some(ticker) = self.ticker.as_mut() {
                    // Zero intervals would never let time move forward.
                    ticker.next_tick = tick + ticker.interval.max(Duration::from_millis(1));
                }
                Some(Wakeup::Tick)
            }
            (None, Some(position)) => Some(self.pop_task(position)),
            (None, None) => None,
        }
    }

    fn settle(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }
}
