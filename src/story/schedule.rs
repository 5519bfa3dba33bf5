//! Deferred work of the current page: timers and pending text actions.
//!
//! The scheduler runs on a virtual clock which only moves when the interpreter is told
//! that time has passed. All work belongs to the page it was scheduled from and is
//! dropped when a new fork is loaded.

use crate::{line::TextQuery, node::NodeId};

use std::time::Duration;

/// Longest delay a timer can be scheduled with.
const MAX_DELAY_SECONDS: f64 = 1.0e9;

#[derive(Clone, Debug, PartialEq)]
/// Block which is processed once its due time is reached.
pub struct Timer {
    pub due: Duration,
    pub node: NodeId,
    /// Submitted text which was bound when the timer was scheduled.
    pub text: Option<String>,
    sequence: u64,
}

#[derive(Clone, Debug, PartialEq)]
/// Block which is processed when submitted text matches its query.
pub struct TextAction {
    pub node: NodeId,
    pub query: TextQuery,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    /// Incremented every time all work is dropped.
    generation: u64,
    timers: Vec<Timer>,
    actions: Vec<TextAction>,
    /// Order timers were added in, to fire timers with the same due time in order.
    sequence: u64,
}

impl Scheduler {
    /// Current time on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Identifies the set of scheduled work. Changes when the work is dropped.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop all timers and actions.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.actions.clear();
        self.generation += 1;
    }

    /// Schedule a block to be processed after a number of seconds.
    pub fn add_timer(&mut self, seconds: f64, node: NodeId, text: Option<&str>) -> Duration {
        let delay = Duration::from_secs_f64(seconds.max(0.0).min(MAX_DELAY_SECONDS));
        let due = self.now + delay;

        self.timers.push(Timer {
            due,
            node,
            text: text.map(str::to_string),
            sequence: self.sequence,
        });

        self.sequence += 1;

        due
    }

    pub fn add_action(&mut self, node: NodeId, query: TextQuery) {
        self.actions.push(TextAction { node, query });
    }

    /// Actions waiting for submitted text, in the order they were added.
    pub fn actions(&self) -> &[TextAction] {
        &self.actions
    }

    /// Remove and return the earliest timer which is due at or before a time.
    ///
    /// The clock is moved to the due time of the returned timer.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.sequence))
            .map(|(i, _)| i)?;

        let timer = self.timers.remove(index);
        self.now = self.now.max(timer.due);

        Some(timer)
    }

    /// Move the clock forward to a time. The clock never moves backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Time left until the earliest timer is due.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|timer| timer.due)
            .min()
            .map(|due| due.checked_sub(self.now).unwrap_or_default())
    }
}
