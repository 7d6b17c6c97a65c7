//! Deferred one-shot effects
//!
//! Handlers may ask the session to do something later (print a warning, open
//! a link). Tasks are queued against a virtual clock that the host advances,
//! so the whole thing stays single-threaded and deterministic under test.
//!
//! A task can carry a follow-up. The follow-up is scheduled relative to the
//! moment its parent fires and inherits the parent's [`TaskToken`], so
//! cancelling the token cancels the rest of the chain.

use std::fmt;
use std::time::Duration;

use uuid::Uuid;

use crate::models::OutputEntry;

/// Handle for cancelling a scheduled chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(Uuid);

impl TaskToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a task does when it fires
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredAction {
    /// Append entries to the log
    Append(Vec<OutputEntry>),
    /// Open a resource externally, then append the confirmation
    OpenResource {
        url: String,
        confirmation: Vec<OutputEntry>,
    },
}

/// A delayed action with an optional follow-up
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredTask {
    pub delay: Duration,
    pub action: DeferredAction,
    pub then: Option<Box<DeferredTask>>,
}

impl DeferredTask {
    /// Run `action` after `delay`
    pub fn after(delay: Duration, action: DeferredAction) -> Self {
        Self {
            delay,
            action,
            then: None,
        }
    }

    /// Append `next` to the end of this chain
    pub fn then(mut self, next: DeferredTask) -> Self {
        let tail = match self.then.take() {
            Some(existing) => (*existing).then(next),
            None => next,
        };
        self.then = Some(Box::new(tail));
        self
    }

    /// Number of steps in this chain
    pub fn chain_len(&self) -> usize {
        1 + self.then.as_ref().map_or(0, |next| next.chain_len())
    }
}

/// A task that came due during [`Scheduler::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTask {
    pub token: TaskToken,
    /// Virtual time at which it fired
    pub at: Duration,
    pub action: DeferredAction,
}

#[derive(Debug)]
struct Pending {
    token: TaskToken,
    due: Duration,
    seq: u64,
    action: DeferredAction,
    then: Option<Box<DeferredTask>>,
}

/// Queue of deferred tasks on a virtual clock
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task chain; returns the token that cancels all of it
    pub fn schedule(&mut self, task: DeferredTask) -> TaskToken {
        let token = TaskToken::new();
        debug!(
            "Scheduling task {} ({} step(s), first in {:?})",
            token,
            task.chain_len(),
            task.delay
        );
        self.enqueue(token, self.now, task);
        token
    }

    fn enqueue(&mut self, token: TaskToken, from: Duration, task: DeferredTask) {
        self.seq += 1;
        self.pending.push(Pending {
            token,
            due: from + task.delay,
            seq: self.seq,
            action: task.action,
            then: task.then,
        });
    }

    /// Drop every pending step of a chain
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        let cancelled = self.pending.len() != before;
        if cancelled {
            debug!("Cancelled task {}", token);
        }
        cancelled
    }

    /// Drop everything; returns how many chains were cancelled
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Number of chains waiting to fire
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a chain is still waiting
    pub fn is_pending(&self, token: TaskToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    /// Time left until the next task fires
    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(self.now))
            .min()
    }

    /// Move the clock forward and collect everything that came due
    ///
    /// Tasks fire in deadline order, ties in scheduling order. Follow-ups
    /// that fall inside the same window fire in the same call.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<FiredTask> {
        let target = self.now + elapsed;
        let mut fired = Vec::new();

        while let Some(index) = self.next_due(target) {
            let task = self.pending.swap_remove(index);
            self.now = task.due;
            if let Some(next) = task.then {
                self.enqueue(task.token, task.due, *next);
            }
            fired.push(FiredTask {
                token: task.token,
                at: task.due,
                action: task.action,
            });
        }

        self.now = target;
        fired
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(index, _)| index)
    }
}
