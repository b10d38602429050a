//! Virtual-time scheduler.
//!
//! Every delayed step in the game (emerge, dwell, removal, spawn retry,
//! projectile lifespan, countdown) is a `TimerAction` queued here. Actions are
//! data rather than closures; the engine dispatches them when they come due.
//! Time only moves when the engine advances it, so tests drive the clock
//! deterministically.

use std::collections::{BTreeMap, HashMap};

use burrow_core::enums::RemovalCause;
use burrow_core::types::{ProjectileId, TargetId, TimerHandle};

/// A deferred step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Spawner's next attempt.
    SpawnAttempt,
    /// Target finished its spawn delay.
    Emerge(TargetId),
    /// Target's dwell expired.
    Retreat(TargetId),
    /// Target's retreat or hit animation finished.
    RemoveTarget(TargetId, RemovalCause),
    /// Projectile lifespan elapsed.
    ExpireProjectile(ProjectileId),
    /// One-second countdown step.
    Countdown,
}

/// Scheduling surface handed to systems.
pub trait Scheduler {
    /// Current virtual time (ms).
    fn now_ms(&self) -> u64;

    /// Queue `action` to run `delay_ms` from now.
    fn schedule_after(&mut self, delay_ms: u64, action: TimerAction) -> TimerHandle;

    /// Cancel a pending action. Returns false if it already ran or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Timer queue ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<(u64, u64), TimerAction>,
    due_by_seq: HashMap<u64, u64>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the earliest action due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, TimerAction)> {
        let (&(due, seq), _) = self.pending.first_key_value()?;
        if due > until_ms {
            return None;
        }
        let action = self.pending.remove(&(due, seq))?;
        self.due_by_seq.remove(&seq);
        self.now_ms = self.now_ms.max(due);
        Some((TimerHandle(seq), action))
    }

    /// Move the clock forward. Never moves it backward.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_by_seq.contains_key(&handle.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending action.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|&(due, _)| due)
    }
}

impl Scheduler for TimerQueue {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_after(&mut self, delay_ms: u64, action: TimerAction) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now_ms + delay_ms;
        self.pending.insert((due, seq), action);
        self.due_by_seq.insert(seq, due);
        TimerHandle(seq)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_by_seq.remove(&handle.0) {
            Some(due) => self.pending.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }
}
