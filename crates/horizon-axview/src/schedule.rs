//! Debounced rebuild scheduling.
//!
//! Rebuild triggers arrive in bursts: scroll events, assistive-technology
//! status flips, and option updates all fire several times before the view
//! settles. The scheduler coalesces them so at most one rebuild runs per
//! quiescence window, and a rebuild never runs for a task that was cancelled
//! after being scheduled.
//!
//! The scheduler never sleeps or spawns threads. It is pull-based like a
//! timer manager: the owning event loop asks [`UpdateScheduler::time_until_due`]
//! how long to wait and calls [`UpdateScheduler::fire_due`] with its own
//! clock, so all timing is driven (and testable) from the outside.

use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a scheduled recompute.
    pub struct RecomputeId;
}

/// A scheduled, cancellable rebuild with a deadline.
#[derive(Debug, Clone, Copy)]
struct PendingRecompute {
    /// When this recompute should fire.
    deadline: Instant,
    /// Set when superseded or explicitly cancelled; checked again at fire
    /// time, not just at schedule time.
    cancelled: bool,
}

/// Coalesces rebuild requests into at most one per quiescence window.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    /// All scheduled recomputes, including cancelled ones that have not yet
    /// reached their deadline.
    tasks: SlotMap<RecomputeId, PendingRecompute>,
    /// The single live (non-cancelled) task, if any.
    pending: Option<RecomputeId>,
}

impl UpdateScheduler {
    /// Window for routine scroll-driven refreshes.
    pub const SCROLL_WINDOW: Duration = Duration::from_millis(100);
    /// Window for assistive-technology status changes and layout settling.
    pub const SETTLE_WINDOW: Duration = Duration::from_millis(500);
    /// Window for content replacement, giving the host layout time to land.
    pub const CONTENT_WINDOW: Duration = Duration::from_millis(1000);

    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a rebuild at `now + after`, superseding any pending one.
    ///
    /// The superseded task stays cancelled until its deadline passes; firing
    /// it is a no-op.
    pub fn request(&mut self, now: Instant, after: Duration) -> RecomputeId {
        self.cancel_pending();

        let id = self.tasks.insert(PendingRecompute {
            deadline: now + after,
            cancelled: false,
        });
        self.pending = Some(id);

        tracing::trace!(
            target: "horizon_axview::schedule",
            ?id,
            delay_ms = after.as_millis() as u64,
            "scheduled recompute"
        );

        id
    }

    /// Cancel a scheduled recompute. No-op if it already fired.
    pub fn cancel(&mut self, id: RecomputeId) {
        if let Some(task) = self.tasks.get_mut(id) {
            task.cancelled = true;
        }
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    /// Cancel the pending recompute, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(task) = self.tasks.get_mut(id) {
                task.cancelled = true;
                tracing::trace!(target: "horizon_axview::schedule", ?id, "cancelled recompute");
            }
        }
    }

    /// Whether a live recompute is scheduled.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time until the live recompute is due, or `None` when idle.
    ///
    /// Returns `Duration::ZERO` for an overdue task.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let id = self.pending?;
        let task = self.tasks.get(id)?;
        Some(task.deadline.saturating_duration_since(now))
    }

    /// Fire every task whose deadline has passed.
    ///
    /// Returns `true` when a live (non-cancelled) task fired and a rebuild
    /// should run now. Cancelled tasks are discarded silently: cancellation
    /// is re-checked here, at fire time.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let due: Vec<RecomputeId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.deadline <= now)
            .map(|(id, _)| id)
            .collect();

        let mut fired = false;
        for id in due {
            let Some(task) = self.tasks.remove(id) else {
                continue;
            };
            if task.cancelled {
                tracing::trace!(
                    target: "horizon_axview::schedule",
                    ?id,
                    "suppressed cancelled recompute"
                );
                continue;
            }
            self.pending = None;
            fired = true;
            tracing::trace!(target: "horizon_axview::schedule", ?id, "recompute fired");
        }

        fired
    }
}
