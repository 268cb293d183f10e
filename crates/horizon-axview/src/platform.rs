//! The platform assistive-technology boundary.
//!
//! The core never talks to a platform accessibility API directly. Hosts
//! implement [`AssistiveBridge`] over whatever the platform provides
//! (an AccessKit adapter, a test double, nothing at all); the view calls
//! through it for AT activity state, focus-change notifications, and link
//! opening.
//!
//! Some platform accessibility facilities only materialize after an
//! assistive technology connects, so acquiring one can fail transiently.
//! [`FacilityProbe`] bounds the retries: a configurable number of attempts
//! with a fixed spacing, ending in a permanent no-op rather than a crash.

use std::time::Duration;

use accesskit::NodeId;
use url::Url;

/// Host-implemented bridge to the platform accessibility layer.
///
/// Every method has a conservative default so a host can start with an empty
/// impl and grow it as its platform integration matures.
pub trait AssistiveBridge {
    /// Whether a screen reader is currently running.
    fn screen_reader_active(&self) -> bool {
        false
    }

    /// Whether switch-style sequential input is currently running.
    fn switch_access_active(&self) -> bool {
        false
    }

    /// Whether the platform focus-notification facility is usable yet.
    fn facility_ready(&self) -> bool {
        true
    }

    /// Notify the platform that synthetic focus moved to `node`.
    fn focus_moved(&mut self, node: NodeId) {
        let _ = node;
    }

    /// Open a link destination. Returns whether the host handled it.
    fn open_destination(&mut self, destination: &Url) -> bool {
        let _ = destination;
        false
    }
}

/// A bridge that does nothing, for hosts without platform integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertBridge;

impl AssistiveBridge for InertBridge {}

/// The result of one acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The facility is available.
    Ready,
    /// Not available yet; try again after the given delay.
    RetryAfter(Duration),
    /// The retry budget is exhausted; stop trying.
    GaveUp,
}

/// Bounded retry for a platform facility that may not exist yet.
#[derive(Debug, Clone)]
pub struct FacilityProbe {
    attempts_left: u32,
    retry_delay: Duration,
    acquired: bool,
}

impl FacilityProbe {
    /// Default number of retries after the first failed attempt.
    pub const DEFAULT_ATTEMPTS: u32 = 2;
    /// Default spacing between attempts.
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

    /// Create a probe with the default budget.
    pub fn new() -> Self {
        Self::with_budget(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_RETRY_DELAY)
    }

    /// Create a probe with an explicit retry budget and spacing.
    pub fn with_budget(attempts: u32, retry_delay: Duration) -> Self {
        Self {
            attempts_left: attempts,
            retry_delay,
            acquired: false,
        }
    }

    /// Record one acquisition attempt.
    ///
    /// `available` is whether the facility responded this time. Once
    /// acquired, the probe stays ready; once the budget runs out, it stays
    /// given up.
    pub fn probe(&mut self, available: bool) -> ProbeOutcome {
        if self.acquired {
            return ProbeOutcome::Ready;
        }

        if available {
            self.acquired = true;
            return ProbeOutcome::Ready;
        }

        if self.attempts_left == 0 {
            tracing::debug!(
                target: "horizon_axview::platform",
                "facility unavailable, retry budget exhausted"
            );
            return ProbeOutcome::GaveUp;
        }

        self.attempts_left -= 1;
        tracing::trace!(
            target: "horizon_axview::platform",
            attempts_left = self.attempts_left,
            "facility unavailable, will retry"
        );
        ProbeOutcome::RetryAfter(self.retry_delay)
    }

    /// Whether the facility was acquired.
    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// Whether the budget is spent without acquisition.
    pub fn is_exhausted(&self) -> bool {
        !self.acquired && self.attempts_left == 0
    }
}

impl Default for FacilityProbe {
    fn default() -> Self {
        Self::new()
    }
}
