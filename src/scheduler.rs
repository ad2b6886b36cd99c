//! Change-driven re-scheduling.
//!
//! Document mutations arrive in bursts while the observed application
//! re-renders. The debouncer collapses each burst into a single trailing
//! pass: every qualifying change restarts a fixed quiescence window, and
//! only after the window elapses untouched does a pass fire. Modeled as an
//! explicit state machine (idle, pending, firing) rather than nested
//! callbacks; the firing state doubles as the in-flight-pass flag that
//! keeps passes strictly sequential.

use std::time::Duration;

use tokio::time::Instant;

/// Default quiescence window before a scheduled pass fires.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Kind of document change reported by the host's watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Nodes were added or removed somewhere in the document.
    ChildList,

    /// An attribute changed on an existing node.
    Attributes,

    /// Text content changed inside an existing node.
    CharacterData,
}

impl ChangeKind {
    /// Whether this change can introduce new cards.
    ///
    /// Only child-list churn qualifies; attribute and text churn on
    /// existing nodes never reschedules a pass.
    #[must_use]
    pub fn qualifies(self) -> bool {
        matches!(self, Self::ChildList)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pending { deadline: Instant },
    Firing,
}

/// Trailing-edge debounce over a cancellable deadline.
///
/// The owner polls [`Debouncer::deadline`] to know when to fire, calls
/// [`Debouncer::begin_fire`] before running the pass and
/// [`Debouncer::finish_fire`] after, so a burst arriving mid-pass lands in
/// a fresh window instead of starting a concurrent pass.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    state: DebounceState,
}

impl Debouncer {
    /// Build a debouncer with the given quiescence window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    /// Record a qualifying change, restarting the quiescence window.
    ///
    /// A change observed while a pass runs schedules the next window
    /// immediately; the current pass still finishes first.
    pub fn touch(&mut self) {
        self.state = DebounceState::Pending {
            deadline: Instant::now() + self.window,
        };
    }

    /// The instant the pending pass should fire, if one is scheduled.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Pending { deadline } => Some(deadline),
            DebounceState::Idle | DebounceState::Firing => None,
        }
    }

    /// Transition pending → firing. Returns false when nothing is pending,
    /// in which case no pass must run.
    pub fn begin_fire(&mut self) -> bool {
        if matches!(self.state, DebounceState::Pending { .. }) {
            self.state = DebounceState::Firing;
            true
        } else {
            false
        }
    }

    /// Transition firing → idle once the pass's apply step is complete.
    ///
    /// A window scheduled mid-pass (state moved back to pending via
    /// [`Debouncer::touch`]) is left untouched.
    pub fn finish_fire(&mut self) {
        if self.state == DebounceState::Firing {
            self.state = DebounceState::Idle;
        }
    }

    /// Cancel any pending window. Used on engine stop.
    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }

    /// Whether a pass is currently scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Whether a pass is currently running.
    #[must_use]
    pub fn is_firing(&self) -> bool {
        self.state == DebounceState::Firing
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_list_is_the_only_qualifying_change() {
        assert!(ChangeKind::ChildList.qualifies());
        assert!(!ChangeKind::Attributes.qualifies());
        assert!(!ChangeKind::CharacterData.qualifies());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_restarts_the_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.touch();
        let first = debouncer.deadline();

        tokio::time::advance(Duration::from_millis(300)).await;
        debouncer.touch();
        let second = debouncer.deadline();

        assert!(second > first, "later touch must push the deadline out");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fire_cycle_returns_to_idle() {
        let mut debouncer = Debouncer::default();
        debouncer.touch();

        assert!(debouncer.begin_fire());
        assert!(debouncer.is_firing());
        assert!(debouncer.deadline().is_none());

        debouncer.finish_fire();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.is_firing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_begin_fire_without_pending_is_a_no_op() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.begin_fire());
        assert!(!debouncer.is_firing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_while_firing_schedules_next_window() {
        let mut debouncer = Debouncer::default();
        debouncer.touch();
        assert!(debouncer.begin_fire());

        // Mutation burst lands while the pass is still applying.
        debouncer.touch();
        debouncer.finish_fire();

        assert!(debouncer.is_pending(), "next pass stays scheduled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_the_pending_window() {
        let mut debouncer = Debouncer::default();
        debouncer.touch();
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert!(debouncer.deadline().is_none());
    }
}
