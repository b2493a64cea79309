//! Transition coordinator.
//!
//! Serialises user-initiated navigation on the site: a click arms a short
//! pause before the route actually changes, and further clicks are ignored
//! until the route change has been issued and a brief settle tail has
//! passed. The exit/enter animations themselves belong to the router.
//!
//! Timers are deadlines. The UI loop calls [`TransitionCoordinator::poll`]
//! on every tick; tests drive it with synthetic instants.

use log::*;
use std::time::{Duration, Instant};

/// Pause between the click and the route change.
///
pub const CLICK_PAUSE: Duration = Duration::from_millis(300);

/// Time after the route change during which navigation stays blocked.
///
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

pub const HOME_PATH: &str = "/";

/// Phase of the coordinator.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Pausing { target: String, fires_at: Instant },
    Settling { until: Instant },
}

/// Read-only view of the coordinator for rendering.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionState {
    pub is_transitioning: bool,
    pub current_path: String,
}

/// A route change issued by the coordinator.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub from: String,
    pub to: String,
}

/// Gatekeeper for site navigation.
///
#[derive(Debug)]
pub struct TransitionCoordinator {
    current_path: String,
    phase: TransitionPhase,
}

impl Default for TransitionCoordinator {
    fn default() -> Self {
        TransitionCoordinator::new(HOME_PATH)
    }
}

impl TransitionCoordinator {
    pub fn new(initial_path: &str) -> Self {
        TransitionCoordinator {
            current_path: initial_path.to_string(),
            phase: TransitionPhase::Idle,
        }
    }

    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn is_home(&self) -> bool {
        self.current_path == HOME_PATH
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Path a pending navigation is heading to, if any.
    ///
    pub fn pending_target(&self) -> Option<&str> {
        match &self.phase {
            TransitionPhase::Pausing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn state(&self) -> TransitionState {
        TransitionState {
            is_transitioning: self.is_transitioning(),
            current_path: self.current_path.clone(),
        }
    }

    /// Request navigation to `target`. Returns false when the request is
    /// ignored: a transition is already in flight, or `target` is the
    /// current path.
    ///
    pub fn navigate_to(&mut self, target: &str, now: Instant) -> bool {
        if self.is_transitioning() {
            debug!("Ignoring navigation to {} while a transition is in flight.", target);
            return false;
        }
        if self.current_path == target {
            debug!("Ignoring navigation to the current path {}.", target);
            return false;
        }

        // Any earlier deadline is replaced.
        self.phase = TransitionPhase::Pausing {
            target: target.to_string(),
            fires_at: now + CLICK_PAUSE,
        };
        debug!("Navigation to {} armed.", target);
        true
    }

    /// Advance deadlines. Returns the route change when the pause expires.
    ///
    pub fn poll(&mut self, now: Instant) -> Option<RouteChange> {
        match &self.phase {
            TransitionPhase::Pausing { target, fires_at } if now >= *fires_at => {
                let target = target.clone();
                let until = *fires_at + SETTLE_DELAY;
                let change = RouteChange {
                    from: std::mem::replace(&mut self.current_path, target.clone()),
                    to: target,
                };
                self.phase = TransitionPhase::Settling { until };
                info!("Navigating from {} to {}.", change.from, change.to);
                Some(change)
            }
            TransitionPhase::Settling { until } if now >= *until => {
                self.phase = TransitionPhase::Idle;
                None
            }
            _ => None,
        }
    }

    /// Move to `path` immediately, outside the click flow (startup, or
    /// returning from the admin panel). Pending deadlines are dropped.
    ///
    pub fn reset_to(&mut self, path: &str) {
        self.phase = TransitionPhase::Idle;
        self.current_path = path.to_string();
    }

    /// Drop pending deadlines without changing the route.
    ///
    pub fn teardown(&mut self) {
        if self.is_transitioning() {
            debug!("Clearing pending navigation on teardown.");
        }
        self.phase = TransitionPhase::Idle;
    }
}
