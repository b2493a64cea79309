//! Animated router.
//!
//! Maps the current path to a view and animates view changes. Exactly one
//! view is mounted at any time: an outgoing view finishes its exit motion
//! and is removed before the incoming view starts entering.

pub mod easing;

use crate::navigation::NavigationSnapshot;
use crate::transition::HOME_PATH;
use easing::EASE_IN_OUT;
use log::*;
use std::time::{Duration, Instant};

/// Views that can be mounted for a navigation entry.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    About,
    Experience,
    Projects,
    Contact,
}

impl PageView {
    /// The registered view for a page id, if any.
    ///
    pub fn from_id(id: &str) -> Option<PageView> {
        match id {
            "about" => Some(PageView::About),
            "experience" => Some(PageView::Experience),
            "projects" => Some(PageView::Projects),
            "contact" => Some(PageView::Contact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Page(PageView),
}

/// A resolved route.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub title: String,
    pub view: ViewKind,
}

impl Route {
    pub fn home() -> Self {
        Route {
            path: HOME_PATH.to_string(),
            title: "Home".to_string(),
            view: ViewKind::Home,
        }
    }
}

/// Routes available for the current navigation snapshot.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Home plus every snapshot entry that has a registered view. Entries
    /// without one are skipped.
    ///
    pub fn from_snapshot(snapshot: &NavigationSnapshot) -> Self {
        let routes = snapshot
            .iter()
            .filter_map(|page| {
                PageView::from_id(&page.id).map(|view| Route {
                    path: page.path.clone(),
                    title: page.name.clone(),
                    view: ViewKind::Page(view),
                })
            })
            .collect();
        RouteTable { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Option<Route> {
        if path == HOME_PATH {
            return Some(Route::home());
        }
        self.routes.iter().find(|r| r.path == path).cloned()
    }
}

/// Displacement and opacity of a view. `dx` and `dy` are fractions of the
/// viewport width and height; positive values point right and down.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub dx: f32,
    pub dy: f32,
    pub opacity: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        dx: 0.0,
        dy: 0.0,
        opacity: 1.0,
    };
    const OFF_RIGHT: Pose = Pose {
        dx: 1.0,
        dy: 0.0,
        opacity: 0.0,
    };
    const OFF_BELOW: Pose = Pose {
        dx: 0.0,
        dy: 1.0,
        opacity: 0.0,
    };

    fn lerp(&self, to: &Pose, t: f32) -> Pose {
        Pose {
            dx: self.dx + (to.dx - self.dx) * t,
            dy: self.dy + (to.dy - self.dy) * t,
            opacity: self.opacity + (to.opacity - self.opacity) * t,
        }
    }
}

/// A timed move between two poses.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub from: Pose,
    pub to: Pose,
    pub duration: Duration,
}

impl Motion {
    pub fn pose_at(&self, elapsed: Duration) -> Pose {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.from.lerp(&self.to, EASE_IN_OUT.apply(t))
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Motion for a view being mounted. Home returns from the right; pages rise
/// from below.
///
pub fn enter_motion(view: ViewKind) -> Motion {
    match view {
        ViewKind::Home => Motion {
            from: Pose::OFF_RIGHT,
            to: Pose::REST,
            duration: Duration::from_millis(800),
        },
        ViewKind::Page(_) => Motion {
            from: Pose::OFF_BELOW,
            to: Pose::REST,
            duration: Duration::from_millis(800),
        },
    }
}

/// Motion for a view being removed. Home leaves to the right; pages drop
/// below.
///
pub fn exit_motion(view: ViewKind) -> Motion {
    match view {
        ViewKind::Home => Motion {
            from: Pose::REST,
            to: Pose::OFF_RIGHT,
            duration: Duration::from_millis(800),
        },
        ViewKind::Page(_) => Motion {
            from: Pose::REST,
            to: Pose::OFF_BELOW,
            duration: Duration::from_millis(600),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Entering,
    Present,
    Exiting,
    Removed,
}

/// Lifecycle of one mounted view.
///
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    route: Route,
    phase: LifecyclePhase,
    motion: Option<Motion>,
    started_at: Instant,
}

impl ViewLifecycle {
    fn entering(route: Route, now: Instant) -> Self {
        let motion = enter_motion(route.view);
        ViewLifecycle {
            route,
            phase: LifecyclePhase::Entering,
            motion: Some(motion),
            started_at: now,
        }
    }

    fn present(route: Route, now: Instant) -> Self {
        ViewLifecycle {
            route,
            phase: LifecyclePhase::Present,
            motion: None,
            started_at: now,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn pose(&self, now: Instant) -> Pose {
        match self.phase {
            LifecyclePhase::Present => Pose::REST,
            LifecyclePhase::Removed => exit_motion(self.route.view).to,
            LifecyclePhase::Entering | LifecyclePhase::Exiting => match &self.motion {
                Some(motion) => motion.pose_at(now.saturating_duration_since(self.started_at)),
                None => Pose::REST,
            },
        }
    }

    /// Start leaving from wherever the view currently is.
    ///
    fn begin_exit(&mut self, now: Instant) {
        if matches!(self.phase, LifecyclePhase::Exiting | LifecyclePhase::Removed) {
            return;
        }
        let mut motion = exit_motion(self.route.view);
        motion.from = self.pose(now);
        self.motion = Some(motion);
        self.phase = LifecyclePhase::Exiting;
        self.started_at = now;
    }

    /// Complete finished motions. Returns true when the phase changed.
    ///
    fn advance(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started_at);
        let done = self.motion.map(|m| m.is_done(elapsed)).unwrap_or(true);
        match self.phase {
            LifecyclePhase::Entering if done => {
                self.phase = LifecyclePhase::Present;
                self.motion = None;
                true
            }
            LifecyclePhase::Exiting if done => {
                self.phase = LifecyclePhase::Removed;
                true
            }
            _ => false,
        }
    }
}

/// Mounts one view at a time and sequences exit before enter.
///
#[derive(Debug, Default)]
pub struct AnimatedRouter {
    table: RouteTable,
    current: Option<ViewLifecycle>,
    pending_path: Option<String>,
}

impl AnimatedRouter {
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The mounted view, if any.
    ///
    pub fn visible(&self) -> Option<&ViewLifecycle> {
        self.current.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.pending_path.is_some()
            || self
                .current
                .as_ref()
                .map(|v| v.phase != LifecyclePhase::Present)
                .unwrap_or(false)
    }

    /// Replace the route table. A mounted page whose route disappeared
    /// exits to an empty screen.
    ///
    pub fn set_routes(&mut self, snapshot: &NavigationSnapshot, now: Instant) {
        self.table = RouteTable::from_snapshot(snapshot);
        let orphaned = match &self.current {
            Some(view) if view.phase != LifecyclePhase::Exiting => {
                self.table.resolve(&view.route.path).is_none()
            }
            _ => false,
        };
        if orphaned {
            if let Some(view) = self.current.as_mut() {
                warn!("Route {} is no longer available.", view.route.path);
                self.pending_path = Some(view.route.path.clone());
                view.begin_exit(now);
            }
        }
    }

    /// Show the view for `path` immediately, without animation.
    ///
    pub fn mount_initial(&mut self, path: &str, now: Instant) {
        self.pending_path = None;
        self.current = self
            .table
            .resolve(path)
            .map(|route| ViewLifecycle::present(route, now));
    }

    /// React to a route change. The mounted view starts exiting; the view for
    /// `path` mounts once the exit has completed.
    ///
    pub fn navigate(&mut self, path: &str, now: Instant) {
        match self.current.as_mut() {
            Some(view) if view.phase != LifecyclePhase::Exiting && view.route.path == path => {
                self.pending_path = None;
            }
            Some(view) => {
                self.pending_path = Some(path.to_string());
                view.begin_exit(now);
            }
            None => {
                self.pending_path = Some(path.to_string());
            }
        }
    }

    /// Advance lifecycles. Returns the route of a view that started
    /// mounting on this tick.
    ///
    pub fn tick(&mut self, now: Instant) -> Option<Route> {
        if let Some(view) = self.current.as_mut() {
            if view.advance(now) && view.phase == LifecyclePhase::Removed {
                debug!("View {} removed.", view.route.path);
                self.current = None;
            }
        }
        if self.current.is_some() {
            return None;
        }

        let path = self.pending_path.take()?;
        match self.table.resolve(&path) {
            Some(route) => {
                debug!("Mounting view {}.", route.path);
                self.current = Some(ViewLifecycle::entering(route.clone(), now));
                Some(route)
            }
            None => {
                debug!("No view registered for {}.", path);
                None
            }
        }
    }
}
