//! Scroll-driven parallax.
//!
//! Targets register with a speed factor and get back a handle; dropping the
//! handle unregisters them. Scroll events only record the latest position
//! and request a frame; at most one frame is pending at a time, and the
//! frame writes every target's offset directly into its transform cell,
//! outside the render pass.

use log::*;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Vertical offset, in rows, written by the registrar and read by the
/// renderer.
///
#[derive(Debug, Default)]
pub struct TransformCell(AtomicI32);

impl TransformCell {
    pub fn new() -> Arc<Self> {
        Arc::new(TransformCell::default())
    }

    pub fn offset(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, offset: i32) {
        self.0.store(offset, Ordering::Relaxed);
    }
}

struct Registration {
    id: u64,
    target: Weak<TransformCell>,
    speed: f32,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    registrations: Vec<Registration>,
    scroll_y: i32,
    frame_pending: bool,
}

/// Offset for a target moving at `speed` (0 = pinned to the scroll
/// position, 1 = scrolls normally) when the page is scrolled by `scroll_y`.
///
pub fn parallax_offset(scroll_y: i32, speed: f32) -> i32 {
    (scroll_y as f32 * (1.0 - speed)).round() as i32
}

/// Keeps registered targets in step with the scroll position.
///
#[derive(Clone, Default)]
pub struct ParallaxRegistrar {
    inner: Arc<Mutex<Inner>>,
}

/// Disposer for a registration.
///
pub struct ParallaxHandle {
    id: u64,
    registrar: Weak<Mutex<Inner>>,
}

impl Drop for ParallaxHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.registrar.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.registrations.retain(|r| r.id != self.id);
            }
        }
    }
}

impl ParallaxRegistrar {
    pub fn new() -> Self {
        ParallaxRegistrar::default()
    }

    /// Register `target` to move at `speed`. Registering the same target
    /// again replaces its earlier registration.
    ///
    pub fn register(&self, target: &Arc<TransformCell>, speed: f32) -> ParallaxHandle {
        let mut id = 0;
        if let Ok(mut inner) = self.inner.lock() {
            inner.registrations.retain(|r| match r.target.upgrade() {
                Some(existing) => !Arc::ptr_eq(&existing, target),
                None => false,
            });
            inner.next_id += 1;
            id = inner.next_id;
            inner.registrations.push(Registration {
                id,
                target: Arc::downgrade(target),
                speed,
            });
            target.set(parallax_offset(inner.scroll_y, speed));
        }
        ParallaxHandle {
            id,
            registrar: Arc::downgrade(&self.inner),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.registrations.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frame_pending(&self) -> bool {
        self.inner.lock().map(|i| i.frame_pending).unwrap_or(false)
    }

    /// Record a scroll position. Returns true when this call requested a
    /// new frame, false when one was already pending.
    ///
    pub fn on_scroll(&self, scroll_y: i32) -> bool {
        match self.inner.lock() {
            Ok(mut inner) => {
                inner.scroll_y = scroll_y;
                if inner.frame_pending {
                    false
                } else {
                    inner.frame_pending = true;
                    true
                }
            }
            Err(_) => false,
        }
    }

    /// Run the pending frame, if any: read the scroll position once and
    /// write every target's offset.
    ///
    pub fn on_frame(&self) {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(e) => {
                warn!("Parallax registrar unavailable: {}", e);
                return;
            }
        };
        if !inner.frame_pending {
            return;
        }
        let scroll_y = inner.scroll_y;
        inner.registrations.retain(|r| match r.target.upgrade() {
            Some(target) => {
                target.set(parallax_offset(scroll_y, r.speed));
                true
            }
            None => false,
        });
        inner.frame_pending = false;
    }

    /// Drop a pending frame without applying it.
    ///
    pub fn cancel(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.frame_pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_formula() {
        assert_eq!(parallax_offset(10, 0.5), 5);
        assert_eq!(parallax_offset(10, 0.3), 7);
        assert_eq!(parallax_offset(10, 1.0), 0);
        assert_eq!(parallax_offset(10, 0.0), 10);
    }

    #[test]
    fn test_one_frame_per_burst_of_scrolls() {
        let registrar = ParallaxRegistrar::new();
        let cell = TransformCell::new();
        let _handle = registrar.register(&cell, 0.5);

        assert!(registrar.on_scroll(2));
        assert!(!registrar.on_scroll(4));
        assert!(!registrar.on_scroll(8));
        assert_eq!(cell.offset(), 0);

        registrar.on_frame();
        assert_eq!(cell.offset(), 4);
        assert!(!registrar.is_frame_pending());
        assert!(registrar.on_scroll(12));
    }

    #[test]
    fn test_dropping_handle_unregisters() {
        let registrar = ParallaxRegistrar::new();
        let cell = TransformCell::new();
        let handle = registrar.register(&cell, 0.5);
        assert_eq!(registrar.len(), 1);
        drop(handle);
        assert!(registrar.is_empty());

        registrar.on_scroll(10);
        registrar.on_frame();
        assert_eq!(cell.offset(), 0);
    }

    #[test]
    fn test_reregistering_replaces_speed() {
        let registrar = ParallaxRegistrar::new();
        let cell = TransformCell::new();
        let _first = registrar.register(&cell, 0.5);
        let _second = registrar.register(&cell, 0.0);
        assert_eq!(registrar.len(), 1);
        registrar.on_scroll(6);
        registrar.on_frame();
        assert_eq!(cell.offset(), 6);
    }

    #[test]
    fn test_cancel_drops_pending_frame() {
        let registrar = ParallaxRegistrar::new();
        let cell = TransformCell::new();
        let _handle = registrar.register(&cell, 0.0);
        registrar.on_scroll(3);
        registrar.cancel();
        registrar.on_frame();
        assert_eq!(cell.offset(), 0);
    }

    #[test]
    fn test_new_registration_picks_up_current_scroll() {
        let registrar = ParallaxRegistrar::new();
        registrar.on_scroll(10);
        registrar.on_frame();
        let cell = TransformCell::new();
        let _handle = registrar.register(&cell, 0.5);
        assert_eq!(cell.offset(), 5);
    }
}
