//! Home "journey" menu entry animation.
//!
//! Menu entries slide into place in a reverse waterfall: the last entry
//! starts first and the first entry starts last. The sequence waits for
//! content to finish loading, holds the reset pose for two frames so the
//! reset is painted, then runs. Once every entry has landed the menu
//! switches to fast, uniform highlight timing.

use crate::router::easing::EASE_IN_OUT;
use log::*;
use std::time::{Duration, Instant};

/// Delay step between neighbouring entries.
///
pub const STAGGER: Duration = Duration::from_millis(200);

/// Time one entry takes to slide into place.
///
pub const ENTRY_DURATION: Duration = Duration::from_millis(1500);

/// Slack added after the last entry lands.
///
pub const COMPLETION_SLACK: Duration = Duration::from_millis(150);

/// Frames the reset pose is held before the sequence starts.
///
pub const RESET_FRAMES: u8 = 2;

/// Highlight transition once the sequence has completed.
///
pub const HOVER_TRANSITION: Duration = Duration::from_millis(300);

/// Entry delay for the item at `index` out of `total`.
///
pub fn entry_delay(index: usize, total: usize) -> Duration {
    STAGGER * total.saturating_sub(index) as u32
}

/// Per-item entry delays in display order.
///
pub fn waterfall_delays(total: usize) -> Vec<Duration> {
    (0..total).map(|i| entry_delay(i, total)).collect()
}

/// Time from the start of the sequence until it counts as complete.
///
pub fn completion_after(total: usize) -> Duration {
    ENTRY_DURATION + entry_delay(0, total) + COMPLETION_SLACK
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyPhase {
    /// Content is still loading.
    Waiting,
    /// Reset pose held; counts painted frames.
    Reset { frames: u8 },
    Running { started_at: Instant },
    Complete,
}

/// Entry animation state for the home menu.
///
#[derive(Debug, Clone)]
pub struct JourneyAnimation {
    key: String,
    total: usize,
    phase: JourneyPhase,
}

impl Default for JourneyAnimation {
    fn default() -> Self {
        JourneyAnimation {
            key: String::new(),
            total: 0,
            phase: JourneyPhase::Waiting,
        }
    }
}

impl JourneyAnimation {
    pub fn phase(&self) -> &JourneyPhase {
        &self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == JourneyPhase::Complete
    }

    /// Whether the entries have left the reset pose.
    ///
    pub fn is_mounted(&self) -> bool {
        matches!(
            self.phase,
            JourneyPhase::Running { .. } | JourneyPhase::Complete
        )
    }

    /// Feed the current menu identity and loading flag. The sequence
    /// restarts when loading finishes or the ordered id set changes.
    ///
    pub fn sync(&mut self, key: &str, total: usize, loading: bool) {
        if loading {
            self.phase = JourneyPhase::Waiting;
            return;
        }
        if self.phase == JourneyPhase::Waiting || self.key != key || self.total != total {
            self.restart(key, total);
        }
    }

    /// Start over from the reset pose.
    ///
    pub fn restart(&mut self, key: &str, total: usize) {
        debug!("Restarting journey animation for [{}].", key);
        self.key = key.to_string();
        self.total = total;
        self.phase = JourneyPhase::Reset { frames: 0 };
    }

    /// Called once per rendered frame.
    ///
    pub fn on_frame(&mut self, now: Instant) {
        match &self.phase {
            JourneyPhase::Reset { frames } => {
                let frames = frames + 1;
                self.phase = if frames >= RESET_FRAMES {
                    JourneyPhase::Running { started_at: now }
                } else {
                    JourneyPhase::Reset { frames }
                };
            }
            JourneyPhase::Running { started_at } => {
                if now.saturating_duration_since(*started_at) >= completion_after(self.total) {
                    self.phase = JourneyPhase::Complete;
                }
            }
            JourneyPhase::Waiting | JourneyPhase::Complete => {}
        }
    }

    /// Eased landing progress of the entry at `index`, from 0 (reset pose)
    /// to 1 (in place).
    ///
    pub fn item_progress(&self, index: usize, now: Instant) -> f32 {
        match &self.phase {
            JourneyPhase::Waiting | JourneyPhase::Reset { .. } => 0.0,
            JourneyPhase::Complete => 1.0,
            JourneyPhase::Running { started_at } => {
                let elapsed = now.saturating_duration_since(*started_at);
                let delay = entry_delay(index, self.total);
                let moving = elapsed.saturating_sub(delay);
                EASE_IN_OUT.apply(moving.as_secs_f32() / ENTRY_DURATION.as_secs_f32())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn running(total: usize, now: Instant) -> JourneyAnimation {
        let mut journey = JourneyAnimation::default();
        journey.sync("k", total, false);
        journey.on_frame(now);
        journey.on_frame(now);
        journey
    }

    #[test]
    fn test_waterfall_delays_for_four_entries() {
        let delays: Vec<u128> = waterfall_delays(4).iter().map(|d| d.as_millis()).collect();
        assert_eq!(delays, vec![800, 600, 400, 200]);
        assert_eq!(completion_after(4), ms(2450));
    }

    #[test]
    fn test_waits_for_loading() {
        let now = Instant::now();
        let mut journey = JourneyAnimation::default();
        journey.sync("k", 4, true);
        journey.on_frame(now);
        journey.on_frame(now);
        assert_eq!(journey.phase(), &JourneyPhase::Waiting);
        assert!(!journey.is_mounted());
    }

    #[test]
    fn test_holds_reset_for_two_frames() {
        let now = Instant::now();
        let mut journey = JourneyAnimation::default();
        journey.sync("k", 4, false);
        assert_eq!(journey.phase(), &JourneyPhase::Reset { frames: 0 });
        journey.on_frame(now);
        assert_eq!(journey.phase(), &JourneyPhase::Reset { frames: 1 });
        assert_eq!(journey.item_progress(3, now + ms(5000)), 0.0);
        journey.on_frame(now);
        assert_eq!(journey.phase(), &JourneyPhase::Running { started_at: now });
    }

    #[test]
    fn test_last_item_moves_first() {
        let t0 = Instant::now();
        let journey = running(4, t0);
        let at = t0 + ms(300);
        assert!(journey.item_progress(3, at) > 0.0);
        assert_eq!(journey.item_progress(2, at), 0.0);
        assert_eq!(journey.item_progress(0, at), 0.0);
        assert_eq!(journey.item_progress(0, t0 + ms(2300)), 1.0);
    }

    #[test]
    fn test_completes_after_longest_delay() {
        let t0 = Instant::now();
        let mut journey = running(4, t0);
        journey.on_frame(t0 + ms(2449));
        assert!(!journey.is_complete());
        journey.on_frame(t0 + ms(2450));
        assert!(journey.is_complete());
        assert_eq!(journey.item_progress(0, t0), 1.0);
    }

    #[test]
    fn test_restarts_when_order_changes() {
        let t0 = Instant::now();
        let mut journey = running(4, t0);
        journey.on_frame(t0 + ms(3000));
        assert!(journey.is_complete());

        journey.sync("k", 4, false);
        assert!(journey.is_complete());

        journey.sync("k2", 4, false);
        assert_eq!(journey.phase(), &JourneyPhase::Reset { frames: 0 });
    }
}
