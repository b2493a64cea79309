//! Navigation-related state types.
//!
//! This module contains enums describing which face of the application is
//! shown and how the site reacts to scrolling.

/// Specifying the different application modes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Site,
    Admin,
}

/// Specifying a scroll step on a site page.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Scroll {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
}

impl Scroll {
    /// Apply the step to an offset, never going below zero.
    ///
    pub fn apply(&self, offset: u16, page_height: u16) -> u16 {
        let page = page_height.max(1);
        match self {
            Scroll::Up => offset.saturating_sub(1),
            Scroll::Down => offset.saturating_add(1),
            Scroll::PageUp => offset.saturating_sub(page),
            Scroll::PageDown => offset.saturating_add(page),
            Scroll::Top => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode() {
        assert_eq!(Mode::Site, Mode::Site);
        assert_ne!(Mode::Site, Mode::Admin);
    }

    #[test]
    fn test_scroll_apply() {
        assert_eq!(Scroll::Up.apply(0, 10), 0);
        assert_eq!(Scroll::Down.apply(0, 10), 1);
        assert_eq!(Scroll::PageDown.apply(3, 10), 13);
        assert_eq!(Scroll::PageUp.apply(3, 10), 0);
        assert_eq!(Scroll::PageDown.apply(3, 0), 4);
        assert_eq!(Scroll::Top.apply(42, 10), 0);
    }
}
