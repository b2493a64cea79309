use super::{home, page, Frame};
use crate::router::{Pose, ViewKind};
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;

/// Render the public site: header bar plus the mounted view.
///
pub fn site(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(state.site_title(), styling::banner_style(theme)));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    if state.provider().bundle().is_none() {
        frame.render_widget(spinner::widget(state, inner.height, "Loading..."), inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(Paragraph::new(breadcrumb(state)), rows[0]);

    let now = Instant::now();
    let (view, pose) = match state.visible_view() {
        Some(view) => (view.route().view, view.pose(now)),
        None => return,
    };
    let area = match posed_area(rows[1], pose) {
        Some(area) => area,
        None => return,
    };
    match view {
        ViewKind::Home => home::home(frame, area, state, pose.opacity, now),
        ViewKind::Page(page_view) => page::page(frame, area, state, page_view, pose.opacity),
    }
}

/// One-line trail of the visible pages with the current one marked.
///
fn breadcrumb(state: &State) -> Line<'static> {
    let theme = state.get_theme();
    let current = state.transition().current_path();
    let mut spans = vec![Span::styled(
        "Home",
        if state.transition().is_home() {
            styling::active_list_item_style(theme)
        } else {
            styling::muted_text_style(theme)
        },
    )];
    for entry in state.navigation().iter() {
        spans.push(Span::styled("  ·  ", styling::muted_text_style(theme)));
        let style = if entry.path == current {
            styling::active_list_item_style(theme)
        } else {
            styling::muted_text_style(theme)
        };
        spans.push(Span::styled(entry.name.clone(), style));
    }
    if state.provider().is_loading() {
        spans.push(Span::styled("  ↻", styling::accent_style(theme)));
    }
    Line::from(spans)
}

/// Shift `area` by the pose offsets and clip it to the original bounds.
///
pub fn posed_area(area: Rect, pose: Pose) -> Option<Rect> {
    let x = area.x as i32 + (pose.dx * area.width as f32).round() as i32;
    let y = area.y as i32 + (pose.dy * area.height as f32).round() as i32;
    let left = x.max(area.x as i32);
    let top = y.max(area.y as i32);
    let right = (x + area.width as i32).min(area.right() as i32);
    let bottom = (y + area.height as i32).min(area.bottom() as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posed_area_at_rest_is_unchanged() {
        let area = Rect::new(2, 3, 40, 10);
        assert_eq!(posed_area(area, Pose::REST), Some(area));
    }

    #[test]
    fn test_posed_area_clips_shifted_view() {
        let area = Rect::new(0, 0, 40, 10);
        let half_right = Pose {
            dx: 0.5,
            dy: 0.0,
            opacity: 0.5,
        };
        assert_eq!(posed_area(area, half_right), Some(Rect::new(20, 0, 20, 10)));
        let below = Pose {
            dx: 0.0,
            dy: 1.0,
            opacity: 0.0,
        };
        assert_eq!(posed_area(area, below), None);
    }
}
