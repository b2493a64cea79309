use super::Frame;
use crate::journey::HOVER_TRANSITION;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use std::time::Instant;

/// Columns an entry travels while landing.
///
const ENTRY_TRAVEL: f32 = 24.0;

/// Render the home view: hero text and the animated page menu.
///
pub fn home(frame: &mut Frame, size: Rect, state: &State, opacity: f32, now: Instant) {
    let theme = state.get_theme();
    let settings = match state.provider().settings() {
        Some(settings) => settings,
        None => return,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .margin(1)
        .split(size);

    let hero = vec![
        Line::from(Span::styled(
            settings.hero_name.clone(),
            styling::faded(theme, &theme.banner, opacity).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            settings.hero_heading.clone(),
            styling::faded(theme, &theme.text, opacity).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            settings.hero_subheading.clone(),
            styling::faded(theme, &theme.text_secondary, opacity),
        )),
        Line::from(Span::styled(
            settings.hero_tagline.clone(),
            styling::faded(theme, &theme.text_muted, opacity),
        )),
    ];
    frame.render_widget(
        Paragraph::new(hero)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let hover = hover_progress(state.home_hover_since(), now);
    let journey = state.journey();
    let lines: Vec<Line> = state
        .navigation()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let progress = journey.item_progress(i, now);
            let indent = ((1.0 - progress) * ENTRY_TRAVEL).round() as usize;
            let selected = i == state.home_index();
            let color = if selected {
                theme.text.mix(&theme.accent, hover)
            } else {
                theme.text
            };
            let mut style = styling::faded(theme, &color, progress * opacity);
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            let marker = if selected { "› " } else { "  " };
            Line::from(vec![
                Span::raw(" ".repeat(indent)),
                Span::styled(format!("{}{:02}  {}", marker, i + 1, entry.name), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

/// Highlight fade for the selected entry, 0 right after the selection
/// moved and 1 once the hover transition has passed.
///
fn hover_progress(since: Option<Instant>, now: Instant) -> f32 {
    match since {
        Some(since) => {
            let elapsed = now.saturating_duration_since(since).as_secs_f32();
            (elapsed / HOVER_TRANSITION.as_secs_f32()).min(1.0)
        }
        None => 1.0,
    }
}
