use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return a centered spinner paragraph for an area `height` rows tall.
///
pub fn widget<'a>(state: &State, height: u16, label: &'a str) -> Paragraph<'a> {
    let frame = FRAMES[*state.get_spinner_index() % FRAMES.len()];
    let theme = state.get_theme();
    let mut lines: Vec<Line> = (0..height.saturating_sub(1) / 2).map(|_| Line::from("")).collect();
    lines.push(Line::from(vec![
        Span::styled(frame, styling::accent_style(theme)),
        Span::raw(" "),
        Span::styled(label, styling::muted_text_style(theme)),
    ]));
    Paragraph::new(lines).alignment(Alignment::Center)
}
