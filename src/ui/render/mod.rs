mod admin;
mod footer;
mod home;
mod log;
mod page;
mod site;

use self::log::log;
use super::*;
use crate::state::{Mode, State};
use footer::footer;
use ratatui::layout::{Constraint, Direction, Layout};

/// Number of rows the log pane takes when shown.
///
const LOG_PANE_HEIGHT: u16 = 8;

/// Render the whole frame according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    state.set_terminal_size(size);

    let mut constraints = vec![Constraint::Min(3)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_PANE_HEIGHT));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    match state.mode() {
        Mode::Site => site::site(frame, rows[0], state),
        Mode::Admin => admin::admin(frame, rows[0], state),
    }
    if state.is_log_visible() {
        log(frame, rows[1], state);
    }
    footer(frame, rows[rows.len() - 1], state);
}
