use super::Frame;
use crate::state::{AdminFocus, AdminScreen, Mode, SettingsPane, State};
use crate::ui::theme::ColorSpec;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for the current mode and screen.
///
pub fn hints(state: &State) -> &'static str {
    match state.mode() {
        Mode::Site if state.transition().is_home() => {
            " j/k: select, enter: open, n: next page, a: admin, ~: log, q: quit"
        }
        Mode::Site => " j/k: scroll, space: page down, g: top, n: next page, b: home, a: admin, q: quit",
        Mode::Admin => admin_hints(state),
    }
}

fn admin_hints(state: &State) -> &'static str {
    let admin = state.admin();
    if state.auth().is_checking() {
        return " esc: back to site";
    }
    if !state.auth().is_signed_in() {
        return " tab: switch field, enter: sign in, esc: back to site";
    }
    if admin.page_edit().is_some() {
        return " type to edit, enter: apply, esc: cancel";
    }
    if admin.is_typing() {
        let uploading = admin
            .active_form()
            .map(|f| f.upload_prompt().is_some())
            .unwrap_or(false);
        return if uploading {
            " type a file path, enter: upload, esc: cancel"
        } else {
            " type to edit, tab: next field, esc: stop editing"
        };
    }
    if admin.focus() == AdminFocus::Menu {
        return " j/k: navigate, enter: open, o: sign out, esc: back to site, ~: log";
    }
    match admin.screen() {
        AdminScreen::Dashboard => " esc: menu",
        AdminScreen::About | AdminScreen::Contact => {
            " j/k: fields, enter: edit, h/l: choose, u: upload, ctrl-s: save, esc: menu"
        }
        AdminScreen::Experience | AdminScreen::Projects => {
            let editing = match admin.screen() {
                AdminScreen::Experience => admin.experience().is_editing(),
                _ => admin.projects().is_editing(),
            };
            if editing {
                " j/k: fields, enter: edit, h/l: choose, u: upload, ctrl-s: save, esc: back to list"
            } else {
                " j/k: navigate, e: edit, n: new, d: delete, esc: menu"
            }
        }
        AdminScreen::Socials => {
            " j/k: rows, tab: column, enter: edit, h/l: platform, n: add, d: remove, ctrl-s: save"
        }
        AdminScreen::Settings if admin.settings_pane() == SettingsPane::Pages => {
            " j/k: pages, J/K: move, n: add, d: remove, v: show/hide, r: rename, p: path, tab: fields"
        }
        AdminScreen::Settings => {
            " j/k: fields, enter: edit, u: upload, shift-tab: pages, ctrl-s: save, esc: menu"
        }
    }
}

fn badge(state: &State) -> (&'static str, ColorSpec) {
    let theme = state.get_theme();
    match state.mode() {
        Mode::Site => ("SITE:", theme.footer_site),
        Mode::Admin if state.admin().is_typing() => ("EDIT:", theme.footer_typing),
        Mode::Admin => ("ADMIN:", theme.footer_admin),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (label, color) = badge(state);
    let content = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.background.to_color())
                .bg(color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints(state), Style::default().fg(theme.text_secondary.to_color())),
    ]);
    frame.render_widget(Paragraph::new(content), size);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_mode() {
        let mut state = State::default();
        assert!(hints(&state).contains("enter: open"));
        state.enter_admin();
        assert_eq!(hints(&state), " esc: back to site");
        state.auth_mut().resolve(None);
        assert!(hints(&state).contains("sign in"));
        assert_eq!(badge(&state).0, "ADMIN:");
    }
}
