use super::Frame;
use crate::admin::{FieldKind, Form, SocialColumn};
use crate::content::{CollectionRecord, Experience, Project};
use crate::state::{
    AdminFocus, AdminScreen, LoginField, PageField, RecordList, SettingsPane, State,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

const MENU_WIDTH: u16 = 22;
const CURSOR: &str = "▏";

/// Render the admin panel: login form, or menu plus the open screen.
///
pub fn admin(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let title = match state.auth().current_user() {
        Some(user) => format!("Admin · {}", user.email),
        None => "Admin".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(title, styling::active_block_title_style()));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    if state.auth().is_checking() {
        frame.render_widget(spinner::widget(state, inner.height, "Checking session..."), inner);
        return;
    }
    if !state.auth().is_signed_in() {
        login(frame, inner, state);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(20)])
        .split(inner);
    menu(frame, columns[0], state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(columns[1]);
    screen(frame, rows[0], state);
    message(frame, rows[1], state);
}

fn login(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let form = state.admin().login();
    let area = centered(size, 50, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title("Sign in");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let field_line = |label: &str, value: String, field: LoginField| {
        let active = form.field == field && !form.submitting;
        let label_style = if active {
            styling::active_list_item_style(theme)
        } else {
            styling::muted_text_style(theme)
        };
        let cursor = if active { CURSOR } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), label_style),
            Span::styled(format!("{}{}", value, cursor), styling::normal_text_style(theme)),
        ])
    };
    let mut lines = vec![
        Line::from(""),
        field_line("Email", form.email.clone(), LoginField::Email),
        Line::from(""),
        field_line("Password", "•".repeat(form.password.chars().count()), LoginField::Password),
        Line::from(""),
    ];
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Signing in...",
            styling::muted_text_style(theme),
        )));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            styling::message_style(theme, true),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn menu(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let admin = state.admin();
    let active = admin.focus() == AdminFocus::Menu;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if active {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        })
        .title("Menu");
    let items: Vec<ListItem> = AdminScreen::ALL
        .iter()
        .map(|screen| ListItem::new(screen.title()))
        .collect();
    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(if active {
            styling::active_list_item_style(theme)
        } else {
            styling::current_list_item_style(theme)
        })
        .highlight_symbol("› ")
        .block(block);
    let mut list_state = ListState::default();
    list_state.select(Some(admin.menu_index()));
    frame.render_stateful_widget(list, size, &mut list_state);
}

fn screen(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let admin = state.admin();
    let active = admin.focus() == AdminFocus::Screen;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if active {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        })
        .title(admin.screen().title());
    let inner = block.inner(size);
    frame.render_widget(block, size);

    if admin.is_loading() {
        frame.render_widget(spinner::widget(state, inner.height, "Loading..."), inner);
        return;
    }
    match admin.screen() {
        AdminScreen::Dashboard => dashboard(frame, inner, state),
        AdminScreen::About => render_form(frame, inner, admin.about(), theme, active),
        AdminScreen::Contact => render_form(frame, inner, admin.contact(), theme, active),
        AdminScreen::Experience => {
            record_list(frame, inner, admin.experience(), theme, active, |e: &Experience| {
                format!("{} @ {}", e.role, e.company)
            })
        }
        AdminScreen::Projects => {
            record_list(frame, inner, admin.projects(), theme, active, |p: &Project| {
                p.name.clone()
            })
        }
        AdminScreen::Socials => socials(frame, inner, state),
        AdminScreen::Settings => settings(frame, inner, state),
    }
}

fn message(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    if let Some(message) = state.admin().message() {
        let text = Paragraph::new(Span::styled(
            format!(" {}", message.text()),
            styling::message_style(theme, message.is_error()),
        ));
        frame.render_widget(text, size);
    }
}

fn dashboard(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let stats = state.admin().stats();
    let yes_no = |present: bool| if present { "set" } else { "missing" };
    let value = styling::normal_text_style(theme);
    let row = |label: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), styling::muted_text_style(theme)),
            Span::styled(text, value),
        ])
    };
    let mut lines = vec![
        Line::from(Span::styled("Overview", styling::heading_style(theme))),
        Line::from(""),
        row("About", yes_no(stats.about).to_string()),
        row("Experience", stats.experience.to_string()),
        row("Projects", stats.projects.to_string()),
        row("Contact", yes_no(stats.contact).to_string()),
        row("Social links", stats.socials.to_string()),
    ];
    if state.auth().is_dev_bypass() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Development sign-in bypass is on.",
            styling::message_style(theme, true),
        )));
    }
    frame.render_widget(Paragraph::new(lines), size);
}

/// Lines for a form: one label row per field followed by its value.
///
pub fn form_lines(form: &Form, theme: &Theme, active: bool) -> Vec<Line<'static>> {
    let mut lines = vec![];
    for (i, field) in form.fields().iter().enumerate() {
        let selected = active && i == form.selected();
        let editing = selected && form.is_editing();
        let label_style = if selected {
            styling::active_list_item_style(theme)
        } else {
            styling::muted_text_style(theme)
        };
        let marker = if selected { "› " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, field.label),
            label_style,
        )));

        let value_style = styling::normal_text_style(theme);
        let rendered = match &field.kind {
            FieldKind::Choice(_) => format!("‹ {} ›", field.value),
            FieldKind::Toggle => {
                if Form::is_truthy(&field.value) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            FieldKind::Upload if field.value.is_empty() && !editing => "(none)".to_string(),
            _ => field.value.clone(),
        };
        let mut value_lines: Vec<String> = rendered.split('\n').map(str::to_string).collect();
        if editing && form.editor().is_none() {
            if let Some(last) = value_lines.last_mut() {
                last.push_str(CURSOR);
            }
        }
        for value in value_lines {
            lines.push(Line::from(Span::styled(format!("    {}", value), value_style)));
        }
    }
    if let Some(prompt) = form.upload_prompt() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("Upload file for {}: ", prompt.field),
                styling::accent_style(theme),
            ),
            Span::styled(format!("{}{}", prompt.path, CURSOR), styling::normal_text_style(theme)),
        ]));
    }
    lines
}

fn render_form(frame: &mut Frame, size: Rect, form: &Form, theme: &Theme, active: bool) {
    let (size, editor_area) = match form.editor() {
        Some(_) if active => {
            let editor_height = (size.height / 2).clamp(3, 10);
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(editor_height)])
                .split(size);
            (rows[0], Some(rows[1]))
        }
        _ => (size, None),
    };
    if let (Some(area), Some(editor)) = (editor_area, form.editor()) {
        let label = form.selected_field().map(|f| f.label).unwrap_or_default();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(
                format!("{} · Esc to finish", label),
                styling::active_block_title_style(),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(editor.widget(), inner);
    }

    let lines = form_lines(form, theme, active);
    let selected_row = lines_before_selected(form) as u16;
    let scroll = selected_row.saturating_sub(size.height / 2);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        size,
    );
}

/// Rows above the selected field's label in `form_lines`.
///
fn lines_before_selected(form: &Form) -> usize {
    form.fields()
        .iter()
        .take(form.selected())
        .map(|f| 1 + f.value.split('\n').count())
        .sum()
}

fn record_list<T: CollectionRecord + Clone + Default>(
    frame: &mut Frame,
    size: Rect,
    records: &RecordList<T>,
    theme: &Theme,
    active: bool,
    label: impl Fn(&T) -> String,
) {
    if let Some(draft) = records.draft() {
        render_form(frame, size, &draft.form, theme, active);
        return;
    }
    if records.items().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nothing here yet. Press n to add one.",
                styling::muted_text_style(theme),
            )),
            size,
        );
        return;
    }
    let items: Vec<ListItem> = records
        .items()
        .iter()
        .map(|record| ListItem::new(label(record)))
        .collect();
    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(if active {
            styling::active_list_item_style(theme)
        } else {
            styling::current_list_item_style(theme)
        })
        .highlight_symbol("› ");
    let mut list_state = ListState::default();
    list_state.select(Some(records.selected()));
    frame.render_stateful_widget(list, size, &mut list_state);

    if records.pending_delete().is_some() {
        let name = records.selected_item().map(&label).unwrap_or_default();
        confirm_delete(frame, size, &name, theme);
    }
}

fn confirm_delete(frame: &mut Frame, size: Rect, name: &str, theme: &Theme) {
    let area = centered(size, 50, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error.to_color()))
        .title("Delete");
    let text = vec![
        Line::from(format!("Delete \"{}\"?", name)),
        Line::from(Span::styled(
            "y: delete, any other key: cancel",
            styling::muted_text_style(theme),
        )),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn socials(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let editor = state.admin().socials();
    if editor.rows().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No social links. Press n to add one.",
                styling::muted_text_style(theme),
            )),
            size,
        );
        return;
    }
    let lines: Vec<Line> = editor
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = i == editor.selected();
            let cell_style = |column: SocialColumn| {
                if selected && editor.column() == column {
                    styling::active_list_item_style(theme).add_modifier(Modifier::UNDERLINED)
                } else if selected {
                    styling::current_list_item_style(theme)
                } else {
                    styling::normal_text_style(theme)
                }
            };
            let cursor = if selected && editor.is_editing() { CURSOR } else { "" };
            Line::from(vec![
                Span::raw(if selected { "› " } else { "  " }),
                Span::styled(format!("{:<12}", row.platform.label()), cell_style(SocialColumn::Platform)),
                Span::raw("  "),
                Span::styled(format!("{}{}", row.url, cursor), cell_style(SocialColumn::Url)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), size);
}

fn settings(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let admin = state.admin();
    let active = admin.focus() == AdminFocus::Screen;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(size);
    render_form(
        frame,
        columns[0],
        admin.settings(),
        theme,
        active && admin.settings_pane() == SettingsPane::Fields,
    );

    let pages_active = active && admin.settings_pane() == SettingsPane::Pages;
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(if pages_active {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        })
        .title(" Pages ");
    let inner = block.inner(columns[1]);
    frame.render_widget(block, columns[1]);

    let mut lines: Vec<Line> = admin
        .pages()
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let selected = pages_active && i == admin.page_index();
            let style = if selected {
                styling::active_list_item_style(theme)
            } else if page.visible {
                styling::normal_text_style(theme)
            } else {
                styling::muted_text_style(theme).add_modifier(Modifier::CROSSED_OUT)
            };
            let kind = if page.is_custom { "custom" } else { "built-in" };
            Line::from(vec![
                Span::styled(format!("{}{}", if selected { "› " } else { "  " }, page.name), style),
                Span::styled(
                    format!("  {}  {}", page.path, kind),
                    styling::muted_text_style(theme),
                ),
            ])
        })
        .collect();
    if let Some(edit) = admin.page_edit() {
        let label = match edit.field {
            PageField::Name => "Name",
            PageField::Path => "Path",
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), styling::accent_style(theme)),
            Span::styled(format!("{}{}", edit.buffer, CURSOR), styling::normal_text_style(theme)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// A `width` by `height` rect centered in `size`, clipped to it.
///
fn centered(size: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(size.width);
    let height = height.min(size.height);
    Rect::new(
        size.x + (size.width - width) / 2,
        size.y + (size.height - height) / 2,
        width,
        height,
    )
}
