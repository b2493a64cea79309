use crate::admin::{AdminMessage, SocialColumn};
use crate::navigation::MoveDirection;
use crate::state::{AdminFocus, AdminScreen, Mode, PageField, Scroll, SettingsPane, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration, time::Instant};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => error!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => error!("Failed to poll terminal events: {}", e),
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(state, event, Instant::now())),
            Event::Tick => {
                state.on_tick(Instant::now());
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Character typed without control or alt held.
///
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(c)
        }
        _ => None,
    }
}

/// Apply one key press. Returns false when exit was requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent, now: Instant) -> bool {
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }
    match state.mode() {
        Mode::Site => handle_site_key(state, event, now),
        Mode::Admin => {
            handle_admin_key(state, event, now);
            true
        }
    }
}

fn handle_site_key(state: &mut State, event: KeyEvent, now: Instant) -> bool {
    let on_home = state.transition().is_home();
    match (event.code, typed_char(&event)) {
        (_, Some('q')) => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        (_, Some('a')) => {
            state.enter_admin();
        }
        (_, Some('~')) => {
            state.toggle_log();
        }
        (KeyCode::Down, _) | (_, Some('j')) if on_home => {
            state.next_home_entry(now);
        }
        (KeyCode::Up, _) | (_, Some('k')) if on_home => {
            state.previous_home_entry(now);
        }
        (KeyCode::Enter, _) | (KeyCode::Right, _) | (_, Some('l')) if on_home => {
            state.open_home_entry(now);
        }
        (KeyCode::Esc, _) | (KeyCode::Left, _) | (_, Some('b')) | (_, Some('h')) => {
            state.go_home(now);
        }
        (KeyCode::Tab, _) | (_, Some('n')) => {
            state.go_next_page(now);
        }
        (KeyCode::Down, _) | (_, Some('j')) => {
            state.scroll_page(Scroll::Down);
        }
        (KeyCode::Up, _) | (_, Some('k')) => {
            state.scroll_page(Scroll::Up);
        }
        (KeyCode::PageDown, _) | (_, Some(' ')) => {
            state.scroll_page(Scroll::PageDown);
        }
        (KeyCode::PageUp, _) => {
            state.scroll_page(Scroll::PageUp);
        }
        (KeyCode::Home, _) | (_, Some('g')) => {
            state.scroll_page(Scroll::Top);
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
    true
}

fn report<E: std::fmt::Display>(state: &mut State, result: std::result::Result<bool, E>) {
    if let Err(e) = result {
        warn!("Admin action failed: {}", e);
        state
            .admin_mut()
            .set_message(AdminMessage::error(&e.to_string()));
    }
}

fn handle_admin_key(state: &mut State, event: KeyEvent, now: Instant) {
    if state.auth().is_checking() {
        if event.code == KeyCode::Esc {
            state.leave_admin(now);
        }
        return;
    }
    if !state.auth().is_signed_in() {
        handle_login_key(state, event, now);
        return;
    }
    if state.admin().is_typing() {
        handle_typing_key(state, event);
        return;
    }
    if event.code == KeyCode::Char('s') && event.modifiers.contains(KeyModifiers::CONTROL) {
        let result = state.save_admin_screen().map(|_| true);
        report(state, result);
        return;
    }
    match state.admin().focus() {
        AdminFocus::Menu => handle_admin_menu_key(state, event, now),
        AdminFocus::Screen => handle_admin_screen_key(state, event),
    }
}

fn handle_login_key(state: &mut State, event: KeyEvent, now: Instant) {
    match event.code {
        KeyCode::Esc => {
            state.leave_admin(now);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.admin_mut().login_mut().toggle_field();
        }
        KeyCode::Enter => {
            state.submit_login();
        }
        KeyCode::Backspace => {
            state.admin_mut().login_mut().backspace();
        }
        _ => {
            if let Some(c) = typed_char(&event) {
                state.admin_mut().login_mut().insert_char(c);
            }
        }
    }
}

fn handle_typing_key(state: &mut State, event: KeyEvent) {
    let admin = state.admin_mut();
    if admin.page_edit().is_some() {
        match event.code {
            KeyCode::Enter => {
                if let Err(e) = admin.commit_page_edit() {
                    admin.set_message(AdminMessage::error(&e.to_string()));
                }
            }
            KeyCode::Esc => {
                admin.cancel_page_edit();
            }
            KeyCode::Backspace => {
                admin.page_edit_backspace();
            }
            _ => {
                if let Some(c) = typed_char(&event) {
                    admin.page_edit_insert(c);
                }
            }
        }
        return;
    }
    if admin.screen() == AdminScreen::Socials && admin.socials().is_editing() {
        let socials = admin.socials_mut();
        match event.code {
            KeyCode::Enter | KeyCode::Esc => {
                socials.stop_editing();
            }
            KeyCode::Backspace => {
                socials.backspace();
            }
            _ => {
                if let Some(c) = typed_char(&event) {
                    socials.insert_char(c);
                }
            }
        }
        return;
    }

    let uploading = admin
        .active_form()
        .map(|f| f.upload_prompt().is_some())
        .unwrap_or(false);
    if uploading && event.code == KeyCode::Enter {
        let result = state.start_upload();
        report(state, result);
        return;
    }
    let form = match state.admin_mut().active_form_mut() {
        Some(form) => form,
        None => return,
    };
    if form.editor().is_some() && !matches!(event.code, KeyCode::Esc | KeyCode::Tab) {
        form.input(event);
        return;
    }
    match event.code {
        KeyCode::Esc if uploading => {
            form.cancel_upload();
        }
        KeyCode::Esc => {
            form.stop_editing();
        }
        KeyCode::Tab => {
            form.stop_editing().next_field();
        }
        KeyCode::Enter => {
            form.newline();
        }
        KeyCode::Backspace => {
            form.backspace();
        }
        _ => {
            if let Some(c) = typed_char(&event) {
                form.insert_char(c);
            }
        }
    }
}

fn handle_admin_menu_key(state: &mut State, event: KeyEvent, now: Instant) {
    match (event.code, typed_char(&event)) {
        (KeyCode::Down, _) | (_, Some('j')) => {
            state.admin_mut().next_menu();
        }
        (KeyCode::Up, _) | (_, Some('k')) => {
            state.admin_mut().previous_menu();
        }
        (KeyCode::Enter, _) | (KeyCode::Right, _) | (_, Some('l')) => {
            state.open_admin_screen();
        }
        (KeyCode::Esc, _) | (_, Some('q')) => {
            state.leave_admin(now);
        }
        (_, Some('o')) => {
            state.logout();
        }
        (_, Some('~')) => {
            state.toggle_log();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn handle_admin_screen_key(state: &mut State, event: KeyEvent) {
    match state.admin().screen() {
        AdminScreen::Dashboard => {
            if event.code == KeyCode::Esc {
                state.admin_mut().focus_menu();
            }
        }
        AdminScreen::About | AdminScreen::Contact => handle_form_key(state, event),
        AdminScreen::Experience | AdminScreen::Projects => handle_list_key(state, event),
        AdminScreen::Socials => handle_socials_key(state, event),
        AdminScreen::Settings => handle_settings_key(state, event),
    }
}

/// Navigation keys for the active form.
///
fn handle_form_key(state: &mut State, event: KeyEvent) {
    let admin = state.admin_mut();
    if event.code == KeyCode::Esc {
        match admin.screen() {
            AdminScreen::Experience => {
                admin.experience_mut().close_draft();
            }
            AdminScreen::Projects => {
                admin.projects_mut().close_draft();
            }
            _ => {
                admin.focus_menu();
            }
        }
        return;
    }
    let form = match admin.active_form_mut() {
        Some(form) => form,
        None => return,
    };
    match (event.code, typed_char(&event)) {
        (KeyCode::Down, _) | (KeyCode::Tab, _) | (_, Some('j')) => {
            form.next_field();
        }
        (KeyCode::Up, _) | (KeyCode::BackTab, _) | (_, Some('k')) => {
            form.previous_field();
        }
        (KeyCode::Enter, _) | (_, Some('i')) => {
            form.activate();
        }
        (KeyCode::Right, _) | (_, Some('l')) => {
            form.cycle_choice(true);
        }
        (KeyCode::Left, _) | (_, Some('h')) => {
            form.cycle_choice(false);
        }
        (_, Some('u')) => {
            if !form.begin_upload() {
                admin.set_message(AdminMessage::info("This field does not take uploads."));
            }
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn handle_list_key(state: &mut State, event: KeyEvent) {
    let screen = state.admin().screen();
    let (editing, pending_delete) = match screen {
        AdminScreen::Experience => (
            state.admin().experience().is_editing(),
            state.admin().experience().pending_delete().is_some(),
        ),
        _ => (
            state.admin().projects().is_editing(),
            state.admin().projects().pending_delete().is_some(),
        ),
    };
    if editing {
        handle_form_key(state, event);
        return;
    }
    if pending_delete {
        match typed_char(&event) {
            Some('y') => {
                let result = state.confirm_delete();
                report(state, result);
            }
            _ => {
                let admin = state.admin_mut();
                admin.experience_mut().cancel_delete();
                admin.projects_mut().cancel_delete();
            }
        }
        return;
    }

    let admin = state.admin_mut();
    match (event.code, typed_char(&event)) {
        (KeyCode::Esc, _) => {
            admin.focus_menu();
        }
        (KeyCode::Down, _) | (_, Some('j')) => match screen {
            AdminScreen::Experience => {
                admin.experience_mut().next();
            }
            _ => {
                admin.projects_mut().next();
            }
        },
        (KeyCode::Up, _) | (_, Some('k')) => match screen {
            AdminScreen::Experience => {
                admin.experience_mut().previous();
            }
            _ => {
                admin.projects_mut().previous();
            }
        },
        (KeyCode::Enter, _) | (_, Some('e')) => {
            match screen {
                AdminScreen::Experience => admin
                    .experience_mut()
                    .edit_selected(crate::admin::experience_form),
                _ => admin.projects_mut().edit_selected(crate::admin::project_form),
            };
        }
        (_, Some('n')) => {
            match screen {
                AdminScreen::Experience => admin.new_experience(),
                _ => admin.new_project(),
            };
        }
        (_, Some('d')) => {
            let requested = match screen {
                AdminScreen::Experience => admin.experience_mut().request_delete(),
                _ => admin.projects_mut().request_delete(),
            };
            if !requested {
                admin.set_message(AdminMessage::info("Nothing selected."));
            }
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn handle_socials_key(state: &mut State, event: KeyEvent) {
    let admin = state.admin_mut();
    if event.code == KeyCode::Esc {
        admin.focus_menu();
        return;
    }
    let socials = admin.socials_mut();
    match (event.code, typed_char(&event)) {
        (KeyCode::Down, _) | (_, Some('j')) => {
            socials.next_row();
        }
        (KeyCode::Up, _) | (_, Some('k')) => {
            socials.previous_row();
        }
        (KeyCode::Tab, _) => {
            socials.toggle_column();
        }
        (KeyCode::Enter, _) | (_, Some('i')) => {
            socials.activate();
        }
        (KeyCode::Right, _) | (_, Some('l')) if socials.column() == SocialColumn::Platform => {
            socials.cycle_platform(true);
        }
        (KeyCode::Left, _) | (_, Some('h')) if socials.column() == SocialColumn::Platform => {
            socials.cycle_platform(false);
        }
        (_, Some('n')) => {
            socials.add_row();
        }
        (_, Some('d')) => {
            socials.remove_row();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}

fn handle_settings_key(state: &mut State, event: KeyEvent) {
    if event.code == KeyCode::BackTab
        || (event.code == KeyCode::Tab && state.admin().settings_pane() == SettingsPane::Pages)
    {
        state.admin_mut().toggle_settings_pane();
        return;
    }
    if state.admin().settings_pane() == SettingsPane::Fields {
        handle_form_key(state, event);
        return;
    }

    let admin = state.admin_mut();
    match (event.code, typed_char(&event)) {
        (KeyCode::Esc, _) => {
            admin.focus_menu();
        }
        (KeyCode::Down, _) | (_, Some('j')) => {
            admin.next_page();
        }
        (KeyCode::Up, _) | (_, Some('k')) => {
            admin.previous_page();
        }
        (_, Some('J')) => {
            admin.move_page(MoveDirection::Down);
        }
        (_, Some('K')) => {
            admin.move_page(MoveDirection::Up);
        }
        (_, Some('n')) => {
            admin.add_page();
        }
        (_, Some('d')) => {
            if let Err(e) = admin.remove_page() {
                admin.set_message(AdminMessage::error(&e.to_string()));
            }
        }
        (_, Some('v')) | (KeyCode::Enter, _) => {
            if let Err(e) = admin.toggle_page_visible() {
                admin.set_message(AdminMessage::error(&e.to_string()));
            }
        }
        (_, Some('r')) => {
            admin.begin_page_edit(PageField::Name);
        }
        (_, Some('p')) => {
            if !admin.begin_page_edit(PageField::Path) {
                admin.set_message(AdminMessage::info("Built-in pages keep their path."));
            }
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", event),
    }
}
