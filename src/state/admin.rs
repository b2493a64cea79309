//! Admin panel state.
//!
//! Local editing state for each admin screen. Network results are written
//! in through the `load_*` methods; the terminal handler edits through the
//! accessors and the save helpers turn forms back into records.

use crate::admin::*;
use crate::content::{About, CollectionRecord, Contact, Experience, Project, Settings, SocialLink};
use crate::navigation::{MoveDirection, PageEditor, PageEntry};

/// Specifying the different admin screens.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AdminScreen {
    Dashboard,
    About,
    Experience,
    Projects,
    Contact,
    Socials,
    Settings,
}

impl AdminScreen {
    pub const ALL: [AdminScreen; 7] = [
        AdminScreen::Dashboard,
        AdminScreen::About,
        AdminScreen::Experience,
        AdminScreen::Projects,
        AdminScreen::Contact,
        AdminScreen::Socials,
        AdminScreen::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AdminScreen::Dashboard => "Dashboard",
            AdminScreen::About => "About",
            AdminScreen::Experience => "Experience",
            AdminScreen::Projects => "Projects",
            AdminScreen::Contact => "Contact",
            AdminScreen::Socials => "Socials",
            AdminScreen::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        AdminScreen::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}

/// Specifying which part of the admin panel has focus.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AdminFocus {
    Menu,
    Screen,
}

/// Specifying the login form fields.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoginField {
    Email,
    Password,
}

/// Email/password sign-in form.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            email: String::new(),
            password: String::new(),
            field: LoginField::Email,
            error: None,
            submitting: false,
        }
    }
}

impl LoginForm {
    pub fn insert_char(&mut self, c: char) -> &mut Self {
        self.error = None;
        match self.field {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        match self.field {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
        self
    }

    pub fn toggle_field(&mut self) -> &mut Self {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self
    }

    /// Take the credentials for submission. Returns `None` while a
    /// submission is in flight or a field is blank.
    ///
    pub fn submit(&mut self) -> Option<(String, String)> {
        if self.submitting || self.email.trim().is_empty() || self.password.is_empty() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((self.email.trim().to_string(), self.password.clone()))
    }

    pub fn failed(&mut self, message: String) -> &mut Self {
        self.submitting = false;
        self.password.clear();
        self.error = Some(message);
        self
    }

    pub fn reset(&mut self) -> &mut Self {
        *self = LoginForm {
            email: std::mem::take(&mut self.email),
            ..Default::default()
        };
        self
    }
}

/// A record being edited. `base.id()` is `None` for a new record.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft<T> {
    pub base: T,
    pub form: Form,
}

/// List screen with an optional edit form and delete confirmation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList<T> {
    items: Vec<T>,
    selected: usize,
    draft: Option<RecordDraft<T>>,
    delete_confirmation: Option<String>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        RecordList {
            items: vec![],
            selected: 0,
            draft: None,
            delete_confirmation: None,
        }
    }
}

impl<T: CollectionRecord + Clone + Default> RecordList<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn set_items(&mut self, items: Vec<T>) -> &mut Self {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        self
    }

    pub fn next(&mut self) -> &mut Self {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
        self
    }

    pub fn previous(&mut self) -> &mut Self {
        self.selected = self.selected.saturating_sub(1);
        self
    }

    pub fn draft(&self) -> Option<&RecordDraft<T>> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut RecordDraft<T>> {
        self.draft.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Open the selected record in a form.
    ///
    pub fn edit_selected(&mut self, make_form: fn(&T) -> Form) -> bool {
        match self.items.get(self.selected) {
            Some(item) => {
                self.draft = Some(RecordDraft {
                    base: item.clone(),
                    form: make_form(item),
                });
                true
            }
            None => false,
        }
    }

    /// Open an empty form for a new record ranked after the existing ones.
    ///
    pub fn start_new(&mut self, base: T, make_form: fn(&T) -> Form) {
        self.draft = Some(RecordDraft {
            form: make_form(&base),
            base,
        });
    }

    pub fn close_draft(&mut self) -> &mut Self {
        self.draft = None;
        self
    }

    pub fn request_delete(&mut self) -> bool {
        match self.selected_item().and_then(|i| i.id()).map(str::to_owned) {
            Some(id) => {
                self.delete_confirmation = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.delete_confirmation.as_deref()
    }

    pub fn take_delete(&mut self) -> Option<String> {
        self.delete_confirmation.take()
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }
}

/// Specifying the settings screen panes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SettingsPane {
    Fields,
    Pages,
}

/// Specifying which page attribute is being typed.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PageField {
    Name,
    Path,
}

/// Pending rename or path change of a page.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEdit {
    pub field: PageField,
    pub buffer: String,
}

/// State of every admin screen.
///
#[derive(Debug, Clone)]
pub struct AdminState {
    screen: AdminScreen,
    focus: AdminFocus,
    menu_index: usize,
    stats: DashboardStats,
    about: Form,
    experience: RecordList<Experience>,
    projects: RecordList<Project>,
    contact: Form,
    socials: SocialsEditor,
    settings: Form,
    pages: PageEditor,
    settings_pane: SettingsPane,
    page_index: usize,
    page_edit: Option<PageEdit>,
    loading: bool,
    busy: bool,
    message: Option<AdminMessage>,
    login: LoginForm,
}

impl Default for AdminState {
    fn default() -> Self {
        AdminState {
            screen: AdminScreen::Dashboard,
            focus: AdminFocus::Menu,
            menu_index: 0,
            stats: DashboardStats::default(),
            about: about_form(&About::default()),
            experience: RecordList::default(),
            projects: RecordList::default(),
            contact: contact_form(&Contact::default()),
            socials: SocialsEditor::default(),
            settings: settings_form(&Settings::default()),
            pages: PageEditor::default(),
            settings_pane: SettingsPane::Fields,
            page_index: 0,
            page_edit: None,
            loading: false,
            busy: false,
            message: None,
            login: LoginForm::default(),
        }
    }
}

impl AdminState {
    pub fn screen(&self) -> AdminScreen {
        self.screen
    }

    pub fn focus(&self) -> AdminFocus {
        self.focus
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn next_menu(&mut self) -> &mut Self {
        self.menu_index = (self.menu_index + 1) % AdminScreen::ALL.len();
        self
    }

    pub fn previous_menu(&mut self) -> &mut Self {
        self.menu_index = (self.menu_index + AdminScreen::ALL.len() - 1) % AdminScreen::ALL.len();
        self
    }

    /// Open the screen under the menu cursor. Returns the screen so the
    /// caller can request its data.
    ///
    pub fn open_selected(&mut self) -> AdminScreen {
        self.open(AdminScreen::ALL[self.menu_index])
    }

    pub fn open(&mut self, screen: AdminScreen) -> AdminScreen {
        self.screen = screen;
        self.menu_index = screen.index();
        self.focus = if screen == AdminScreen::Dashboard {
            AdminFocus::Menu
        } else {
            AdminFocus::Screen
        };
        self.message = None;
        self.page_edit = None;
        self.experience.close_draft().cancel_delete();
        self.projects.close_draft().cancel_delete();
        screen
    }

    pub fn focus_menu(&mut self) -> &mut Self {
        self.focus = AdminFocus::Menu;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) -> &mut Self {
        self.loading = loading;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) -> &mut Self {
        self.busy = busy;
        self
    }

    pub fn message(&self) -> Option<&AdminMessage> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, message: AdminMessage) -> &mut Self {
        self.message = Some(message);
        self
    }

    pub fn clear_message(&mut self) -> &mut Self {
        self.message = None;
        self
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn about(&self) -> &Form {
        &self.about
    }

    pub fn contact(&self) -> &Form {
        &self.contact
    }

    pub fn settings(&self) -> &Form {
        &self.settings
    }

    pub fn experience(&self) -> &RecordList<Experience> {
        &self.experience
    }

    pub fn experience_mut(&mut self) -> &mut RecordList<Experience> {
        &mut self.experience
    }

    pub fn projects(&self) -> &RecordList<Project> {
        &self.projects
    }

    pub fn projects_mut(&mut self) -> &mut RecordList<Project> {
        &mut self.projects
    }

    pub fn socials(&self) -> &SocialsEditor {
        &self.socials
    }

    pub fn socials_mut(&mut self) -> &mut SocialsEditor {
        &mut self.socials
    }

    pub fn pages(&self) -> &PageEditor {
        &self.pages
    }

    pub fn settings_pane(&self) -> SettingsPane {
        self.settings_pane
    }

    pub fn toggle_settings_pane(&mut self) -> &mut Self {
        self.settings.stop_editing();
        self.page_edit = None;
        self.settings_pane = match self.settings_pane {
            SettingsPane::Fields => SettingsPane::Pages,
            SettingsPane::Pages => SettingsPane::Fields,
        };
        self
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_edit(&self) -> Option<&PageEdit> {
        self.page_edit.as_ref()
    }

    /// The form receiving keystrokes on the current screen, if any.
    ///
    pub fn active_form(&self) -> Option<&Form> {
        match self.screen {
            AdminScreen::About => Some(&self.about),
            AdminScreen::Contact => Some(&self.contact),
            AdminScreen::Settings if self.settings_pane == SettingsPane::Fields => {
                Some(&self.settings)
            }
            AdminScreen::Experience => self.experience.draft().map(|d| &d.form),
            AdminScreen::Projects => self.projects.draft().map(|d| &d.form),
            _ => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.screen {
            AdminScreen::About => Some(&mut self.about),
            AdminScreen::Contact => Some(&mut self.contact),
            AdminScreen::Settings if self.settings_pane == SettingsPane::Fields => {
                Some(&mut self.settings)
            }
            AdminScreen::Experience => self.experience.draft_mut().map(|d| &mut d.form),
            AdminScreen::Projects => self.projects.draft_mut().map(|d| &mut d.form),
            _ => None,
        }
    }

    /// Whether keystrokes are currently text input.
    ///
    pub fn is_typing(&self) -> bool {
        if self.focus != AdminFocus::Screen {
            return false;
        }
        self.page_edit.is_some()
            || self.socials.is_editing() && self.screen == AdminScreen::Socials
            || self
                .active_form()
                .map(|f| f.is_editing() || f.upload_prompt().is_some())
                .unwrap_or(false)
    }

    /// Write a finished upload into the form it was started from.
    ///
    pub fn apply_upload(&mut self, screen: AdminScreen, field: &str, url: &str) -> bool {
        let form = match screen {
            AdminScreen::About => Some(&mut self.about),
            AdminScreen::Settings => Some(&mut self.settings),
            AdminScreen::Projects => self.projects.draft_mut().map(|d| &mut d.form),
            _ => None,
        };
        form.map(|f| f.set_value(field, url)).unwrap_or(false)
    }

    pub fn load_stats(&mut self, stats: DashboardStats) -> &mut Self {
        self.stats = stats;
        self.loading = false;
        self
    }

    pub fn load_about(&mut self, about: Option<About>) -> &mut Self {
        self.about = about_form(&about.unwrap_or_default());
        self.loading = false;
        self
    }

    pub fn load_experience(&mut self, entries: Vec<Experience>) -> &mut Self {
        self.experience.set_items(entries);
        self.loading = false;
        self
    }

    pub fn load_projects(&mut self, projects: Vec<Project>) -> &mut Self {
        self.projects.set_items(projects);
        self.loading = false;
        self
    }

    pub fn load_contact(&mut self, contact: Option<Contact>) -> &mut Self {
        self.contact = contact_form(&contact.unwrap_or_default());
        self.loading = false;
        self
    }

    pub fn load_socials(&mut self, links: Vec<SocialLink>) -> &mut Self {
        self.socials = SocialsEditor::new(links);
        self.loading = false;
        self
    }

    pub fn load_settings(&mut self, settings: Option<Settings>) -> &mut Self {
        let settings = settings.unwrap_or_default();
        self.settings = settings_form(&settings);
        self.pages = PageEditor::new(settings.pages);
        self.page_index = 0;
        self.page_edit = None;
        self.loading = false;
        self
    }

    pub fn about_to_save(&self) -> About {
        about_from_form(&self.about)
    }

    pub fn contact_to_save(&self) -> Contact {
        contact_from_form(&self.contact)
    }

    pub fn settings_to_save(&self) -> Settings {
        settings_from_form(&self.settings, self.pages.pages().to_vec())
    }

    /// The experience draft as a record, with its id when it already exists.
    ///
    pub fn experience_to_save(&self) -> Option<(Option<String>, Experience)> {
        self.experience.draft().map(|d| {
            let entry = experience_from_form(&d.form, &d.base);
            (entry.id.clone(), entry)
        })
    }

    pub fn project_to_save(&self) -> Option<(Option<String>, Project)> {
        self.projects.draft().map(|d| {
            let project = project_from_form(&d.form, &d.base);
            (project.id.clone(), project)
        })
    }

    pub fn new_experience(&mut self) -> &mut Self {
        let base = Experience {
            sort_order: Some(self.experience.items().len() as i64 + 1),
            ..Default::default()
        };
        self.experience.start_new(base, experience_form);
        self
    }

    pub fn new_project(&mut self) -> &mut Self {
        let base = Project {
            sort_order: Some(self.projects.items().len() as i64 + 1),
            ..Default::default()
        };
        self.projects.start_new(base, project_form);
        self
    }

    pub fn next_page(&mut self) -> &mut Self {
        if self.page_index + 1 < self.pages.len() {
            self.page_index += 1;
        }
        self
    }

    pub fn previous_page(&mut self) -> &mut Self {
        self.page_index = self.page_index.saturating_sub(1);
        self
    }

    /// Move the selected page and keep it selected.
    ///
    pub fn move_page(&mut self, direction: MoveDirection) -> bool {
        let moved = self.pages.move_page(self.page_index, direction);
        if moved {
            self.page_index = (self.page_index as isize + direction.offset()) as usize;
        }
        moved
    }

    pub fn add_page(&mut self) -> &mut Self {
        self.page_index = self.pages.add_page();
        self
    }

    pub fn remove_page(&mut self) -> Result<PageEntry, crate::navigation::NavigationError> {
        let removed = self.pages.remove_page(self.page_index)?;
        if self.page_index >= self.pages.len() {
            self.page_index = self.pages.len().saturating_sub(1);
        }
        Ok(removed)
    }

    pub fn toggle_page_visible(&mut self) -> Result<bool, crate::navigation::NavigationError> {
        self.pages.toggle_visible(self.page_index)
    }

    /// Start typing a new name or path for the selected page. Paths of
    /// built-in pages can't be edited.
    ///
    pub fn begin_page_edit(&mut self, field: PageField) -> bool {
        let page = match self.pages.pages().get(self.page_index) {
            Some(page) => page,
            None => return false,
        };
        if field == PageField::Path && page.is_builtin() {
            return false;
        }
        let buffer = match field {
            PageField::Name => page.name.clone(),
            PageField::Path => page.path.clone(),
        };
        self.page_edit = Some(PageEdit { field, buffer });
        true
    }

    pub fn page_edit_insert(&mut self, c: char) -> &mut Self {
        if let Some(edit) = self.page_edit.as_mut() {
            edit.buffer.push(c);
        }
        self
    }

    pub fn page_edit_backspace(&mut self) -> &mut Self {
        if let Some(edit) = self.page_edit.as_mut() {
            edit.buffer.pop();
        }
        self
    }

    pub fn cancel_page_edit(&mut self) -> &mut Self {
        self.page_edit = None;
        self
    }

    /// Apply the typed name or path to the selected page.
    ///
    pub fn commit_page_edit(&mut self) -> Result<(), crate::navigation::NavigationError> {
        let edit = match self.page_edit.take() {
            Some(edit) => edit,
            None => return Ok(()),
        };
        match edit.field {
            PageField::Name => self.pages.rename(self.page_index, edit.buffer.trim()),
            PageField::Path => self.pages.set_path(self.page_index, &edit.buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback;
    use crate::navigation::NavigationError;

    fn entry(id: &str) -> Experience {
        Experience {
            id: Some(id.to_string()),
            company: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_resets_screen_state() {
        let mut admin = AdminState::default();
        admin.set_message(AdminMessage::success("Saved successfully!"));
        admin.next_menu().next_menu();
        assert_eq!(admin.open_selected(), AdminScreen::Experience);
        assert_eq!(admin.focus(), AdminFocus::Screen);
        assert!(admin.message().is_none());
        admin.previous_menu().previous_menu().previous_menu();
        assert_eq!(AdminScreen::ALL[admin.menu_index()], AdminScreen::Settings);
    }

    #[test]
    fn test_login_form_submit_and_fail() {
        let mut login = LoginForm::default();
        assert!(login.submit().is_none());
        for c in "me@example.com".chars() {
            login.insert_char(c);
        }
        login.toggle_field().insert_char('p');
        assert_eq!(
            login.submit(),
            Some(("me@example.com".to_string(), "p".to_string()))
        );
        assert!(login.submit().is_none());
        login.failed("Invalid email or password".to_string());
        assert!(!login.submitting);
        assert!(login.password.is_empty());
        assert_eq!(login.error.as_deref(), Some("Invalid email or password"));
        login.reset();
        assert_eq!(login.email, "me@example.com");
        assert!(login.error.is_none());
    }

    #[test]
    fn test_record_list_edit_and_delete() {
        let mut admin = AdminState::default();
        admin.open(AdminScreen::Experience);
        admin.load_experience(vec![entry("a"), entry("b")]);
        admin.experience_mut().next();
        assert!(admin.experience_mut().edit_selected(experience_form));
        if let Some(form) = admin.active_form_mut() {
            form.set_value("role", "Lead");
        }
        let (id, saved) = admin.experience_to_save().unwrap();
        assert_eq!(id.as_deref(), Some("b"));
        assert_eq!(saved.role, "Lead");

        admin.experience_mut().close_draft();
        assert!(admin.experience_mut().request_delete());
        assert_eq!(admin.experience().pending_delete(), Some("b"));
        assert_eq!(admin.experience_mut().take_delete().as_deref(), Some("b"));
        assert!(admin.experience().pending_delete().is_none());
    }

    #[test]
    fn test_new_project_ranks_last() {
        let mut admin = AdminState::default();
        admin.open(AdminScreen::Projects);
        admin.load_projects(vec![Project::default(), Project::default()]);
        admin.new_project();
        let (id, project) = admin.project_to_save().unwrap();
        assert!(id.is_none());
        assert_eq!(project.sort_order, Some(3));
    }

    #[test]
    fn test_page_editing() {
        let mut admin = AdminState::default();
        admin.open(AdminScreen::Settings);
        admin.load_settings(Some(fallback::settings()));
        admin.toggle_settings_pane();
        assert!(admin.active_form().is_none());

        assert!(!admin.begin_page_edit(PageField::Path));
        assert!(admin.begin_page_edit(PageField::Name));
        admin.page_edit_backspace().page_edit_insert('!');
        admin.commit_page_edit().unwrap();
        assert_eq!(admin.pages().pages()[0].name, "About M!");

        admin.add_page();
        assert_eq!(admin.page_index(), 4);
        assert!(admin.begin_page_edit(PageField::Path));
        admin.cancel_page_edit();
        assert!(admin.begin_page_edit(PageField::Path));
        for _ in 0..10 {
            admin.page_edit_backspace();
        }
        for c in "/about".chars() {
            admin.page_edit_insert(c);
        }
        assert!(matches!(
            admin.commit_page_edit(),
            Err(NavigationError::PathTaken(_))
        ));

        assert!(admin.move_page(MoveDirection::Up));
        assert_eq!(admin.page_index(), 3);
        assert!(admin.remove_page().is_ok());
        assert_eq!(admin.pages().len(), 4);
        assert!(admin.remove_page().is_err());

        let settings = admin.settings_to_save();
        assert_eq!(settings.pages.len(), 4);
        assert_eq!(settings.pages[0].name, "About M!");
    }

    #[test]
    fn test_upload_lands_in_originating_form() {
        let mut admin = AdminState::default();
        assert!(admin.apply_upload(AdminScreen::About, "image_url", "https://cdn/me.png"));
        assert_eq!(admin.about().value("image_url"), "https://cdn/me.png");
        assert!(!admin.apply_upload(AdminScreen::Projects, "image_url", "x"));
    }

    #[test]
    fn test_is_typing() {
        let mut admin = AdminState::default();
        admin.open(AdminScreen::About);
        assert!(!admin.is_typing());
        if let Some(form) = admin.active_form_mut() {
            form.activate();
        }
        assert!(admin.is_typing());
        admin.focus_menu();
        assert!(!admin.is_typing());
    }
}
