use crate::app::{ConfigSaveSender, NetworkEventSender};
use crate::auth::AuthGate;
use crate::events::network::Event as NetworkEvent;
use crate::journey::JourneyAnimation;
use crate::logger::LogBuffer;
use crate::navigation::{NavigationSnapshot, PageEntry};
use crate::parallax::{ParallaxHandle, ParallaxRegistrar, TransformCell};
use crate::provider::{DataProvider, FetchedContent};
use crate::router::{AnimatedRouter, LifecyclePhase, Route, ViewKind, ViewLifecycle};
use crate::transition::{TransitionCoordinator, HOME_PATH};
use crate::ui::{ColorSpec, Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::admin::{AdminFocus, AdminScreen, AdminState};
use super::error::StateError;
use super::navigation::{Mode, Scroll};

/// Banner speed relative to the page body on scroll.
///
pub const BANNER_PARALLAX_SPEED: f32 = 0.5;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    config_save_sender: Option<ConfigSaveSender>,
    mode: Mode,
    terminal_size: Rect,
    spinner_index: usize,
    theme: Theme,
    provider: DataProvider,
    transition: TransitionCoordinator,
    router: AnimatedRouter,
    journey: JourneyAnimation,
    parallax: ParallaxRegistrar,
    banner_offset: Arc<TransformCell>,
    banner_registration: Option<ParallaxHandle>,
    page_scroll: u16,
    home_index: usize,
    home_hover_since: Option<Instant>,
    auth: AuthGate,
    admin: AdminState,
    log: LogBuffer,
    log_visible: bool,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let now = Instant::now();
        let provider = DataProvider::default();
        let mut router = AnimatedRouter::default();
        router.set_routes(provider.navigation(), now);
        router.mount_initial(HOME_PATH, now);
        State {
            net_sender: None,
            config_save_sender: None,
            mode: Mode::Site,
            terminal_size: Rect::default(),
            spinner_index: 0,
            theme: Theme::default(),
            provider,
            transition: TransitionCoordinator::new(HOME_PATH),
            router,
            journey: JourneyAnimation::default(),
            parallax: ParallaxRegistrar::new(),
            banner_offset: TransformCell::new(),
            banner_registration: None,
            page_scroll: 0,
            home_index: 0,
            home_hover_since: None,
            auth: AuthGate::new(false),
            admin: AdminState::default(),
            log: LogBuffer::default(),
            log_visible: false,
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config_save_sender: ConfigSaveSender,
        theme: Theme,
        dev_auth_bypass: bool,
        log: LogBuffer,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            config_save_sender: Some(config_save_sender),
            theme,
            auth: AuthGate::new(dev_auth_bypass),
            log,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn provider(&self) -> &DataProvider {
        &self.provider
    }

    pub fn navigation(&self) -> &NavigationSnapshot {
        self.provider.navigation()
    }

    pub fn transition(&self) -> &TransitionCoordinator {
        &self.transition
    }

    pub fn router(&self) -> &AnimatedRouter {
        &self.router
    }

    pub fn journey(&self) -> &JourneyAnimation {
        &self.journey
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthGate {
        &mut self.auth
    }

    pub fn admin(&self) -> &AdminState {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut AdminState {
        &mut self.admin
    }

    /// Terminal title for the current content.
    ///
    pub fn site_title(&self) -> String {
        match self.provider.settings() {
            Some(settings) if !settings.site_title.is_empty() => settings.site_title.clone(),
            _ => crate::content::fallback::settings().site_title,
        }
    }

    /// Mark a content load as started and ask the network thread for it.
    ///
    pub fn request_content(&mut self) -> &mut Self {
        self.provider.begin_load();
        self.dispatch(NetworkEvent::LoadContent);
        self
    }

    /// Mark a content reload as in flight without dispatching it.
    ///
    pub fn request_content_reload(&mut self) -> &mut Self {
        self.provider.begin_load();
        self
    }

    /// Install freshly fetched content and refresh everything derived from
    /// it: routes, the home selection and the accent colour.
    ///
    pub fn finish_content_load(&mut self, fetched: FetchedContent, now: Instant) -> &mut Self {
        self.provider.finish_load(fetched);
        let snapshot = self.provider.navigation().clone();
        self.router.set_routes(&snapshot, now);
        if self.home_index >= snapshot.len() {
            self.home_index = snapshot.len().saturating_sub(1);
        }
        let accent = self
            .provider
            .settings()
            .and_then(|s| ColorSpec::from_hex(&s.theme_color));
        match accent {
            Some(color) => {
                self.theme.accent = color;
            }
            None => debug!("Keeping theme accent; settings colour is not #rrggbb."),
        }
        self
    }

    /// Advance every time-based state machine. Called on each terminal tick.
    ///
    pub fn on_tick(&mut self, now: Instant) -> &mut Self {
        if self.mode == Mode::Site {
            if let Some(change) = self.transition.poll(now) {
                self.router.navigate(&change.to, now);
            }
            if let Some(route) = self.router.tick(now) {
                self.on_route_mounted(&route);
            }
            if self.is_home_visible() {
                let snapshot = self.provider.navigation();
                self.journey
                    .sync(&snapshot.ids_key(), snapshot.len(), self.provider.is_loading());
                self.journey.on_frame(now);
            }
            self.parallax.on_frame();
        }
        self.advance_spinner_index()
    }

    fn on_route_mounted(&mut self, route: &Route) {
        self.page_scroll = 0;
        self.parallax.on_scroll(0);
        match route.view {
            ViewKind::Home => {
                self.banner_registration = None;
                let snapshot = self.provider.navigation();
                self.journey.restart(&snapshot.ids_key(), snapshot.len());
            }
            ViewKind::Page(_) => {
                self.banner_registration = Some(
                    self.parallax
                        .register(&self.banner_offset, BANNER_PARALLAX_SPEED),
                );
            }
        }
    }

    /// The mounted view, if any.
    ///
    pub fn visible_view(&self) -> Option<&ViewLifecycle> {
        self.router.visible()
    }

    pub fn is_home_visible(&self) -> bool {
        self.router
            .visible()
            .map(|v| v.route().view == ViewKind::Home && v.phase() != LifecyclePhase::Removed)
            .unwrap_or(false)
    }

    /// Ask the transition coordinator for a route change.
    ///
    pub fn navigate(&mut self, path: &str, now: Instant) -> bool {
        self.transition.navigate_to(path, now)
    }

    pub fn home_index(&self) -> usize {
        self.home_index
    }

    /// When the home selection last moved, for the hover fade.
    ///
    pub fn home_hover_since(&self) -> Option<Instant> {
        self.home_hover_since
    }

    pub fn next_home_entry(&mut self, now: Instant) -> &mut Self {
        let len = self.provider.navigation().len();
        if len > 0 {
            self.home_index = (self.home_index + 1) % len;
            self.home_hover_since = Some(now);
        }
        self
    }

    pub fn previous_home_entry(&mut self, now: Instant) -> &mut Self {
        let len = self.provider.navigation().len();
        if len > 0 {
            self.home_index = (self.home_index + len - 1) % len;
            self.home_hover_since = Some(now);
        }
        self
    }

    pub fn selected_home_entry(&self) -> Option<&PageEntry> {
        self.provider.navigation().get(self.home_index)
    }

    /// Follow the selected home entry.
    ///
    pub fn open_home_entry(&mut self, now: Instant) -> bool {
        match self.selected_home_entry().map(|p| p.path.clone()) {
            Some(path) => self.navigate(&path, now),
            None => false,
        }
    }

    pub fn go_home(&mut self, now: Instant) -> bool {
        self.navigate(HOME_PATH, now)
    }

    /// Follow the "next page" link, looping from the last page to the first.
    ///
    pub fn go_next_page(&mut self, now: Instant) -> bool {
        let next = self
            .provider
            .navigation()
            .next_after(self.transition.current_path())
            .map(|p| p.path.clone());
        match next {
            Some(path) => self.navigate(&path, now),
            None => false,
        }
    }

    pub fn page_scroll(&self) -> u16 {
        self.page_scroll
    }

    /// Scroll the page body and schedule a parallax frame.
    ///
    pub fn scroll_page(&mut self, scroll: Scroll) -> &mut Self {
        let page_height = self.terminal_size.height.saturating_sub(4);
        self.page_scroll = scroll.apply(self.page_scroll, page_height);
        self.parallax.on_scroll(self.page_scroll as i32);
        self
    }

    /// Current parallax offset applied to the page banner.
    ///
    pub fn banner_offset(&self) -> i32 {
        self.banner_offset.offset()
    }

    /// Leave the site for the admin panel. Pending navigation is dropped.
    ///
    pub fn enter_admin(&mut self) -> &mut Self {
        self.transition.teardown();
        self.parallax.cancel();
        self.mode = Mode::Admin;
        info!("Entering admin panel.");
        if self.auth.is_signed_in() {
            let screen = self.admin.screen();
            self.load_admin_screen(screen);
        }
        self
    }

    /// Return to the site on the path that was showing.
    ///
    pub fn leave_admin(&mut self, now: Instant) -> &mut Self {
        self.mode = Mode::Site;
        let path = self.transition.current_path().to_string();
        self.transition.reset_to(&path);
        self.router.mount_initial(&path, now);
        if self.router.visible().is_none() {
            self.transition.reset_to(HOME_PATH);
            self.router.mount_initial(HOME_PATH, now);
        }
        self
    }

    /// Open the screen under the admin menu cursor and load its data.
    ///
    pub fn open_admin_screen(&mut self) -> &mut Self {
        let screen = self.admin.open_selected();
        self.load_admin_screen(screen);
        self
    }

    pub fn load_admin_screen(&mut self, screen: AdminScreen) -> &mut Self {
        self.admin.set_loading(true);
        self.dispatch(NetworkEvent::AdminLoad { screen });
        self
    }

    /// Submit the login form.
    ///
    pub fn submit_login(&mut self) -> bool {
        match self.admin.login_mut().submit() {
            Some((email, password)) => {
                self.dispatch(NetworkEvent::Login { email, password });
                true
            }
            None => false,
        }
    }

    pub fn logout(&mut self) -> &mut Self {
        self.dispatch(NetworkEvent::Logout);
        self
    }

    fn ensure_writable(&self) -> Result<(), StateError> {
        if !self.auth.is_signed_in() {
            return Err(StateError::NotSignedIn);
        }
        if self.admin.is_busy() {
            return Err(StateError::SaveInProgress);
        }
        Ok(())
    }

    /// Send the current admin screen's edits to the store.
    ///
    pub fn save_admin_screen(&mut self) -> Result<(), StateError> {
        self.ensure_writable()?;
        let screen = self.admin.screen();
        let event = match screen {
            AdminScreen::About => Some(NetworkEvent::SaveAbout {
                about: self.admin.about_to_save(),
            }),
            AdminScreen::Experience => self
                .admin
                .experience_to_save()
                .map(|(id, entry)| NetworkEvent::SaveExperience { id, entry }),
            AdminScreen::Projects => self
                .admin
                .project_to_save()
                .map(|(id, project)| NetworkEvent::SaveProject { id, project }),
            AdminScreen::Contact => Some(NetworkEvent::SaveContact {
                contact: self.admin.contact_to_save(),
            }),
            AdminScreen::Socials => Some(NetworkEvent::SaveSocials {
                links: self.admin.socials().rows_to_save(),
            }),
            AdminScreen::Settings => Some(NetworkEvent::SaveSettings {
                settings: self.admin.settings_to_save(),
            }),
            AdminScreen::Dashboard => None,
        };
        let event = event.ok_or_else(|| StateError::NothingToSave {
            screen: screen.title().to_string(),
        })?;
        self.try_dispatch(event)?;
        self.admin.set_busy(true).set_message(crate::admin::AdminMessage::info("Saving..."));
        Ok(())
    }

    /// Delete the record awaiting confirmation on a list screen.
    ///
    pub fn confirm_delete(&mut self) -> Result<bool, StateError> {
        self.ensure_writable()?;
        let event = match self.admin.screen() {
            AdminScreen::Experience => self
                .admin
                .experience_mut()
                .take_delete()
                .map(|id| NetworkEvent::DeleteExperience { id }),
            AdminScreen::Projects => self
                .admin
                .projects_mut()
                .take_delete()
                .map(|id| NetworkEvent::DeleteProject { id }),
            _ => None,
        };
        match event {
            Some(event) => {
                self.try_dispatch(event)?;
                self.admin.set_busy(true);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Start uploading the path typed into the active form's upload prompt.
    ///
    pub fn start_upload(&mut self) -> Result<bool, StateError> {
        self.ensure_writable()?;
        let screen = self.admin.screen();
        let prompt = match self.admin.active_form_mut().and_then(|f| f.take_upload()) {
            Some(prompt) => prompt,
            None => return Ok(false),
        };
        self.try_dispatch(NetworkEvent::Upload {
            screen,
            field: prompt.field,
            path: PathBuf::from(prompt.path.trim()),
        })?;
        self.admin
            .set_busy(true)
            .set_message(crate::admin::AdminMessage::info("Uploading..."));
        Ok(true)
    }

    pub fn admin_focus(&self) -> AdminFocus {
        self.admin.focus()
    }

    /// Ask the saver thread to persist the configuration.
    ///
    pub fn request_config_save(&self) {
        if let Some(sender) = &self.config_save_sender {
            if let Err(err) = sender.send(()) {
                error!("Failed to request config save: {}", err);
            }
        }
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Err(err) = self.try_dispatch(event) {
            error!("Failed to dispatch network event: {}", err);
        }
    }

    fn try_dispatch(&self, event: NetworkEvent) -> Result<(), StateError> {
        match &self.net_sender {
            Some(net_sender) => net_sender
                .send(event)
                .map_err(|e| StateError::ChannelClosed(e.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, Session};
    use crate::content::{fallback, Settings};
    use crate::navigation::default_pages;
    use crate::transition::{CLICK_PAUSE, SETTLE_DELAY};
    use fake::{Fake, Faker};
    use std::sync::mpsc;
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn loaded_state(now: Instant) -> State {
        let mut state = State::default();
        state.finish_content_load(
            FetchedContent {
                settings: Some(fallback::settings()),
                ..Default::default()
            },
            now,
        );
        state
    }

    fn connected_state() -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let (config_tx, _config_rx) = mpsc::channel();
        let state = State::new(tx, config_tx, Theme::default(), false, LogBuffer::default());
        (state, rx)
    }

    fn signed_in(state: &mut State) {
        state.auth_mut().signed_in(Session {
            user: CurrentUser {
                uid: uuid::Uuid::parse_str("550e8400-e29b-41d4-a716-446655440100")
                    .expect("Hardcoded test UUID should be valid")
                    .to_string(),
                email: "me@example.com".to_string(),
            },
            id_token: Faker.fake(),
            refresh_token: Faker.fake(),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        });
    }

    /// Tick every 60 ms until `until`.
    fn run_ticks(state: &mut State, from: Instant, until: Duration) -> Instant {
        let mut now = from;
        while now < from + until {
            now += ms(60);
            state.on_tick(now);
        }
        now
    }

    #[test]
    fn set_terminal_size() {
        let mut state = State::default();
        let size = Rect::new(Faker.fake(), Faker.fake(), Faker.fake(), Faker.fake());
        state.set_terminal_size(size);
        assert_eq!(size, state.terminal_size);
    }

    #[test]
    fn advance_spinner_index() {
        let mut state = State::default();
        state.advance_spinner_index();
        assert_eq!(state.spinner_index, 1);
        for _ in 0..SPINNER_FRAME_COUNT {
            state.advance_spinner_index();
        }
        assert_eq!(state.spinner_index, 1);
    }

    #[test]
    fn starts_on_home() {
        let state = State::default();
        assert!(state.is_home_visible());
        assert!(state.transition().is_home());
        assert!(state.provider().is_loading());
    }

    #[test]
    fn journey_waits_for_content() {
        let start = Instant::now();
        let mut state = State::default();
        state.on_tick(start + ms(60));
        assert!(!state.journey().is_mounted());

        state.finish_content_load(FetchedContent::default(), start);
        state.on_tick(start + ms(120));
        state.on_tick(start + ms(180));
        assert!(state.journey().is_mounted());
    }

    #[test]
    fn home_entry_navigates_after_pause_and_exit() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        state.next_home_entry(start);
        assert_eq!(state.selected_home_entry().map(|p| p.id.as_str()), Some("experience"));
        assert!(state.open_home_entry(start));
        assert!(!state.go_home(start));

        let now = run_ticks(&mut state, start, CLICK_PAUSE);
        assert_eq!(state.transition().current_path(), "/experience");
        assert!(state.is_home_visible());

        let now = run_ticks(&mut state, now, ms(900));
        let view = state.visible_view().unwrap();
        assert_eq!(view.route().path, "/experience");
        assert!(!state.transition().is_transitioning());
        assert!(now >= start + CLICK_PAUSE + SETTLE_DELAY);
    }

    #[test]
    fn next_page_loops_to_first() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        state.previous_home_entry(start);
        assert_eq!(state.selected_home_entry().map(|p| p.id.as_str()), Some("contact"));
        state.open_home_entry(start);
        let now = run_ticks(&mut state, start, ms(1500));
        assert_eq!(state.transition().current_path(), "/contact");
        assert!(state.go_next_page(now));
        run_ticks(&mut state, now, CLICK_PAUSE);
        assert_eq!(state.transition().current_path(), "/about");
    }

    #[test]
    fn page_scroll_moves_banner_at_half_speed() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        state.set_terminal_size(Rect::new(0, 0, 80, 24));
        state.open_home_entry(start);
        let now = run_ticks(&mut state, start, ms(1500));
        assert!(!state.is_home_visible());

        for _ in 0..4 {
            state.scroll_page(Scroll::Down);
        }
        assert_eq!(state.banner_offset(), 0);
        state.on_tick(now + ms(60));
        assert_eq!(state.page_scroll(), 4);
        assert_eq!(state.banner_offset(), 2);
    }

    #[test]
    fn hidden_page_leaves_router_when_settings_change() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        state.open_home_entry(start);
        let now = run_ticks(&mut state, start, ms(1500));
        assert_eq!(state.visible_view().unwrap().route().path, "/about");

        let mut pages = default_pages();
        pages[0].visible = false;
        state.finish_content_load(
            FetchedContent {
                settings: Some(Settings {
                    pages,
                    ..fallback::settings()
                }),
                ..Default::default()
            },
            now,
        );
        run_ticks(&mut state, now, ms(700));
        assert!(state.visible_view().is_none());
        assert_eq!(state.navigation().len(), 3);
    }

    #[test]
    fn accent_follows_theme_color() {
        let mut state = State::default();
        state.finish_content_load(
            FetchedContent {
                settings: Some(Settings {
                    site_title: "Portfolio".to_string(),
                    theme_color: "#102030".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            Instant::now(),
        );
        assert_eq!(
            (state.theme.accent.r, state.theme.accent.g, state.theme.accent.b),
            (0x10, 0x20, 0x30)
        );
        assert_eq!(state.site_title(), "Portfolio");
    }

    #[test]
    fn admin_round_trip_keeps_path() {
        let start = Instant::now();
        let (mut state, rx) = connected_state();
        state.finish_content_load(FetchedContent::default(), start);
        state.open_home_entry(start);
        state.enter_admin();
        assert_eq!(state.mode(), Mode::Admin);
        assert!(!state.transition().is_transitioning());
        assert!(rx.try_recv().is_err());

        state.leave_admin(start + ms(10));
        assert_eq!(state.mode(), Mode::Site);
        assert!(state.is_home_visible());
    }

    #[test]
    fn save_requires_sign_in() {
        let (mut state, rx) = connected_state();
        state.enter_admin();
        state.admin_mut().open(AdminScreen::Contact);
        assert!(matches!(state.save_admin_screen(), Err(StateError::NotSignedIn)));

        signed_in(&mut state);
        state.save_admin_screen().unwrap();
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::SaveContact { .. })));
        assert!(matches!(state.save_admin_screen(), Err(StateError::SaveInProgress)));
    }

    #[test]
    fn dashboard_has_nothing_to_save() {
        let (mut state, _rx) = connected_state();
        signed_in(&mut state);
        assert!(matches!(
            state.save_admin_screen(),
            Err(StateError::NothingToSave { .. })
        ));
    }

    #[test]
    fn entering_admin_when_signed_in_loads_screen() {
        let (mut state, rx) = connected_state();
        signed_in(&mut state);
        state.enter_admin();
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::AdminLoad {
                screen: AdminScreen::Dashboard
            })
        ));
        assert!(state.admin().is_loading());
    }

    #[test]
    fn confirm_delete_sends_selected_id() {
        let (mut state, rx) = connected_state();
        signed_in(&mut state);
        state.admin_mut().open(AdminScreen::Projects);
        state.admin_mut().load_projects(vec![crate::content::Project {
            id: Some("p1".to_string()),
            ..Default::default()
        }]);
        assert!(!state.confirm_delete().unwrap());
        state.admin_mut().projects_mut().request_delete();
        assert!(state.confirm_delete().unwrap());
        match rx.try_recv() {
            Ok(NetworkEvent::DeleteProject { id }) => assert_eq!(id, "p1"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn start_upload_uses_prompt() {
        let (mut state, rx) = connected_state();
        signed_in(&mut state);
        state.admin_mut().open(AdminScreen::About);
        let form = state.admin_mut().active_form_mut().unwrap();
        while form.selected_field().map(|f| f.key) != Some("image_url") {
            form.next_field();
        }
        assert!(form.begin_upload());
        for c in "/tmp/me.png".chars() {
            form.insert_char(c);
        }
        assert!(state.start_upload().unwrap());
        match rx.try_recv() {
            Ok(NetworkEvent::Upload {
                screen,
                field,
                path,
            }) => {
                assert_eq!(screen, AdminScreen::About);
                assert_eq!(field, "image_url");
                assert_eq!(path, PathBuf::from("/tmp/me.png"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn login_dispatches_credentials() {
        let (mut state, rx) = connected_state();
        for c in "me@example.com".chars() {
            state.admin_mut().login_mut().insert_char(c);
        }
        state.admin_mut().login_mut().toggle_field().insert_char('x');
        assert!(state.submit_login());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::Login { .. })));
        assert!(!state.submit_login());
    }
}
