use crate::admin::{AdminMessage, DashboardStats};
use crate::auth::IdentityClient;
use crate::content::{About, Contact, Experience, Project, Settings, SocialLink};
use crate::firestore::{FirestoreError, Portfolio};
use crate::state::{AdminScreen, Mode, State};
use crate::upload::Uploader;
use anyhow::Result;
use log::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadContent,
    RestoreSession {
        refresh_token: Option<String>,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    AdminLoad {
        screen: AdminScreen,
    },
    SaveAbout {
        about: About,
    },
    SaveExperience {
        id: Option<String>,
        entry: Experience,
    },
    DeleteExperience {
        id: String,
    },
    SaveProject {
        id: Option<String>,
        project: Project,
    },
    DeleteProject {
        id: String,
    },
    SaveContact {
        contact: Contact,
    },
    SaveSocials {
        links: Vec<SocialLink>,
    },
    SaveSettings {
        settings: Settings,
    },
    Upload {
        screen: AdminScreen,
        field: &'static str,
        path: PathBuf,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    portfolio: &'a mut Portfolio,
    identity: &'a IdentityClient,
    uploader: &'a Uploader,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state and the remote services.
    ///
    pub fn new(
        state: &'a Arc<Mutex<State>>,
        portfolio: &'a mut Portfolio,
        identity: &'a IdentityClient,
        uploader: &'a Uploader,
    ) -> Self {
        Handler {
            state,
            portfolio,
            identity,
            uploader,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        match &event {
            Event::Login { email, .. } => debug!("Processing network event 'Login' for {}...", email),
            other => debug!("Processing network event '{:?}'...", other),
        }
        match event {
            Event::LoadContent => self.load_content().await?,
            Event::RestoreSession { refresh_token } => self.restore_session(refresh_token).await?,
            Event::Login { email, password } => self.login(email, password).await?,
            Event::Logout => self.logout().await?,
            Event::AdminLoad { screen } => self.admin_load(screen).await?,
            Event::SaveAbout { about } => {
                self.refresh_session().await;
                let result = self.portfolio.update_about(&about).await;
                self.finish_write(result, "About saved successfully!", AdminScreen::About)
                    .await?
            }
            Event::SaveExperience { id, entry } => {
                self.refresh_session().await;
                let result = match id {
                    Some(id) => self.portfolio.update_experience(&id, &entry).await,
                    None => self.portfolio.create_experience(&entry).await.map(|_| ()),
                };
                self.finish_write(result, "Experience saved successfully!", AdminScreen::Experience)
                    .await?
            }
            Event::DeleteExperience { id } => {
                self.refresh_session().await;
                let result = self.portfolio.delete_experience(&id).await;
                self.finish_write(result, "Experience deleted.", AdminScreen::Experience)
                    .await?
            }
            Event::SaveProject { id, project } => {
                self.refresh_session().await;
                let result = match id {
                    Some(id) => self.portfolio.update_project(&id, &project).await,
                    None => self.portfolio.create_project(&project).await.map(|_| ()),
                };
                self.finish_write(result, "Project saved successfully!", AdminScreen::Projects)
                    .await?
            }
            Event::DeleteProject { id } => {
                self.refresh_session().await;
                let result = self.portfolio.delete_project(&id).await;
                self.finish_write(result, "Project deleted.", AdminScreen::Projects)
                    .await?
            }
            Event::SaveContact { contact } => {
                self.refresh_session().await;
                let result = self.portfolio.update_contact(&contact).await;
                self.finish_write(result, "Contact saved successfully!", AdminScreen::Contact)
                    .await?
            }
            Event::SaveSocials { links } => {
                self.refresh_session().await;
                let result = self.portfolio.replace_socials(&links).await.map(|_| ());
                self.finish_write(result, "Social links saved successfully!", AdminScreen::Socials)
                    .await?
            }
            Event::SaveSettings { settings } => {
                self.refresh_session().await;
                let result = self.portfolio.update_settings(&settings).await;
                self.finish_write(result, "Settings saved successfully!", AdminScreen::Settings)
                    .await?
            }
            Event::Upload {
                screen,
                field,
                path,
            } => self.upload(screen, field, path).await?,
        }
        Ok(())
    }

    /// Fetch every content resource and install the resolved bundle.
    ///
    async fn load_content(&mut self) -> Result<()> {
        info!("Fetching portfolio content...");
        let fetched = self.portfolio.fetch_all().await;
        let mut state = self.state.lock().await;
        state.finish_content_load(fetched, Instant::now());
        info!("Portfolio content ready.");
        Ok(())
    }

    /// Resolve the startup auth check from a persisted refresh token.
    ///
    async fn restore_session(&mut self, refresh_token: Option<String>) -> Result<()> {
        let session = match refresh_token {
            Some(token) => match self.identity.restore(&token).await {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Could not restore session: {}", e);
                    None
                }
            },
            None => None,
        };
        self.portfolio
            .set_id_token(session.as_ref().map(|s| s.id_token.clone()));
        let mut state = self.state.lock().await;
        state.auth_mut().resolve(session);
        state.request_config_save();
        if state.mode() == Mode::Admin && state.auth().is_signed_in() {
            let screen = state.admin().screen();
            state.load_admin_screen(screen);
        }
        Ok(())
    }

    async fn login(&mut self, email: String, password: String) -> Result<()> {
        match self.identity.sign_in(&email, &password).await {
            Ok(session) => {
                self.portfolio.set_id_token(Some(session.id_token.clone()));
                let screen;
                {
                    let mut state = self.state.lock().await;
                    state.auth_mut().signed_in(session);
                    state.admin_mut().login_mut().reset();
                    state.request_config_save();
                    screen = state.admin().screen();
                }
                self.admin_load(screen).await?;
            }
            Err(e) => {
                warn!("Sign-in failed for {}: {}", email, e);
                let mut state = self.state.lock().await;
                state.admin_mut().login_mut().failed(e.user_message());
            }
        }
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.portfolio.set_id_token(None);
        let mut state = self.state.lock().await;
        state.auth_mut().signed_out();
        state.admin_mut().login_mut().reset();
        state.request_config_save();
        Ok(())
    }

    /// Exchange the refresh token when the ID token has expired.
    ///
    async fn refresh_session(&mut self) {
        let refresh_token = {
            let state = self.state.lock().await;
            match state.auth().session() {
                Some(session) if session.is_expired(chrono::Utc::now()) => {
                    session.refresh_token.clone()
                }
                _ => return,
            }
        };
        debug!("ID token expired, refreshing...");
        match self.identity.restore(&refresh_token).await {
            Ok(session) => {
                self.portfolio.set_id_token(Some(session.id_token.clone()));
                let mut state = self.state.lock().await;
                state.auth_mut().signed_in(session);
                state.request_config_save();
            }
            Err(e) => warn!("Failed to refresh session: {}", e),
        }
    }

    /// Load the data behind an admin screen.
    ///
    async fn admin_load(&mut self, screen: AdminScreen) -> Result<()> {
        debug!("Loading admin screen {}...", screen.title());
        let mut failure: Option<FirestoreError> = None;
        match screen {
            AdminScreen::Dashboard => {
                let (about, experience, projects, contact, socials) = tokio::join!(
                    self.portfolio.fetch_about(),
                    self.portfolio.fetch_experience(),
                    self.portfolio.fetch_projects(),
                    self.portfolio.fetch_contact(),
                    self.portfolio.fetch_socials(),
                );
                let stats = DashboardStats::from_reads(
                    about.ok().flatten().as_ref(),
                    experience.ok().as_deref(),
                    projects.ok().as_deref(),
                    contact.ok().flatten().as_ref(),
                    socials.ok().as_deref(),
                );
                self.state.lock().await.admin_mut().load_stats(stats);
            }
            AdminScreen::About => {
                let about = self.portfolio.fetch_about().await;
                let mut state = self.state.lock().await;
                match about {
                    Ok(about) => state.admin_mut().load_about(about),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_about(None)
                    }
                };
            }
            AdminScreen::Experience => {
                let entries = self.portfolio.fetch_experience().await;
                let mut state = self.state.lock().await;
                match entries {
                    Ok(entries) => state.admin_mut().load_experience(entries),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_experience(vec![])
                    }
                };
            }
            AdminScreen::Projects => {
                let projects = self.portfolio.fetch_projects().await;
                let mut state = self.state.lock().await;
                match projects {
                    Ok(projects) => state.admin_mut().load_projects(projects),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_projects(vec![])
                    }
                };
            }
            AdminScreen::Contact => {
                let contact = self.portfolio.fetch_contact().await;
                let mut state = self.state.lock().await;
                match contact {
                    Ok(contact) => state.admin_mut().load_contact(contact),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_contact(None)
                    }
                };
            }
            AdminScreen::Socials => {
                let links = self.portfolio.fetch_socials().await;
                let mut state = self.state.lock().await;
                match links {
                    Ok(links) => state.admin_mut().load_socials(links),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_socials(vec![])
                    }
                };
            }
            AdminScreen::Settings => {
                let settings = self.portfolio.fetch_settings().await;
                let mut state = self.state.lock().await;
                match settings {
                    Ok(settings) => state.admin_mut().load_settings(settings),
                    Err(e) => {
                        failure = Some(e);
                        state.admin_mut().load_settings(None)
                    }
                };
            }
        }
        if let Some(e) = failure {
            error!("Failed to load {}: {}", screen.title(), e);
            let mut state = self.state.lock().await;
            state
                .admin_mut()
                .set_message(AdminMessage::error(&format!("Failed to load: {}", e)));
        }
        Ok(())
    }

    /// Report a write inline. On success the screen is reloaded and the
    /// site content refreshed so edits show up live.
    ///
    async fn finish_write(
        &mut self,
        result: Result<(), FirestoreError>,
        success: &str,
        screen: AdminScreen,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                info!("{}", success);
                {
                    let mut state = self.state.lock().await;
                    let admin = state.admin_mut();
                    admin.set_busy(false).set_message(AdminMessage::success(success));
                    admin.experience_mut().close_draft();
                    admin.projects_mut().close_draft();
                    state.request_content_reload();
                }
                self.admin_load(screen).await?;
                self.load_content().await?;
            }
            Err(e) => {
                error!("Failed to save {}: {}", screen.title(), e);
                let mut state = self.state.lock().await;
                state
                    .admin_mut()
                    .set_busy(false)
                    .set_message(AdminMessage::error(&format!("Failed to save: {}", e)));
            }
        }
        Ok(())
    }

    /// Upload a local file and put its URL into the originating form.
    ///
    async fn upload(&mut self, screen: AdminScreen, field: &'static str, path: PathBuf) -> Result<()> {
        info!("Uploading {}...", path.display());
        let result = self.uploader.upload_path(&path).await;
        let mut state = self.state.lock().await;
        let admin = state.admin_mut();
        admin.set_busy(false);
        match result {
            Ok(file) => {
                info!("Uploaded {} as {}.", path.display(), file.public_id);
                admin.apply_upload(screen, field, &file.url);
                admin.set_message(AdminMessage::success("Upload complete. Save to keep it."));
            }
            Err(e) => {
                error!("Upload of {} failed: {}", path.display(), e);
                admin.set_message(AdminMessage::error(&format!("Upload failed: {}", e)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback;
    use crate::state::Mode;
    use httpmock::MockServer;
    use serde_json::json;

    struct Services {
        portfolio: Portfolio,
        identity: IdentityClient,
        uploader: Uploader,
    }

    fn services(server: &MockServer) -> Services {
        Services {
            portfolio: Portfolio::new(&server.base_url(), "demo", "key"),
            identity: IdentityClient::new(&server.base_url(), &server.base_url(), "key"),
            uploader: Uploader::new(&server.base_url(), "", ""),
        }
    }

    #[tokio::test]
    async fn load_content_falls_back_when_store_is_empty() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET");
                then.status(404).json_body(json!({
                    "error": { "code": 404, "message": "not found" }
                }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut services = services(&server);
        let mut handler = Handler::new(
            &state,
            &mut services.portfolio,
            &services.identity,
            &services.uploader,
        );
        handler.handle(Event::LoadContent).await?;

        let state = state.lock().await;
        assert!(!state.provider().is_loading());
        assert_eq!(state.provider().bundle(), Some(&fallback::bundle()));
        assert_eq!(state.mode(), Mode::Site);
        Ok(())
    }

    #[tokio::test]
    async fn login_failure_is_reported_on_form() -> Result<()> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/v1/accounts:signInWithPassword");
                then.status(400).json_body(json!({
                    "error": { "code": 400, "message": "INVALID_PASSWORD" }
                }));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let mut services = services(&server);
        let mut handler = Handler::new(
            &state,
            &mut services.portfolio,
            &services.identity,
            &services.uploader,
        );
        handler
            .handle(Event::Login {
                email: "me@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await?;

        let state = state.lock().await;
        assert!(!state.auth().is_signed_in());
        assert_eq!(
            state.admin().login().error.as_deref(),
            Some("Invalid email or password")
        );
        Ok(())
    }

    #[tokio::test]
    async fn restore_without_token_signs_out() -> Result<()> {
        let server = MockServer::start();
        let state = Arc::new(Mutex::new(State::default()));
        let mut services = services(&server);
        let mut handler = Handler::new(
            &state,
            &mut services.portfolio,
            &services.identity,
            &services.uploader,
        );
        handler
            .handle(Event::RestoreSession {
                refresh_token: None,
            })
            .await?;
        let state = state.lock().await;
        assert!(!state.auth().is_checking());
        assert!(!state.auth().is_signed_in());
        Ok(())
    }

    #[tokio::test]
    async fn save_without_token_reports_error() -> Result<()> {
        let server = MockServer::start();
        let state = Arc::new(Mutex::new(State::default()));
        state.lock().await.admin_mut().set_busy(true);
        let mut services = services(&server);
        let mut handler = Handler::new(
            &state,
            &mut services.portfolio,
            &services.identity,
            &services.uploader,
        );
        handler
            .handle(Event::SaveContact {
                contact: Contact::default(),
            })
            .await?;
        let state = state.lock().await;
        let message = state.admin().message().cloned().unwrap();
        assert!(message.is_error());
        assert!(message.text().starts_with("Failed to save"));
        assert!(!state.admin().is_busy());
        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_upload_reports_error() -> Result<()> {
        let server = MockServer::start();
        let state = Arc::new(Mutex::new(State::default()));
        let mut services = services(&server);
        let mut handler = Handler::new(
            &state,
            &mut services.portfolio,
            &services.identity,
            &services.uploader,
        );
        handler
            .handle(Event::Upload {
                screen: AdminScreen::About,
                field: "image_url",
                path: PathBuf::from("/tmp/missing.png"),
            })
            .await?;
        let state = state.lock().await;
        let message = state.admin().message().cloned().unwrap();
        assert!(message.text().starts_with("Upload failed"));
        assert_eq!(state.admin().about().value("image_url"), "");
        Ok(())
    }
}
