use crate::auth::IdentityClient;
use crate::config::Config;
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::firestore::Portfolio;
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::State;
use crate::ui::Theme;
use crate::upload::Uploader;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type ConfigSaveSender = std::sync::mpsc::Sender<()>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<()>;

/// Options given on the command line.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct LaunchOptions {
    pub start_in_admin: bool,
    /// Bypass sign-in for this run only; never written to the config file.
    pub dev_auth_bypass: bool,
}

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, options: LaunchOptions) -> Result<()> {
        let log = LogBuffer::default();
        CustomLogger::init(LevelFilter::Debug, log.clone())
            .map_err(|e| AppError::Logger(e.to_string()))?;

        info!("Starting application...");
        if !config.has_firebase() {
            warn!("Firebase is not configured; the site will show fallback content.");
        }
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using the default.", config.theme_name);
            Theme::default()
        });

        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<()>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(
                tx,
                config_save_tx,
                theme,
                config.dev_auth_bypass || options.dev_auth_bypass,
                log,
            ))),
            config,
        };
        app.start_network(rx)?;
        app.start_config_saver(config_save_rx);
        {
            let mut state = app.state.lock().await;
            state.dispatch(NetworkEvent::RestoreSession {
                refresh_token: app.config.refresh_token.clone(),
            });
            state.request_content();
            if options.start_in_admin {
                state.enter_admin();
            }
        }
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread that persists the refresh token whenever the session
    /// changes.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let state = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                let token = state
                    .blocking_lock()
                    .auth()
                    .refresh_token()
                    .map(str::to_string);
                if let Err(e) = config.save_refresh_token(token) {
                    error!("Failed to save config: {}", e);
                }
            }
        });
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        let cloned_state = Arc::clone(&self.state);
        let firebase = self.config.firebase.clone();
        let cloudinary = self.config.cloudinary.clone();
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut portfolio = Portfolio::new(
                    &firebase.firestore_url,
                    &firebase.project_id,
                    &firebase.api_key,
                );
                let identity = IdentityClient::new(
                    &firebase.identity_url,
                    &firebase.token_url,
                    &firebase.api_key,
                );
                let uploader = Uploader::new(
                    &cloudinary.upload_url,
                    &cloudinary.cloud_name,
                    &cloudinary.upload_preset,
                );
                let mut network_event_handler =
                    NetworkEventHandler::new(&cloned_state, &mut portfolio, &identity, &uploader);
                while let Ok(network_event) = net_receiver.recv() {
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even when the
    /// loop fails.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.render_loop(&mut terminal).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        result
    }

    async fn render_loop(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        let mut title = String::new();
        loop {
            let mut state = self.state.lock().await;
            let site_title = state.site_title();
            if site_title != title {
                execute!(terminal.backend_mut(), SetTitle(&site_title))?;
                title = site_title;
            }
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
