use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rspotify::{AuthCodeSpotify, Config, Token};
use tokio::sync::mpsc::UnboundedReceiver;

use spotify_preview::audio::RodioEngine;
use spotify_preview::config::{AppConfig, SessionConfig};
use spotify_preview::context::shared_track_context;
use spotify_preview::controller::AppController;
use spotify_preview::logging;
use spotify_preview::model::{AppModel, SpotifyClient, TrackCatalog};
use spotify_preview::playback::{PlaybackSession, ToastNotifier};
use spotify_preview::view::AppView;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    config.validate()?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Spotify Preview Starting ===");

    let (spotify, user_name) = match config.access_token.as_deref() {
        Some(token) => {
            let client = SpotifyClient::new(setup_rspotify(token).await?);
            match client.current_user_name().await {
                Ok(user) => {
                    tracing::info!(user = %user, "rspotify authorized successfully");
                    (Some(client), Some(user))
                }
                Err(e) => {
                    tracing::error!(error = %e, "rspotify authentication failed");
                    return Err(anyhow!("Spotify authorization failed: {e}"));
                }
            }
        }
        None => {
            tracing::info!("No access token, only the local queue is available");
            (None, None)
        }
    };

    let catalog = TrackCatalog::new(spotify, config.queue_file.clone(), config.library_limit);
    let engine = Arc::new(RodioEngine::new(config.tick_interval())?);
    let (notifier, notices) = ToastNotifier::new();
    let (publisher, current_track) = shared_track_context();

    let session = PlaybackSession::new(engine, Arc::new(notifier), publisher, SessionConfig::default());
    let model = Arc::new(AppModel::new(catalog));
    let controller = AppController::new(model.clone(), session.clone(), current_track);

    if let Some(name) = user_name {
        model.set_user_name(name).await;
    }

    controller.load_library().await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, notices).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Release the live sound before the output thread goes away
    session.pause_and_clear().await;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Spotify Preview shutting down");
    Ok(())
}

/// Build a Web API client around a pre-acquired token. Refresh is not attempted.
async fn setup_rspotify(access_token: &str) -> Result<AuthCodeSpotify> {
    let spotify = AuthCodeSpotify::with_config(
        Default::default(),
        Default::default(),
        Config {
            token_cached: false,
            token_refreshing: false,
            ..Default::default()
        },
    );

    let token = Token {
        access_token: access_token.to_string(),
        expires_in: chrono::Duration::seconds(3600),
        expires_at: Some(chrono::Utc::now() + chrono::Duration::seconds(3600)),
        ..Default::default()
    };

    *spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow!("rspotify token lock unavailable"))? = Some(token);
    tracing::debug!("rspotify token set");

    Ok(spotify)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
    mut notices: UnboundedReceiver<String>,
) -> Result<()> {
    loop {
        while let Ok(notice) = notices.try_recv() {
            model.show_notice(notice).await;
        }
        model.auto_clear_expired().await;

        let ui_state = model.get_ui_state().await;
        let player = controller.mini_player().state().await;

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &player);
        })?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
