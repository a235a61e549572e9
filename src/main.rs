mod auth;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use auth::SessionStore;
use config::{Cli, Config};
use controller::AppController;
use model::{AppModel, AssetClient, AssetStore, ExtendedAggregator};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load(Cli::parse())?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(api_url = %config.api_url, "=== Catalog Console Starting ===");

    let sessions = Arc::new(SessionStore::open(&config.credentials_file).await);
    let logged_in = sessions.is_logged_in().await;

    let store: Arc<dyn AssetStore> = Arc::new(AssetClient::new(
        &config.api_url,
        sessions.session(),
        config.request_timeout,
    )?);

    let app_model = AppModel::new(ExtendedAggregator::new(store.clone()), logged_in);
    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), store, sessions);

    // A saved session is trusted until the store says otherwise
    if logged_in {
        controller.spawn_refresh();
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, &config.api_url).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Catalog Console shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    api_url: &str,
) -> io::Result<()> {
    loop {
        // Get current state
        let (ui_state, catalog, loading, should_quit) = {
            let model_guard = model.lock().await;

            model_guard.auto_clear_old_notifications().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_catalog().await,
                model_guard.is_loading().await,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &ui_state, &catalog, loading, api_url);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
