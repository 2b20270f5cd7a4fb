mod config;
mod controller;
mod logging;
mod media;
mod model;
mod share;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use controller::AppController;
use media::HttpMediaElement;
use model::{AppModel, PlaylistSource, Sequencer};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== linkbio-rs Starting ===");

    // The active element reports into the sequencer; the preload elements
    // only warm the next and previous tracks, their events go nowhere.
    let (media_tx, media_rx) = media::event_channel();
    let (preload_next_tx, _) = media::event_channel();
    let (preload_prev_tx, _) = media::event_channel();

    let sequencer = Sequencer::new(
        HttpMediaElement::new(media_tx),
        HttpMediaElement::new(preload_next_tx),
        HttpMediaElement::new(preload_prev_tx),
    );

    let model = Arc::new(Mutex::new(AppModel::new(sequencer)));
    let controller = AppController::new(model.clone());

    controller.start_media_event_listener(media_rx);

    // Fetch the playlist in the background; the card renders immediately and
    // the player shows its loading placeholder until tracks arrive.
    let model_for_fetch = model.clone();
    tokio::spawn(async move {
        let source = PlaylistSource::from_config();
        let playlist = match source.fetch().await {
            Ok(playlist) => playlist,
            Err(e) => {
                tracing::error!(error = %e, "playlist fetch failed, player stays empty");
                Vec::new()
            }
        };
        model_for_fetch.lock().await.sequencer.load(playlist);
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("linkbio-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (player, ui_state, should_quit) = {
            let mut model_guard = model.lock().await;

            // Expire the copy toast after its display window
            model_guard.auto_clear_toast();

            (
                model_guard.sequencer.snapshot(),
                model_guard.ui_state().clone(),
                model_guard.should_quit(),
            )
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &player, &ui_state);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
