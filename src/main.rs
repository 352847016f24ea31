use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tvfinder::config::Config;
use tvfinder::controller::AppController;
use tvfinder::logging;
use tvfinder::model::{AppModel, CatalogApi, TvMazeClient};
use tvfinder::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(api_url = %config.api_url, "=== tvfinder starting ===");

    let catalog = TvMazeClient::new(&config.api_url)?;
    let model = Arc::new(AppModel::new());
    let controller = AppController::new(model.clone(), catalog, config.debounce());

    if config.html {
        let html = controller
            .render_location_html(&config.location, config.query.as_deref())
            .await;
        println!("{}", html);
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial location, as on document ready
    controller.navigate(&config.location).await;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("tvfinder shutting down");
    Ok(())
}

async fn run_app<C: CatalogApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController<C>,
) -> io::Result<()> {
    loop {
        let (root, ui_state, should_quit) = (
            model.get_root_view().await,
            model.get_ui_state().await,
            model.should_quit().await,
        );

        terminal.draw(|f| {
            AppView::render(f, &root, &ui_state);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
