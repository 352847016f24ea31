//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives catalog requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Debounced, cancellable search for the home screen
//! - `navigation`: Location routing and the show detail screen

mod input;
mod search;
mod navigation;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::model::{AppModel, CatalogApi, DetailPhase, Screen, SearchOutcome};
use crate::view::render_screen;

pub use search::DEFAULT_DEBOUNCE;
use search::SearchSession;

/// Poll interval used while waiting for pending requests to settle
const SETTLE_POLL: Duration = Duration::from_millis(25);

#[derive(Clone)]
pub struct AppController<C: CatalogApi> {
    pub(crate) model: Arc<AppModel>,
    pub(crate) catalog: C,
    session: Arc<Mutex<SearchSession>>,
    debounce: Duration,
}

impl<C: CatalogApi> AppController<C> {
    pub fn new(model: Arc<AppModel>, catalog: C, debounce: Duration) -> Self {
        Self {
            model,
            catalog,
            session: Arc::new(Mutex::new(SearchSession::default())),
            debounce,
        }
    }

    /// Wait until the displayed screen no longer waits on the catalog
    pub async fn wait_until_settled(&self) {
        loop {
            let busy = match self.model.get_screen().await {
                Screen::Home(home) => home.pending || home.outcome == SearchOutcome::Loading,
                Screen::Detail { phase, .. } => phase == DetailPhase::Loading,
                Screen::NotFound => false,
            };
            if !busy {
                return;
            }
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }

    /// Headless rendering: resolve `location` once, optionally search for
    /// `query` on the home screen, and serialize the settled screen as HTML
    pub async fn render_location_html(&self, location: &str, query: Option<&str>) -> String {
        self.navigate(location).await;

        if let Some(query) = query {
            self.model
                .update_home(|home| home.input = query.to_string())
                .await;
            self.submit_search().await;
        }

        self.wait_until_settled().await;
        render_screen(&self.model.get_screen().await).to_html()
    }
}
