//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::{HomeFocus, HomeState, RootView, Screen, UiState};

/// Main application model containing all state
pub struct AppModel {
    root: Arc<Mutex<RootView>>,
    ui_state: Arc<Mutex<UiState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            root: Arc::new(Mutex::new(RootView::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Root view ownership
    // ========================================================================

    pub async fn get_root_view(&self) -> RootView {
        self.root.lock().await.clone()
    }

    pub async fn get_screen(&self) -> Screen {
        self.root.lock().await.screen.clone()
    }

    pub async fn get_location(&self) -> String {
        self.root.lock().await.location.clone()
    }

    /// Hand the display to a new screen, returning its generation
    pub async fn replace_screen(&self, location: &str, screen: Screen) -> u64 {
        let mut root = self.root.lock().await;
        root.generation += 1;
        root.location = location.to_string();
        root.screen = screen;
        root.generation
    }

    /// Apply `update` only if no navigation happened since `generation`
    pub async fn update_screen_if_current<F>(&self, generation: u64, update: F) -> bool
    where
        F: FnOnce(&mut Screen),
    {
        let mut root = self.root.lock().await;
        if root.generation != generation {
            return false;
        }
        update(&mut root.screen);
        true
    }

    /// Apply `update` to the home state, if home is displayed
    pub async fn update_home<F, R>(&self, update: F) -> Option<R>
    where
        F: FnOnce(&mut HomeState) -> R,
    {
        let mut root = self.root.lock().await;
        match &mut root.screen {
            Screen::Home(home) => Some(update(home)),
            _ => None,
        }
    }

    // ========================================================================
    // Home screen input
    // ========================================================================

    pub async fn append_to_search(&self, c: char) -> Option<String> {
        self.update_home(|home| {
            home.input.push(c);
            home.input.clone()
        })
        .await
    }

    pub async fn backspace_search(&self) -> Option<String> {
        self.update_home(|home| {
            home.input.pop();
            home.input.clone()
        })
        .await
    }

    pub async fn clear_search(&self) -> Option<String> {
        self.update_home(|home| {
            home.input.clear();
            String::new()
        })
        .await
    }

    pub async fn set_home_focus(&self, focus: HomeFocus) {
        self.update_home(|home| {
            if focus == HomeFocus::Results && home.results().is_empty() {
                return;
            }
            home.focus = focus;
        })
        .await;
    }

    pub async fn move_result_selection(&self, delta: isize) {
        self.update_home(|home| {
            let count = home.results().len();
            if count == 0 {
                return;
            }
            let next = home.selected as isize + delta;
            home.selected = next.clamp(0, count as isize - 1) as usize;
        })
        .await;
    }

    pub async fn selected_result_id(&self) -> Option<u64> {
        self.update_home(|home| home.selected_show().map(|show| show.id))
            .await
            .flatten()
    }

    // ========================================================================
    // Detail screen
    // ========================================================================

    pub async fn scroll_detail(&self, delta: i32) {
        let mut root = self.root.lock().await;
        if let Screen::Detail { scroll, .. } = &mut root.screen {
            *scroll = (*scroll as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        }
    }

    // ========================================================================
    // UI chrome (location prompt, help)
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn is_prompt_open(&self) -> bool {
        self.ui_state.lock().await.location_prompt.is_some()
    }

    pub async fn open_location_prompt(&self) {
        let location = self.get_location().await;
        self.ui_state.lock().await.location_prompt = Some(location);
    }

    pub async fn append_to_prompt(&self, c: char) {
        if let Some(prompt) = self.ui_state.lock().await.location_prompt.as_mut() {
            prompt.push(c);
        }
    }

    pub async fn backspace_prompt(&self) {
        if let Some(prompt) = self.ui_state.lock().await.location_prompt.as_mut() {
            prompt.pop();
        }
    }

    /// Close the prompt, returning what was typed
    pub async fn take_prompt(&self) -> Option<String> {
        self.ui_state.lock().await.location_prompt.take()
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = !state.show_help_popup;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
