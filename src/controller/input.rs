//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::AppController;
use crate::model::{CatalogApi, HomeFocus, HomeState, Screen};

const PAGE: i32 = 10;

impl<C: CatalogApi> AppController<C> {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Quit works everywhere, including text entry
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        // Location prompt captures all keys while open
        if self.model.is_prompt_open().await {
            match key.code {
                KeyCode::Char(c) => self.model.append_to_prompt(c).await,
                KeyCode::Backspace => self.model.backspace_prompt().await,
                KeyCode::Enter => {
                    if let Some(location) = self.model.take_prompt().await {
                        self.navigate(location.trim()).await;
                    }
                }
                KeyCode::Esc => {
                    self.model.take_prompt().await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Handle help popup
        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.model.hide_help_popup().await;
            }
            return Ok(());
        }

        match self.model.get_screen().await {
            Screen::Home(home) => self.handle_home_key(key, &home).await,
            Screen::Detail { .. } => self.handle_detail_key(key).await,
            Screen::NotFound => self.handle_not_found_key(key).await,
        }
        Ok(())
    }

    async fn handle_home_key(&self, key: KeyEvent, home: &HomeState) {
        if home.focus == HomeFocus::Input {
            match key.code {
                KeyCode::Char(c) => {
                    if let Some(input) = self.model.append_to_search(c).await {
                        self.on_query_changed(&input).await;
                    }
                }
                KeyCode::Backspace => {
                    if let Some(input) = self.model.backspace_search().await {
                        self.on_query_changed(&input).await;
                    }
                }
                KeyCode::Esc => {
                    if let Some(input) = self.model.clear_search().await {
                        self.on_query_changed(&input).await;
                    }
                }
                KeyCode::Enter => self.submit_search().await,
                KeyCode::Tab | KeyCode::Down => {
                    self.model.set_home_focus(HomeFocus::Results).await;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Left => self.model.move_result_selection(-1).await,
            KeyCode::Down | KeyCode::Right => self.model.move_result_selection(1).await,
            KeyCode::Enter => self.open_selected_result().await,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                self.model.set_home_focus(HomeFocus::Input).await;
            }
            _ => self.handle_global_key(key).await,
        }
    }

    async fn handle_detail_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.model.scroll_detail(-1).await,
            KeyCode::Down => self.model.scroll_detail(1).await,
            KeyCode::PageUp => self.model.scroll_detail(-PAGE).await,
            KeyCode::PageDown => self.model.scroll_detail(PAGE).await,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.go_home().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload().await,
            _ => self.handle_global_key(key).await,
        }
    }

    async fn handle_not_found_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.go_home().await;
            }
            _ => self.handle_global_key(key).await,
        }
    }

    async fn handle_global_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true).await,
            KeyCode::Char(':') => self.model.open_location_prompt().await,
            KeyCode::Char('?') => self.model.toggle_help_popup().await,
            _ => {}
        }
    }
}
