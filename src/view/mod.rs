//! View module - UI rendering
//!
//! Screens are first rendered into a typed markup tree by pure functions, then
//! drawn into the terminal frame using ratatui.
//!
//! - `markup`: Markup tree and its HTML serialization
//! - `render`: Screen renderers (home, result grid, show detail, not found)
//! - `draw`: Markup to styled terminal lines
//! - `utils`: Shared utility functions (truncation, scrolling)
//! - `layout`: Main layout structure (top bar, content, status bar)
//! - `overlays`: Modal overlays (location prompt, help)

mod markup;
mod render;
mod draw;
mod utils;
mod layout;
mod overlays;

pub use markup::{Markup, Node, Tone};
pub use render::render_screen;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{RootView, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, root: &RootView, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + location
                Constraint::Min(0),    // Active screen
                Constraint::Length(2), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], root);
        layout::render_main_content(frame, chunks[1], root);
        layout::render_status_bar(frame, chunks[2], &root.screen);

        if ui_state.location_prompt.is_some() {
            overlays::render_location_prompt(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
