//! Utility functions for rendering UI components

use ratatui::{
    text::Line,
    widgets::{Paragraph, Wrap},
};

/// Lines of context kept below the selected item
const SCROLL_MARGIN: u16 = 6;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Scroll offset that keeps `line` plus a margin inside a viewport of `height` lines
pub fn scroll_to_keep_visible(line: usize, height: u16) -> u16 {
    let line = line.min(u16::MAX as usize) as u16;
    let bottom = line.saturating_add(SCROLL_MARGIN);
    bottom.saturating_sub(height)
}

/// Screen rows taken by `lines` once wrapped to `width` columns
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width)
}
