//! Overlay rendering (location prompt, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::UiState;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_location_prompt(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref prompt) = ui_state.location_prompt {
        let popup_area = centered(frame.area(), 60, 3);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let line = Line::from(vec![
            Span::raw(prompt.clone()),
            Span::styled("▏", Style::default().fg(Color::Green)),
        ]);

        let prompt_widget = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Go to location (Enter go, Esc cancel) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(prompt_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = vec![
        ("", "── Search ──"),
        ("Type", "Edit query (searches after a pause)"),
        ("Enter", "Search now / open selected show"),
        ("Tab / ↓", "Move to results"),
        ("↑ / ↓ / ← / →", "Select result"),
        ("Esc", "Clear query / back to input"),
        ("", ""),
        ("", "── Show details ──"),
        ("↑ / ↓", "Scroll"),
        ("Esc / Backspace / B", "Back to search"),
        ("R", "Reload"),
        ("", ""),
        ("", "── General ──"),
        (":", "Go to location (e.g. #/show/169)"),
        ("?", "Toggle this help"),
        ("Q", "Quit"),
        ("Ctrl+Q / Ctrl+C", "Quit from anywhere"),
    ];

    let popup_area = centered(frame.area(), 62, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>20}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
