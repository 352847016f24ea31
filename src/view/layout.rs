//! Layout rendering (top bar, status bar, main area)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use super::draw::draw_markup;
use super::render::render_screen;
use super::utils::{scroll_to_keep_visible, truncate_string, wrapped_height};
use crate::model::{HomeFocus, RootView, Screen, SearchPhase};

pub fn render_top_bar(frame: &mut Frame, area: Rect, root: &RootView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // App name
            Constraint::Min(0),     // Location
            Constraint::Length(16), // Search activity
        ])
        .split(area);

    let title = Paragraph::new("📺 TV Finder")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let location = if root.location.is_empty() { "#" } else { root.location.as_str() };
    let location = Paragraph::new(truncate_string(location, width))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Location ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(location, chunks[1]);

    let activity = match &root.screen {
        Screen::Home(home) => match home.phase() {
            SearchPhase::Debouncing => "typing…",
            SearchPhase::Loading => "searching…",
            SearchPhase::Results => "done",
            SearchPhase::Empty => "no matches",
            SearchPhase::Error => "failed",
            SearchPhase::Idle => "",
        },
        _ => "",
    };
    let activity = Paragraph::new(activity)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(activity, chunks[2]);
}

pub fn render_main_content(frame: &mut Frame, area: Rect, root: &RootView) {
    let markup = render_screen(&root.screen);

    let (selected_card, focused) = match &root.screen {
        Screen::Home(home) => {
            let focused = home.focus == HomeFocus::Results;
            (focused.then_some(home.selected), focused)
        }
        _ => (None, false),
    };

    let drawn = draw_markup(&markup, selected_card);
    let inner_height = area.height.saturating_sub(2);
    // Borders plus horizontal padding
    let inner_width = area.width.saturating_sub(4);

    let scroll = match &root.screen {
        Screen::Detail { scroll, .. } => {
            let rows = wrapped_height(&drawn.lines, inner_width);
            (*scroll).min(rows.saturating_sub(1).min(u16::MAX as usize) as u16)
        }
        _ => drawn
            .selected_line
            .map(|line| wrapped_height(&drawn.lines[..line], inner_width))
            .map(|row| scroll_to_keep_visible(row, inner_height))
            .unwrap_or(0),
    };

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let content = Paragraph::new(drawn.lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(content, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, screen: &Screen) {
    let hints = match screen {
        Screen::Home(home) if home.focus == HomeFocus::Input => {
            " Type to search • Enter search • Tab/↓ results • Esc clear • Ctrl+Q quit "
        }
        Screen::Home(_) => " ↑/↓ select • Enter open • Tab/Esc back to input • : go to • ? help • q quit ",
        Screen::Detail { .. } => " ↑/↓ scroll • Esc back • r reload • : go to • ? help • q quit ",
        Screen::NotFound => " Esc home • : go to • ? help • q quit ",
    };

    let status = Paragraph::new(Line::from(hints))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, area);
}
