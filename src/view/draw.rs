//! Markup to terminal lines

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::markup::{Markup, Node, Tone};

/// Styled lines for one screen, plus where the selected card starts
pub struct DrawnMarkup {
    pub lines: Vec<Line<'static>>,
    pub selected_line: Option<usize>,
}

struct LineWriter {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    selected_card: Option<usize>,
    card_index: usize,
    selected_line: Option<usize>,
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Normal => Style::default(),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Loading => Style::default().fg(Color::Yellow),
        Tone::Empty => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        Tone::Error => Style::default().fg(Color::Red),
    }
}

impl LineWriter {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn push(&mut self, text: impl Into<String>, style: Style) {
        self.current.push(Span::styled(text.into(), style));
    }

    fn children(&mut self, children: &[Node], style: Style) {
        for child in children {
            self.node(child, style);
        }
    }

    fn node(&mut self, node: &Node, style: Style) {
        match node {
            Node::Section(children) | Node::Nav(children) => {
                self.flush();
                self.children(children, style);
                self.blank();
            }
            Node::Heading { level, text } => {
                self.flush();
                let heading = if *level <= 2 {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                self.push(text.clone(), heading.patch(style));
                self.flush();
            }
            Node::Paragraph { tone, children } | Node::Item { tone, children } => {
                self.flush();
                if matches!(node, Node::Item { .. }) {
                    self.push("• ", style);
                }
                self.children(children, tone_style(*tone).patch(style));
                self.flush();
            }
            Node::Text(text) => self.push(text.clone(), style),
            Node::Strong(text) => self.push(text.clone(), style.add_modifier(Modifier::BOLD)),
            Node::Badge(text) => {
                self.push(format!("[{}]", text), Style::default().fg(Color::Magenta).patch(style))
            }
            Node::Image { src, .. } => {
                self.flush();
                self.push(format!("▣ {}", src), Style::default().fg(Color::DarkGray).patch(style));
                self.flush();
            }
            Node::Link {
                href,
                external,
                children,
            } => {
                self.children(children, style);
                if *external {
                    self.push(format!(" ({})", href), style.fg(Color::Blue));
                }
            }
            Node::Card(children) => {
                self.flush();
                let selected = self.selected_card == Some(self.card_index);
                let card_style = if selected {
                    self.selected_line = Some(self.lines.len());
                    style.fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                self.card_index += 1;
                self.children(children, card_style);
                self.blank();
            }
            Node::Grid(children) | Node::List(children) => {
                self.flush();
                self.children(children, style);
                self.flush();
            }
            Node::SearchInput {
                value,
                placeholder,
                focused,
            } => {
                self.flush();
                let label = if *focused {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                self.push("Search › ", label);
                if value.is_empty() {
                    self.push(placeholder.clone(), Style::default().fg(Color::DarkGray));
                } else {
                    self.push(value.clone(), style);
                }
                if *focused {
                    self.push("▏", Style::default().fg(Color::Green));
                }
                self.blank();
            }
        }
    }
}

/// Lay out markup as terminal lines, highlighting the `selected_card`-th card
pub fn draw_markup(markup: &Markup, selected_card: Option<usize>) -> DrawnMarkup {
    let mut writer = LineWriter {
        lines: Vec::new(),
        current: Vec::new(),
        selected_card,
        card_index: 0,
        selected_line: None,
    };

    for node in markup.nodes() {
        writer.node(node, Style::default());
    }
    writer.flush();

    DrawnMarkup {
        lines: writer.lines,
        selected_line: writer.selected_line,
    }
}
