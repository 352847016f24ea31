//! Typed markup tree produced by the screen renderers
//!
//! Renderers build a `Markup` value instead of drawing directly, so a screen
//! can be inspected in tests, drawn into the terminal, or serialized to HTML.
//! Every text and attribute value goes through minijinja's HTML escaper.

use std::fmt::{self, Write};

use minijinja::HtmlEscape;

/// Visual intent of a paragraph or list item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Muted,
    Loading,
    Empty,
    Error,
}

impl Tone {
    fn class(self) -> Option<&'static str> {
        match self {
            Tone::Normal => None,
            Tone::Muted => Some("muted"),
            Tone::Loading => Some("loading"),
            Tone::Empty => Some("empty"),
            Tone::Error => Some("error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Section(Vec<Node>),
    Nav(Vec<Node>),
    Heading { level: u8, text: String },
    Paragraph { tone: Tone, children: Vec<Node> },
    Text(String),
    Strong(String),
    Badge(String),
    Image { src: String, alt: String },
    Link {
        href: String,
        external: bool,
        children: Vec<Node>,
    },
    Card(Vec<Node>),
    Grid(Vec<Node>),
    List(Vec<Node>),
    Item { tone: Tone, children: Vec<Node> },
    SearchInput {
        value: String,
        placeholder: String,
        focused: bool,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn paragraph(tone: Tone, text: impl Into<String>) -> Self {
        Node::Paragraph {
            tone,
            children: vec![Node::text(text)],
        }
    }

    pub fn link(href: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Link {
            href: href.into(),
            external: false,
            children,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section(children)
            | Node::Nav(children)
            | Node::Card(children)
            | Node::Grid(children)
            | Node::List(children)
            | Node::Paragraph { children, .. }
            | Node::Link { children, .. }
            | Node::Item { children, .. } => children,
            _ => &[],
        }
    }

    fn is_block(&self) -> bool {
        !matches!(
            self,
            Node::Text(_) | Node::Strong(_) | Node::Badge(_) | Node::Link { .. }
        )
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Heading { text, .. } | Node::Text(text) | Node::Strong(text) | Node::Badge(text) => {
                out.push_str(text)
            }
            Node::SearchInput { value, .. } => out.push_str(value),
            Node::Image { .. } => {}
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
        if self.is_block() && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
    }

    fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a Node)) {
        visitor(self);
        for child in self.children() {
            child.visit(visitor);
        }
    }
}

/// Root of a rendered screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Markup(pub Vec<Node>);

impl Markup {
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// All visible text, one line per block element
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.collect_text(&mut out);
        }
        out
    }

    /// Link targets in document order
    pub fn links(&self) -> Vec<&str> {
        let mut links = Vec::new();
        self.walk(|node| {
            if let Node::Link { href, .. } = node {
                links.push(href.as_str());
            }
        });
        links
    }

    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        let mut count = 0;
        self.walk(|node| {
            if predicate(node) {
                count += 1;
            }
        });
        count
    }

    /// Depth-first, pre-order traversal
    pub fn walk<'a>(&'a self, mut visitor: impl FnMut(&'a Node)) {
        for node in &self.0 {
            node.visit(&mut visitor);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            // Writing into a String cannot fail
            let _ = write!(out, "{}", node);
        }
        out
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Node]) -> fmt::Result {
    for child in children {
        write!(f, "{}", child)?;
    }
    Ok(())
}

fn class_attr(tone: Tone) -> String {
    tone.class()
        .map(|class| format!(" class=\"{}\"", class))
        .unwrap_or_default()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Section(children) => {
                f.write_str("<section class=\"card\">")?;
                write_children(f, children)?;
                f.write_str("</section>")
            }
            Node::Nav(children) => {
                f.write_str("<nav>")?;
                write_children(f, children)?;
                f.write_str("</nav>")
            }
            Node::Heading { level, text } => {
                write!(f, "<h{level}>{}</h{level}>", HtmlEscape(text))
            }
            Node::Paragraph { tone, children } => {
                write!(f, "<p{}>", class_attr(*tone))?;
                write_children(f, children)?;
                f.write_str("</p>")
            }
            Node::Text(text) => write!(f, "{}", HtmlEscape(text)),
            Node::Strong(text) => write!(f, "<strong>{}</strong>", HtmlEscape(text)),
            Node::Badge(text) => write!(f, "<span class=\"badge\">{}</span>", HtmlEscape(text)),
            Node::Image { src, alt } => write!(
                f,
                "<img loading=\"lazy\" src=\"{}\" alt=\"{}\">",
                HtmlEscape(src),
                HtmlEscape(alt)
            ),
            Node::Link {
                href,
                external,
                children,
            } => {
                write!(f, "<a href=\"{}\"", HtmlEscape(href))?;
                if *external {
                    f.write_str(" target=\"_blank\" rel=\"noopener\"")?;
                }
                f.write_str(">")?;
                write_children(f, children)?;
                f.write_str("</a>")
            }
            Node::Card(children) => {
                f.write_str("<article class=\"card\">")?;
                write_children(f, children)?;
                f.write_str("</article>")
            }
            Node::Grid(children) => {
                f.write_str("<div class=\"grid\">")?;
                write_children(f, children)?;
                f.write_str("</div>")
            }
            Node::List(children) => {
                f.write_str("<ul>")?;
                write_children(f, children)?;
                f.write_str("</ul>")
            }
            Node::Item { tone, children } => {
                write!(f, "<li{}>", class_attr(*tone))?;
                write_children(f, children)?;
                f.write_str("</li>")
            }
            Node::SearchInput {
                value, placeholder, ..
            } => write!(
                f,
                "<form class=\"search\" autocomplete=\"off\"><input name=\"q\" value=\"{}\" placeholder=\"{}\"><button type=\"submit\">Search</button></form>",
                HtmlEscape(value),
                HtmlEscape(placeholder)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let markup = Markup(vec![Node::paragraph(Tone::Empty, "<script>&\"x\"")]);
        let html = markup.to_html();
        assert!(html.starts_with("<p class=\"empty\">&lt;script&gt;&amp;"));
        assert!(html.ends_with("</p>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("\"x\""));
    }

    #[test]
    fn test_external_link_attributes() {
        let node = Node::Link {
            href: "https://example.com/?a=1&b=2".to_string(),
            external: true,
            children: vec![Node::text("go")],
        };
        let html = node.to_string();
        assert!(html.starts_with("<a href=\""));
        assert!(html.contains("a=1&amp;b=2"));
        assert!(html.ends_with("\" target=\"_blank\" rel=\"noopener\">go</a>"));
    }

    #[test]
    fn test_text_content_separates_blocks() {
        let markup = Markup(vec![Node::Section(vec![
            Node::Heading {
                level: 2,
                text: "Title".to_string(),
            },
            Node::Paragraph {
                tone: Tone::Normal,
                children: vec![Node::text("No results for "), Node::Strong("abc".to_string())],
            },
        ])]);
        assert_eq!(markup.text_content(), "Title\nNo results for abc\n");
    }

    #[test]
    fn test_attribute_quotes_cannot_break_out() {
        let node = Node::Image {
            src: "x\" onerror=\"alert(1)".to_string(),
            alt: "it's".to_string(),
        };
        let html = node.to_string();
        assert!(!html.contains("\" onerror"));
        assert!(!html.contains("it's"));
    }

    #[test]
    fn test_links_in_document_order() {
        let markup = Markup(vec![
            Node::link("#/", vec![Node::text("back")]),
            Node::Grid(vec![
                Node::Card(vec![Node::link("#/show/1", vec![])]),
                Node::Card(vec![Node::link("#/show/2", vec![])]),
            ]),
        ]);
        assert_eq!(markup.links(), vec!["#/", "#/show/1", "#/show/2"]);
        assert_eq!(markup.count(|n| matches!(n, Node::Card(_))), 2);
    }
}
