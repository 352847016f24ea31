//! Screen renderers: state in, markup out
//!
//! Every function here is pure. Drawing and HTML output both start from the
//! `Markup` these return.

use std::sync::LazyLock;

use regex::Regex;

use super::markup::{Markup, Node, Tone};
use crate::model::{
    DetailPhase, Episode, HOME_FRAGMENT, HomeFocus, HomeState, Route, Screen, SearchOutcome,
    ShowDetail, ShowSummary,
};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/210x295?text=No+Image";
pub const IDLE_PROMPT: &str = "Type a title and press Enter.";
pub const LOADING: &str = "Loading…";
pub const SEARCH_ERROR: &str = "Something went wrong while searching. Please try again.";
pub const DETAIL_ERROR: &str = "Could not load the show details/episodes.";
pub const NOT_FOUND: &str = "Route not found";
pub const NO_RATING: &str = "No rating";
pub const NO_GENRE: &str = "No genre";
pub const NO_DESCRIPTION: &str = "No description.";
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_DATE: &str = "Unknown date";
pub const NO_EPISODES: &str = "No episodes available.";

const SEARCH_PLACEHOLDER: &str = "e.g. Friends, Breaking Bad…";
const BACK_LABEL: &str = "← Back";

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Remove every `<...>` tag, keeping the text between them
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

fn image_or_placeholder<'a>(preferred: Option<&'a str>, fallback: Option<&'a str>) -> &'a str {
    preferred.or(fallback).unwrap_or(PLACEHOLDER_IMAGE)
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{}/10", value),
        None => NO_RATING.to_string(),
    }
}

pub fn format_genres(genres: &[String]) -> String {
    if genres.is_empty() {
        NO_GENRE.to_string()
    } else {
        genres.join(", ")
    }
}

pub fn episode_code(episode: &Episode) -> String {
    match episode.number {
        Some(number) => format!("S{}E{}", episode.season, number),
        None => format!("S{}E?", episode.season),
    }
}

fn back_link() -> Node {
    Node::link(HOME_FRAGMENT, vec![Node::Badge(BACK_LABEL.to_string())])
}

fn result_card(show: &ShowSummary) -> Node {
    let mut badges = Vec::new();
    for (i, genre) in show.genres.iter().enumerate() {
        if i > 0 {
            badges.push(Node::text(" "));
        }
        badges.push(Node::Badge(genre.clone()));
    }

    Node::Card(vec![Node::link(
        Route::show(show.id),
        vec![
            Node::Image {
                src: image_or_placeholder(
                    show.image_medium.as_deref(),
                    show.image_original.as_deref(),
                )
                .to_string(),
                alt: show.name.clone(),
            },
            Node::Heading {
                level: 3,
                text: show.name.clone(),
            },
            Node::Paragraph {
                tone: Tone::Muted,
                children: badges,
            },
        ],
    )])
}

/// One card per show, each linking to its detail route
pub fn render_result_grid(shows: &[ShowSummary]) -> Node {
    Node::Grid(shows.iter().map(result_card).collect())
}

pub fn render_home(home: &HomeState) -> Markup {
    let status = match &home.outcome {
        SearchOutcome::Idle => Node::paragraph(Tone::Empty, IDLE_PROMPT),
        SearchOutcome::Loading => Node::paragraph(Tone::Loading, LOADING),
        SearchOutcome::Results(shows) => render_result_grid(shows),
        SearchOutcome::Empty { query } => Node::Paragraph {
            tone: Tone::Empty,
            children: vec![
                Node::text("No results for "),
                Node::Strong(query.clone()),
                Node::text("."),
            ],
        },
        SearchOutcome::Error => Node::paragraph(Tone::Error, SEARCH_ERROR),
    };

    Markup(vec![Node::Section(vec![
        Node::Heading {
            level: 2,
            text: "TV show search".to_string(),
        },
        Node::SearchInput {
            value: home.input.clone(),
            placeholder: SEARCH_PLACEHOLDER.to_string(),
            focused: home.focus == HomeFocus::Input,
        },
        status,
    ])])
}

fn episode_item(episode: &Episode) -> Node {
    let air_date = episode
        .air_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    Node::Item {
        tone: Tone::Normal,
        children: vec![
            Node::Badge(episode_code(episode)),
            Node::text(" "),
            Node::Strong(episode.name.clone()),
            Node::text(" · "),
            Node::text(air_date),
        ],
    }
}

pub fn render_show_detail(show: &ShowDetail, episodes: &[Episode]) -> Markup {
    let cover = image_or_placeholder(show.image_original.as_deref(), show.image_medium.as_deref());

    let mut meta = format!("{} • {}", format_genres(&show.genres), format_rating(show.rating));
    if let Some(premiered) = show.premiered {
        meta.push_str(&format!(" • {}", premiered.format("%Y-%m-%d")));
    }

    let summary = show
        .summary
        .as_deref()
        .map(strip_tags)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let items = if episodes.is_empty() {
        vec![Node::Item {
            tone: Tone::Muted,
            children: vec![Node::text(NO_EPISODES)],
        }]
    } else {
        episodes.iter().map(episode_item).collect()
    };

    Markup(vec![
        Node::Nav(vec![back_link()]),
        Node::Section(vec![
            Node::Image {
                src: cover.to_string(),
                alt: show.name.clone().unwrap_or_else(|| "Poster".to_string()),
            },
            Node::Heading {
                level: 2,
                text: show.name.clone().unwrap_or_else(|| UNTITLED.to_string()),
            },
            Node::paragraph(Tone::Muted, meta),
            Node::paragraph(Tone::Normal, summary),
            Node::Paragraph {
                tone: Tone::Normal,
                children: vec![Node::Link {
                    href: show.url.clone().unwrap_or_else(|| "#".to_string()),
                    external: true,
                    children: vec![Node::text("View on TVMaze ↗")],
                }],
            },
        ]),
        Node::Section(vec![
            Node::Heading {
                level: 3,
                text: "Episodes".to_string(),
            },
            Node::List(items),
        ]),
    ])
}

pub fn render_detail_loading() -> Markup {
    Markup(vec![Node::Section(vec![
        Node::Heading {
            level: 2,
            text: "Show details".to_string(),
        },
        Node::paragraph(Tone::Loading, LOADING),
    ])])
}

pub fn render_detail_error() -> Markup {
    Markup(vec![Node::Section(vec![
        Node::Heading {
            level: 2,
            text: "Show details".to_string(),
        },
        Node::paragraph(Tone::Error, DETAIL_ERROR),
        Node::Paragraph {
            tone: Tone::Normal,
            children: vec![back_link()],
        },
    ])])
}

pub fn render_not_found() -> Markup {
    Markup(vec![Node::Section(vec![
        Node::Heading {
            level: 2,
            text: "404".to_string(),
        },
        Node::paragraph(Tone::Empty, NOT_FOUND),
    ])])
}

pub fn render_screen(screen: &Screen) -> Markup {
    match screen {
        Screen::Home(home) => render_home(home),
        Screen::Detail { phase, .. } => match phase {
            DetailPhase::Loading => render_detail_loading(),
            DetailPhase::Loaded { show, episodes } => render_show_detail(show, episodes),
            DetailPhase::Failed => render_detail_error(),
        },
        Screen::NotFound => render_not_found(),
    }
}
