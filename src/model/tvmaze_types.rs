/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
use chrono::NaiveDate;
use serde::Deserialize;

use super::types::{Episode, ShowDetail, ShowSummary};

/// One hit from the `/search/shows` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchHit {
    pub show: TvMazeShow,
}

/// Image variants attached to a show.
#[derive(Debug, Default, Deserialize)]
pub(super) struct TvMazeImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct TvMazeRating {
    pub average: Option<f64>,
}

/// A show record, shared by search hits and `/shows/{id}`.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    pub name: Option<String>,
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub rating: Option<TvMazeRating>,
    /// ISO date, null for unaired shows
    pub premiered: Option<String>,
    /// Summary in HTML format (may be null)
    pub summary: Option<String>,
    pub url: Option<String>,
}

/// A single episode from `/shows/{id}/episodes`.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// Season number (0 for specials)
    pub season: u32,
    /// Episode number within the season, null for specials
    pub number: Option<u32>,
    pub name: Option<String>,
    /// ISO date, empty string when unknown
    pub airdate: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<TvMazeShow> for ShowSummary {
    fn from(show: TvMazeShow) -> Self {
        let image = show.image.unwrap_or_default();
        Self {
            id: show.id,
            name: show.name.unwrap_or_default(),
            image_medium: non_empty(image.medium),
            image_original: non_empty(image.original),
            genres: show.genres,
        }
    }
}

impl From<TvMazeShow> for ShowDetail {
    fn from(show: TvMazeShow) -> Self {
        let image = show.image.unwrap_or_default();
        Self {
            id: show.id,
            name: non_empty(show.name),
            image_medium: non_empty(image.medium),
            image_original: non_empty(image.original),
            genres: show.genres,
            rating: show.rating.and_then(|r| r.average),
            premiered: parse_date(show.premiered.as_deref()),
            summary: non_empty(show.summary),
            url: non_empty(show.url),
        }
    }
}

impl From<TvMazeEpisode> for Episode {
    fn from(episode: TvMazeEpisode) -> Self {
        Self {
            season: episode.season,
            number: episode.number,
            name: episode.name.unwrap_or_default(),
            air_date: parse_date(episode.airdate.as_deref()),
        }
    }
}
