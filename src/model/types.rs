//! Core type definitions for the application

use chrono::NaiveDate;

/// A show as returned by a catalog search
#[derive(Clone, Debug, PartialEq)]
pub struct ShowSummary {
    pub id: u64,
    pub name: String,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub genres: Vec<String>,
}

/// Full show metadata for the detail screen
#[derive(Clone, Debug, PartialEq)]
pub struct ShowDetail {
    pub id: u64,
    pub name: Option<String>,
    pub image_medium: Option<String>,
    pub image_original: Option<String>,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub premiered: Option<NaiveDate>,
    /// Raw summary as delivered by the API, may contain HTML tags
    pub summary: Option<String>,
    pub url: Option<String>,
}

/// A single episode of a show
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    pub season: u32,
    /// Unknown for specials and unannounced episodes
    pub number: Option<u32>,
    pub name: String,
    pub air_date: Option<NaiveDate>,
}

/// Which part of the home screen receives key input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Input,
    Results,
}

/// What the home screen currently shows below the search input
#[derive(Clone, Debug, PartialEq, Default)]
pub enum SearchOutcome {
    #[default]
    Idle,
    Loading,
    Results(Vec<ShowSummary>),
    Empty { query: String },
    Error,
}

/// Search controller phase, derived from the home state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    Loading,
    Results,
    Empty,
    Error,
}

/// State of the home screen (search form + result grid)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeState {
    pub input: String,
    pub outcome: SearchOutcome,
    /// A debounce timer is armed
    pub pending: bool,
    pub focus: HomeFocus,
    pub selected: usize,
}

impl HomeState {
    pub fn phase(&self) -> SearchPhase {
        if self.pending {
            return SearchPhase::Debouncing;
        }
        match self.outcome {
            SearchOutcome::Idle => SearchPhase::Idle,
            SearchOutcome::Loading => SearchPhase::Loading,
            SearchOutcome::Results(_) => SearchPhase::Results,
            SearchOutcome::Empty { .. } => SearchPhase::Empty,
            SearchOutcome::Error => SearchPhase::Error,
        }
    }

    pub fn results(&self) -> &[ShowSummary] {
        match &self.outcome {
            SearchOutcome::Results(shows) => shows,
            _ => &[],
        }
    }

    pub fn selected_show(&self) -> Option<&ShowSummary> {
        self.results().get(self.selected)
    }
}

/// Loading state of the detail screen
#[derive(Clone, Debug, PartialEq)]
pub enum DetailPhase {
    Loading,
    Loaded {
        show: ShowDetail,
        episodes: Vec<Episode>,
    },
    Failed,
}

/// The screen currently owning the display
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Home(HomeState),
    Detail {
        id: String,
        phase: DetailPhase,
        scroll: u16,
    },
    NotFound,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home(HomeState::default())
    }
}

/// The displayed screen together with the navigation that produced it
#[derive(Clone, Debug, Default)]
pub struct RootView {
    pub location: String,
    /// Bumped on every navigation; async work compares it before writing
    pub generation: u64,
    pub screen: Screen,
}

/// UI chrome that lives independent of the active screen
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Go-to-location prompt contents, when open
    pub location_prompt: Option<String>,
    pub show_help_popup: bool,
}
