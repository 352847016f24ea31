//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Catalog entities and screen state
//! - `route`: Location fragments and routing targets
//! - `tvmaze_types`: Wire format of the TVMaze API
//! - `catalog_client`: Catalog API seam and its TVMaze implementation
//! - `app_model`: Main application model with state management methods

mod types;
mod route;
mod tvmaze_types;
mod catalog_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    DetailPhase, Episode, HomeFocus, HomeState, RootView, Screen, SearchOutcome, SearchPhase,
    ShowDetail, ShowSummary, UiState,
};

pub use route::{HOME_FRAGMENT, Route};

pub use catalog_client::{CatalogApi, CatalogError, DEFAULT_API_URL, TvMazeClient};

pub use app_model::AppModel;
