//! TVMaze catalog client and the seam the controller talks to

use std::future::Future;

use anyhow::Result;
use futures::future::{AbortRegistration, Abortable, Aborted};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchHit, TvMazeShow};
use super::types::{Episode, ShowDetail, ShowSummary};
use crate::{log_api_request, log_api_result};

pub const DEFAULT_API_URL: &str = "https://api.tvmaze.com";

const USER_AGENT: &str = concat!("tvfinder/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request was superseded before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Transport failure, non-success status or undecodable body
    #[error("Request failed: {0}")]
    Network(String),
}

/// Read-only operations against a remote show catalog.
///
/// Implementations never cache: repeated calls always hit the backend.
pub trait CatalogApi: Clone + Send + Sync + 'static {
    fn search_shows(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ShowSummary>, CatalogError>> + Send;

    fn get_show(&self, id: &str) -> impl Future<Output = Result<ShowDetail, CatalogError>> + Send;

    fn get_episodes(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Vec<Episode>, CatalogError>> + Send;

    /// Cancellable search.
    ///
    /// Aborting the handle paired with `cancel` resolves the search with
    /// [`CatalogError::Cancelled`]. The transfer itself may keep running, its
    /// result is dropped.
    fn search(
        &self,
        query: &str,
        cancel: AbortRegistration,
    ) -> impl Future<Output = Result<Vec<ShowSummary>, CatalogError>> + Send {
        let request = self.search_shows(query);
        async move {
            match Abortable::new(request, cancel).await {
                Ok(result) => result,
                Err(Aborted) => Err(CatalogError::Cancelled),
            }
        }
    }
}

/// Catalog client for the TVMaze API.
#[derive(Clone)]
pub struct TvMazeClient {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Network(format!("Failed to parse API response: {}", e)))
    }
}

impl CatalogApi for TvMazeClient {
    async fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
        log_api_request!("search", query);
        let result = self
            .get_json::<Vec<TvMazeSearchHit>>("/search/shows", &[("q", query)])
            .await
            .map(|hits| hits.into_iter().map(|hit| hit.show.into()).collect::<Vec<_>>());
        log_api_result!("search", result);
        result
    }

    async fn get_show(&self, id: &str) -> Result<ShowDetail, CatalogError> {
        log_api_request!("show", id);
        let result = self
            .get_json::<TvMazeShow>(&format!("/shows/{}", id), &[])
            .await
            .map(ShowDetail::from);
        log_api_result!("show", result);
        result
    }

    async fn get_episodes(&self, id: &str) -> Result<Vec<Episode>, CatalogError> {
        log_api_request!("episodes", id);
        let result = self
            .get_json::<Vec<TvMazeEpisode>>(&format!("/shows/{}/episodes", id), &[])
            .await
            .map(|episodes| episodes.into_iter().map(Episode::from).collect::<Vec<_>>());
        log_api_result!("episodes", result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::AbortHandle;
    use std::time::Duration;

    #[derive(Clone)]
    struct SlowCatalog;

    impl CatalogApi for SlowCatalog {
        async fn search_shows(&self, _query: &str) -> Result<Vec<ShowSummary>, CatalogError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn get_show(&self, _id: &str) -> Result<ShowDetail, CatalogError> {
            Err(CatalogError::Network("unused".to_string()))
        }

        async fn get_episodes(&self, _id: &str) -> Result<Vec<Episode>, CatalogError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_search_is_cancelled() {
        let (handle, registration) = AbortHandle::new_pair();
        let catalog = SlowCatalog;
        let search = tokio::spawn(async move { catalog.search("friends", registration).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.abort();

        let result = search.await.unwrap();
        assert!(matches!(result, Err(CatalogError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unaborted_search_completes() {
        let (_handle, registration) = AbortHandle::new_pair();
        let result = SlowCatalog.search("friends", registration).await;
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TvMazeClient::new("https://api.tvmaze.com/").unwrap();
        assert_eq!(client.base_url, "https://api.tvmaze.com");
    }
}
