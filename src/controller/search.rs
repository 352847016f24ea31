//! Debounced, cancellable search for the home screen

use std::time::Duration;

use futures::future::{AbortHandle, AbortRegistration};
use tokio::task::JoinHandle;

use super::AppController;
use crate::model::{CatalogApi, CatalogError, HomeFocus, SearchOutcome, ShowSummary};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(350);

/// Queries shorter than this (after trimming) never reach the catalog on their own
pub const MIN_QUERY_LEN: usize = 2;

/// Debounce timer and in-flight request of the home screen.
///
/// At most one request is outstanding: starting one cancels the previous, and
/// only the outcome carrying the current sequence number may be applied.
#[derive(Default)]
pub(crate) struct SearchSession {
    debounce: Option<JoinHandle<()>>,
    debounce_ticket: u64,
    in_flight: Option<AbortHandle>,
    request_seq: u64,
}

impl SearchSession {
    fn arm_debounce(&mut self, timer: JoinHandle<()>) {
        self.cancel_debounce();
        self.debounce = Some(timer);
    }

    fn next_debounce_ticket(&mut self) -> u64 {
        self.debounce_ticket += 1;
        self.debounce_ticket
    }

    fn cancel_debounce(&mut self) {
        if let Some(timer) = self.debounce.take() {
            timer.abort();
        }
    }

    /// Called from the timer task itself, which must not abort its own handle
    fn take_expired_debounce(&mut self, ticket: u64) -> bool {
        if ticket != self.debounce_ticket || self.debounce.is_none() {
            return false;
        }
        self.debounce = None;
        true
    }

    fn begin_request(&mut self) -> (u64, AbortRegistration) {
        self.cancel_request();
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);
        (self.request_seq, registration)
    }

    fn cancel_request(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.request_seq += 1;
    }

    fn is_current(&self, seq: u64) -> bool {
        self.in_flight.is_some() && self.request_seq == seq
    }

    fn finish_request(&mut self, seq: u64) {
        if self.request_seq == seq {
            self.in_flight = None;
        }
    }

    pub(crate) fn teardown(&mut self) {
        self.cancel_debounce();
        self.cancel_request();
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<C: CatalogApi> AppController<C> {
    /// React to an edit of the search input
    pub async fn on_query_changed(&self, input: &str) {
        let mut session = self.session.lock().await;

        if input.trim().chars().count() >= MIN_QUERY_LEN {
            let ticket = session.next_debounce_ticket();
            let controller = self.clone();
            let delay = self.debounce;
            let timer = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                controller.debounce_elapsed(ticket).await;
            });
            session.arm_debounce(timer);
            self.model.update_home(|home| home.pending = true).await;
            return;
        }

        session.cancel_debounce();
        session.cancel_request();
        self.model
            .update_home(|home| {
                home.pending = false;
                home.outcome = SearchOutcome::Idle;
                home.focus = HomeFocus::Input;
                home.selected = 0;
            })
            .await;
    }

    async fn debounce_elapsed(&self, ticket: u64) {
        let mut session = self.session.lock().await;
        if !session.take_expired_debounce(ticket) {
            return;
        }
        self.submit_locked(&mut session).await;
    }

    /// Explicit submit; a blank query is ignored
    pub async fn submit_search(&self) {
        let mut session = self.session.lock().await;
        session.cancel_debounce();
        self.submit_locked(&mut session).await;
    }

    async fn submit_locked(&self, session: &mut SearchSession) {
        let query = self
            .model
            .update_home(|home| {
                home.pending = false;
                home.input.trim().to_string()
            })
            .await;

        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return;
        };

        let (seq, registration) = session.begin_request();
        self.model
            .update_home(|home| {
                home.outcome = SearchOutcome::Loading;
                home.focus = HomeFocus::Input;
                home.selected = 0;
            })
            .await;

        tracing::debug!(query, seq, "Submitting search");

        let controller = self.clone();
        tokio::spawn(async move {
            let result = controller.catalog.search(&query, registration).await;
            controller.apply_search_result(seq, &query, result).await;
        });
    }

    async fn apply_search_result(
        &self,
        seq: u64,
        query: &str,
        result: Result<Vec<ShowSummary>, CatalogError>,
    ) {
        if matches!(result, Err(CatalogError::Cancelled)) {
            tracing::debug!(query, seq, "Search cancelled");
            return;
        }

        let mut session = self.session.lock().await;
        if !session.is_current(seq) {
            tracing::debug!(query, seq, "Discarding superseded search result");
            return;
        }
        session.finish_request(seq);

        let outcome = match result {
            Ok(shows) if shows.is_empty() => SearchOutcome::Empty {
                query: query.to_string(),
            },
            Ok(shows) => {
                tracing::info!(query, results = shows.len(), "Search completed successfully");
                SearchOutcome::Results(shows)
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Search failed");
                SearchOutcome::Error
            }
        };

        self.model.update_home(|home| home.outcome = outcome).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::controller::test_support::FakeCatalog;
    use crate::model::{AppModel, HomeState, Screen, SearchPhase};
    use crate::view::{Node, render_screen};

    fn controller(delay: Duration) -> (AppController<FakeCatalog>, FakeCatalog) {
        let catalog = FakeCatalog::with_delay(delay);
        let controller =
            AppController::new(Arc::new(AppModel::new()), catalog.clone(), DEFAULT_DEBOUNCE);
        (controller, catalog)
    }

    async fn type_text(controller: &AppController<FakeCatalog>, text: &str) {
        for c in text.chars() {
            let input = controller.model.append_to_search(c).await.unwrap();
            controller.on_query_changed(&input).await;
        }
    }

    async fn home(controller: &AppController<FakeCatalog>) -> HomeState {
        match controller.model.get_screen().await {
            Screen::Home(home) => home,
            other => panic!("expected home screen, got {:?}", other),
        }
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_issues_no_request() {
        let (controller, catalog) = controller(Duration::ZERO);
        type_text(&controller, " a ").await;
        sleep_ms(1000).await;

        assert!(catalog.calls().is_empty());
        let home = home(&controller).await;
        assert_eq!(home.phase(), SearchPhase::Idle);
        assert!(render_screen(&Screen::Home(home)).text_content().contains("Type a title"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_are_debounced() {
        let (controller, catalog) = controller(Duration::ZERO);
        for c in "fri".chars() {
            type_text(&controller, &c.to_string()).await;
            sleep_ms(100).await;
        }
        assert_eq!(home(&controller).await.phase(), SearchPhase::Debouncing);

        sleep_ms(200).await;
        assert!(catalog.calls().is_empty());

        sleep_ms(100).await;
        assert_eq!(catalog.calls(), vec!["search:fri"]);
        let home = home(&controller).await;
        assert_eq!(home.phase(), SearchPhase::Results);
        assert_eq!(home.results()[0].name, "fri one");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_request_never_renders() {
        let (controller, catalog) = controller(Duration::from_millis(1000));

        type_text(&controller, "ab").await;
        sleep_ms(400).await;
        assert_eq!(home(&controller).await.phase(), SearchPhase::Loading);

        type_text(&controller, "c").await;
        sleep_ms(400).await;
        assert_eq!(catalog.calls(), vec!["search:ab", "search:abc"]);

        // "ab" would have answered by now
        sleep_ms(700).await;
        assert_eq!(home(&controller).await.phase(), SearchPhase::Loading);

        sleep_ms(500).await;
        let home = home(&controller).await;
        assert_eq!(home.phase(), SearchPhase::Results);
        assert!(home.results().iter().all(|show| show.name.starts_with("abc ")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_query_cancels_request() {
        let (controller, _catalog) = controller(Duration::from_millis(1000));

        type_text(&controller, "ab").await;
        sleep_ms(400).await;
        let input = controller.model.backspace_search().await.unwrap();
        controller.on_query_changed(&input).await;
        assert_eq!(home(&controller).await.phase(), SearchPhase::Idle);

        sleep_ms(2000).await;
        let home = home(&controller).await;
        assert_eq!(home.phase(), SearchPhase::Idle);
        assert!(home.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_query_disarms_timer() {
        let (controller, catalog) = controller(Duration::ZERO);

        type_text(&controller, "ab").await;
        sleep_ms(100).await;
        let input = controller.model.backspace_search().await.unwrap();
        controller.on_query_changed(&input).await;
        sleep_ms(1000).await;

        assert!(catalog.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_response_mentions_query() {
        let (controller, _catalog) = controller(Duration::ZERO);
        type_text(&controller, "nonesuch").await;
        sleep_ms(500).await;

        let home = home(&controller).await;
        assert_eq!(home.phase(), SearchPhase::Empty);
        let markup = render_screen(&Screen::Home(home));
        assert!(markup.text_content().contains("No results for nonesuch."));
        assert_eq!(markup.count(|n| matches!(n, Node::Card(_))), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_error() {
        let (controller, _catalog) = controller(Duration::ZERO);
        type_text(&controller, "failure").await;
        sleep_ms(500).await;

        assert_eq!(home(&controller).await.phase(), SearchPhase::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_render_linked_cards() {
        let (controller, _catalog) = controller(Duration::ZERO);
        type_text(&controller, "lost").await;
        sleep_ms(500).await;

        let markup = render_screen(&Screen::Home(home(&controller).await));
        assert_eq!(markup.count(|n| matches!(n, Node::Card(_))), 2);
        assert_eq!(markup.links(), vec!["#/show/1", "#/show/2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_is_noop() {
        let (controller, catalog) = controller(Duration::ZERO);
        controller
            .model
            .update_home(|home| {
                home.input = "   ".to_string();
                home.outcome = SearchOutcome::Error;
            })
            .await;

        controller.submit_search().await;
        sleep_ms(500).await;

        assert!(catalog.calls().is_empty());
        assert_eq!(home(&controller).await.outcome, SearchOutcome::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_submit_skips_debounce() {
        let (controller, catalog) = controller(Duration::ZERO);
        type_text(&controller, "x").await;
        controller.submit_search().await;
        sleep_ms(10).await;

        assert_eq!(catalog.calls(), vec!["search:x"]);
        assert_eq!(home(&controller).await.phase(), SearchPhase::Results);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_cancels_pending_timer() {
        let (controller, catalog) = controller(Duration::ZERO);
        type_text(&controller, "lost").await;
        controller.submit_search().await;
        sleep_ms(1000).await;

        assert_eq!(catalog.calls(), vec!["search:lost"]);
    }

    #[test]
    fn test_only_latest_request_is_current() {
        let mut session = SearchSession::default();
        let (first, _) = session.begin_request();
        let (second, _) = session.begin_request();

        assert!(!session.is_current(first));
        assert!(session.is_current(second));

        session.finish_request(second);
        assert!(!session.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_request() {
        let mut session = SearchSession::default();
        let (seq, _) = session.begin_request();
        session.cancel_request();
        assert!(!session.is_current(seq));
    }
}
