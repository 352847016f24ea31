//! Location routing and the show detail screen

use super::AppController;
use crate::model::{CatalogApi, DetailPhase, HOME_FRAGMENT, HomeState, Route, Screen};

impl<C: CatalogApi> AppController<C> {
    /// Resolve `fragment` and hand the display to the matching screen.
    ///
    /// Navigating to the screen already shown renders it again from scratch.
    pub async fn navigate(&self, fragment: &str) {
        let route = Route::parse(fragment);
        tracing::info!(fragment, ?route, "Navigating");

        // Held across the screen swap so no search outcome lands on the new screen
        let mut session = self.session.lock().await;
        session.teardown();

        match route {
            Route::Home => {
                self.model
                    .replace_screen(fragment, Screen::Home(HomeState::default()))
                    .await;
            }
            Route::ShowDetail(id) => {
                let generation = self
                    .model
                    .replace_screen(
                        fragment,
                        Screen::Detail {
                            id: id.clone(),
                            phase: DetailPhase::Loading,
                            scroll: 0,
                        },
                    )
                    .await;
                drop(session);

                let controller = self.clone();
                tokio::spawn(async move {
                    controller.load_show_detail(generation, &id).await;
                });
            }
            Route::NotFound => {
                self.model.replace_screen(fragment, Screen::NotFound).await;
            }
        }
    }

    pub async fn go_home(&self) {
        self.navigate(HOME_FRAGMENT).await;
    }

    pub async fn reload(&self) {
        let location = self.model.get_location().await;
        self.navigate(&location).await;
    }

    pub async fn open_selected_result(&self) {
        if let Some(id) = self.model.selected_result_id().await {
            self.navigate(&Route::show(id)).await;
        }
    }

    async fn load_show_detail(&self, generation: u64, id: &str) {
        let result = tokio::try_join!(self.catalog.get_show(id), self.catalog.get_episodes(id));

        let loaded = match result {
            Ok((show, episodes)) => {
                tracing::info!(id, episodes = episodes.len(), "Show details loaded");
                DetailPhase::Loaded { show, episodes }
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to load show details");
                DetailPhase::Failed
            }
        };

        let applied = self
            .model
            .update_screen_if_current(generation, |screen| {
                if let Screen::Detail { phase, .. } = screen {
                    *phase = loaded;
                }
            })
            .await;

        if !applied {
            tracing::debug!(id, "Discarding details for a screen no longer displayed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::controller::DEFAULT_DEBOUNCE;
    use crate::controller::test_support::{FakeCatalog, show_summary};
    use crate::model::{AppModel, SearchOutcome, SearchPhase};
    use crate::view::render_screen;

    fn controller(delay: Duration) -> (AppController<FakeCatalog>, FakeCatalog) {
        let catalog = FakeCatalog::with_delay(delay);
        let controller =
            AppController::new(Arc::new(AppModel::new()), catalog.clone(), DEFAULT_DEBOUNCE);
        (controller, catalog)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_route_loads_detail() {
        let (controller, catalog) = controller(Duration::from_millis(100));
        controller.navigate("#/show/42").await;

        let loading = controller.model.get_screen().await;
        assert!(matches!(
            loading,
            Screen::Detail { ref id, phase: DetailPhase::Loading, .. } if id == "42"
        ));
        assert!(render_screen(&loading).text_content().contains("Loading"));

        controller.wait_until_settled().await;
        let screen = controller.model.get_screen().await;
        match &screen {
            Screen::Detail {
                phase: DetailPhase::Loaded { show, episodes },
                ..
            } => {
                assert_eq!(show.id, 42);
                assert_eq!(episodes.len(), 2);
            }
            other => panic!("expected loaded detail, got {:?}", other),
        }

        let text = render_screen(&screen).text_content();
        assert!(text.contains("Show 42"));
        assert!(text.contains("Hello world"));
        assert!(text.contains("S1E?"));
        assert_eq!(controller.model.get_location().await, "#/show/42");

        let mut calls = catalog.calls();
        calls.sort();
        assert_eq!(calls, vec!["episodes:42", "show:42"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_fetches_run_concurrently() {
        let (controller, _catalog) = controller(Duration::from_millis(100));
        let started = tokio::time::Instant::now();
        controller.navigate("#/show/3").await;

        sleep_ms(90).await;
        assert!(matches!(
            controller.model.get_screen().await,
            Screen::Detail { phase: DetailPhase::Loading, .. }
        ));

        // One fetch delay, not two
        sleep_ms(30).await;
        assert!(matches!(
            controller.model.get_screen().await,
            Screen::Detail { phase: DetailPhase::Loaded { .. }, .. }
        ));
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_numeric_show_is_not_found() {
        let (controller, catalog) = controller(Duration::ZERO);
        controller.navigate("#/show/abc").await;

        assert_eq!(controller.model.get_screen().await, Screen::NotFound);
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_either_fetch_failing_fails_screen() {
        for id in ["404", "500"] {
            let (controller, _catalog) = controller(Duration::ZERO);
            controller.navigate(&format!("#/show/{}", id)).await;
            controller.wait_until_settled().await;

            let screen = controller.model.get_screen().await;
            assert!(
                matches!(screen, Screen::Detail { phase: DetailPhase::Failed, .. }),
                "show {}",
                id
            );
            assert!(render_screen(&screen).text_content().contains("Could not load"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_detail_does_not_replace_new_screen() {
        let (controller, _catalog) = controller(Duration::from_millis(1000));
        controller.navigate("#/show/7").await;
        sleep_ms(100).await;
        controller.go_home().await;
        sleep_ms(2000).await;

        assert_eq!(controller.model.get_screen().await, Screen::default());
        assert_eq!(controller.model.get_location().await, "#/");
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_route_renders_again() {
        let (controller, catalog) = controller(Duration::ZERO);
        controller.navigate("#/show/1").await;
        controller.wait_until_settled().await;
        controller.reload().await;
        controller.wait_until_settled().await;

        let shows = catalog.calls().iter().filter(|c| *c == "show:1").count();
        assert_eq!(shows, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_home_tears_down_search() {
        let (controller, _catalog) = controller(Duration::from_millis(1000));
        for c in "lost".chars() {
            let input = controller.model.append_to_search(c).await.unwrap();
            controller.on_query_changed(&input).await;
        }
        sleep_ms(400).await;
        controller.navigate("").await;
        sleep_ms(2000).await;

        match controller.model.get_screen().await {
            Screen::Home(home) => {
                assert_eq!(home.phase(), SearchPhase::Idle);
                assert!(home.input.is_empty());
            }
            other => panic!("expected home screen, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_selected_result() {
        let (controller, _catalog) = controller(Duration::ZERO);
        controller
            .model
            .update_home(|home| {
                home.outcome =
                    SearchOutcome::Results(vec![show_summary(5, "a"), show_summary(9, "b")])
            })
            .await;
        controller.model.move_result_selection(1).await;
        controller.open_selected_result().await;

        assert_eq!(controller.model.get_location().await, "#/show/9");
        controller.wait_until_settled().await;
        assert!(matches!(
            controller.model.get_screen().await,
            Screen::Detail { phase: DetailPhase::Loaded { .. }, .. }
        ));
    }
}
