//! Location fragments and the screens they map to

use std::sync::LazyLock;

use regex::Regex;

static SHOW_ROUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#/show/(\d+)$").expect("show route pattern is valid"));

pub const HOME_FRAGMENT: &str = "#/";

/// A screen addressed by a location fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Identifier digits exactly as they appeared in the fragment
    ShowDetail(String),
    NotFound,
}

impl Route {
    /// Resolve a fragment in `location.hash` form (`""`, `"#/"`, `"#/show/42"`)
    pub fn parse(fragment: &str) -> Self {
        if fragment.is_empty() || fragment == "#" || fragment == HOME_FRAGMENT {
            return Route::Home;
        }
        match SHOW_ROUTE.captures(fragment) {
            Some(captures) => Route::ShowDetail(captures[1].to_string()),
            None => Route::NotFound,
        }
    }

    pub fn show(id: u64) -> String {
        format!("#/show/{}", id)
    }
}
