//! # Routes
//!
//! A `Route` is the normalized form of a location token. Tokens arrive from
//! the location hash (`#/modeling/calculation-setup/`), from CLI deep links,
//! and from navigation buttons. They all collapse to the same slash-delimited
//! identifier with no leading or trailing slashes.
//!
//! ```text
//! "#/modeling/calculation-setup/"  ─┐
//! "  /modeling/calculation-setup " ─┼─►  Route("modeling/calculation-setup")
//! "modeling/calculation-setup"     ─┘
//!
//! "" | "#" | "#/" | "/"            ───►  Route("home")
//! ```

use std::fmt;

/// The reserved default route.
pub const HOME: &str = "home";

/// Normalized route identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(String);

impl Route {
    /// The `home` route.
    pub fn home() -> Self {
        Route(HOME.to_string())
    }

    pub fn is_home(&self) -> bool {
        self.0 == HOME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The location token for this route (`#` + route).
    pub fn to_token(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Route {
    fn from(raw: &str) -> Self {
        resolve(raw)
    }
}

impl From<String> for Route {
    fn from(raw: String) -> Self {
        resolve(&raw)
    }
}

/// Resolve a raw location token into a `Route`.
///
/// Total: every input, including the empty string, maps to a valid route.
/// Idempotent: `resolve(resolve(x).as_str()) == resolve(x)`.
pub fn resolve(raw: &str) -> Route {
    // Repeat until stable: "# / a / " needs a second pass once the
    // whitespace exposed by the first strip is trimmed.
    let mut path = raw;
    loop {
        let next = path
            .trim()
            .trim_start_matches(['#', '/'])
            .trim_end_matches('/');
        if next == path {
            break;
        }
        path = next;
    }

    if path.is_empty() {
        Route::home()
    } else {
        Route(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tokens_resolve_to_home() {
        for raw in ["", "#", "#/", "/", "  ", "##//", " # "] {
            assert_eq!(resolve(raw), Route::home(), "raw token {raw:?}");
        }
    }

    #[test]
    fn test_fragment_marker_and_slashes_are_stripped() {
        assert_eq!(
            resolve("#/modeling/calculation-setup/"),
            resolve("modeling/calculation-setup")
        );
        assert_eq!(
            resolve("#/modeling/calculation-setup/").as_str(),
            "modeling/calculation-setup"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(resolve("  #results/impact-overview\n"), resolve("results/impact-overview"));
        assert_eq!(resolve("# / a / ").as_str(), "a");
    }

    #[test]
    fn test_inner_slashes_are_kept() {
        assert_eq!(resolve("#a/b/c").as_str(), "a/b/c");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let samples = [
            "",
            "#",
            "#/a/b/",
            "  //x// ",
            "# / a / ",
            "home",
            "#home",
            "weird token with spaces",
            "#//#/nested",
        ];
        for raw in samples {
            let once = resolve(raw);
            let twice = resolve(once.as_str());
            assert_eq!(once, twice, "raw token {raw:?}");
        }
    }

    #[test]
    fn test_token_round_trips_through_resolve() {
        let route = resolve("results/contribution-analysis");
        assert_eq!(route.to_token(), "#results/contribution-analysis");
        assert_eq!(resolve(&route.to_token()), route);
    }

    #[test]
    fn test_is_home() {
        assert!(resolve("#/").is_home());
        assert!(!resolve("#a").is_home());
    }
}
