//! Logical routes of the client.
//!
//! Every navigable view is named by a [`RouteKey`]. Paths are resolved
//! leniently: anything that does not match a known destination resolves to
//! [`RouteKey::Home`], mirroring the router's catch-all.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Capability a destination requires before it may be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Reachable by anyone.
    Public,
    /// Reachable only with a resolved, present session.
    Authenticated,
}

/// How a navigation is recorded in the browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Append a new entry (back-navigation returns to the current view).
    #[default]
    Push,
    /// Overwrite the current entry (back-navigation skips it).
    Replace,
}

/// A navigable destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKey {
    Home,
    Login,
    UploadResume,
    UploadJob,
    MatchResults,
    History,
    Insights,
}

impl RouteKey {
    pub const ALL: [RouteKey; 7] = [
        RouteKey::Home,
        RouteKey::Login,
        RouteKey::UploadResume,
        RouteKey::UploadJob,
        RouteKey::MatchResults,
        RouteKey::History,
        RouteKey::Insights,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            RouteKey::Home => "/",
            RouteKey::Login => "/login",
            RouteKey::UploadResume => "/upload-resume",
            RouteKey::UploadJob => "/upload-job",
            RouteKey::MatchResults => "/match-results",
            RouteKey::History => "/history",
            RouteKey::Insights => "/insights",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKey::Home => "home",
            RouteKey::Login => "login",
            RouteKey::UploadResume => "upload_resume",
            RouteKey::UploadJob => "upload_job",
            RouteKey::MatchResults => "match_results",
            RouteKey::History => "history",
            RouteKey::Insights => "insights",
        }
    }

    pub fn required_capability(&self) -> Capability {
        match self {
            RouteKey::Home | RouteKey::Login => Capability::Public,
            _ => Capability::Authenticated,
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.required_capability() == Capability::Authenticated
    }

    /// Map a browser path onto a destination.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Unmatched
    /// paths resolve to `Home`.
    pub fn resolve(path: &str) -> RouteKey {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(RouteKey::Home)
    }
}

impl core::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for RouteKey {
    type Err = ClientError;

    /// Strict lookup by name (`"upload_resume"`), unlike [`RouteKey::resolve`].
    fn from_str(s: &str) -> ClientResult<Self> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| ClientError::unknown_route(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        for route in RouteKey::ALL {
            assert_eq!(RouteKey::resolve(route.path()), route);
        }
    }

    #[test]
    fn unmatched_paths_resolve_home() {
        assert_eq!(RouteKey::resolve("/register"), RouteKey::Home);
        assert_eq!(RouteKey::resolve("/nope/deeper"), RouteKey::Home);
        assert_eq!(RouteKey::resolve(""), RouteKey::Home);
    }

    #[test]
    fn ignores_query_fragment_and_trailing_slash() {
        assert_eq!(RouteKey::resolve("/history/"), RouteKey::History);
        assert_eq!(RouteKey::resolve("/insights?range=30d"), RouteKey::Insights);
        assert_eq!(RouteKey::resolve("/login#form"), RouteKey::Login);
    }

    #[test]
    fn only_home_and_login_are_public() {
        let public: Vec<_> = RouteKey::ALL.into_iter().filter(|r| !r.is_guarded()).collect();
        assert_eq!(public, vec![RouteKey::Home, RouteKey::Login]);
    }

    #[test]
    fn from_str_is_strict() {
        assert_eq!("match_results".parse::<RouteKey>().unwrap(), RouteKey::MatchResults);
        assert_eq!(
            "/match-results".parse::<RouteKey>(),
            Err(ClientError::UnknownRoute("/match-results".to_string()))
        );
    }
}
