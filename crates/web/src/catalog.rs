//! Static table of the platform's features.
//!
//! The catalog is pure data: which destination each card leads to and
//! whether it needs a session. Gating is a function of the session snapshot
//! and lives on [`Feature`]; navigation lives in [`crate::navigation`].

use serde::Serialize;

use hirelens_auth::SessionState;
use hirelens_core::RouteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub destination: RouteKey,
    pub requires_auth: bool,
}

/// What a feature card's button offers for a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    /// Session not resolved yet.
    Loading,
    LoginRequired,
    GetStarted,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Loading => "Loading...",
            CardAction::LoginRequired => "Login Required",
            CardAction::GetStarted => "Get Started",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CardAction::GetStarted)
    }
}

impl Feature {
    /// `!requires_auth || (resolved && user present)`
    pub fn is_enabled(&self, session: &SessionState) -> bool {
        !self.requires_auth || session.is_authenticated()
    }

    pub fn action(&self, session: &SessionState) -> CardAction {
        if self.is_enabled(session) {
            CardAction::GetStarted
        } else if session.is_resolved() {
            CardAction::LoginRequired
        } else {
            CardAction::Loading
        }
    }
}

const STANDARD_FEATURES: [Feature; 5] = [
    Feature {
        title: "Resume Analysis",
        description: "Upload a resume and get AI-powered insights and analysis.",
        destination: RouteKey::UploadResume,
        requires_auth: true,
    },
    Feature {
        title: "Job Description Analysis",
        description: "Upload job descriptions and extract key requirements.",
        destination: RouteKey::UploadJob,
        requires_auth: true,
    },
    Feature {
        title: "Match Resumes to Jobs",
        description: "Find the best candidates for specific job roles.",
        destination: RouteKey::MatchResults,
        requires_auth: true,
    },
    Feature {
        title: "Previous Matches",
        description: "View history of past resume and job matches.",
        destination: RouteKey::History,
        requires_auth: true,
    },
    Feature {
        title: "Insights & Analytics",
        description: "Visual analytics on match percentages and skill gaps.",
        destination: RouteKey::Insights,
        requires_auth: true,
    },
];

/// Immutable list of features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCatalog {
    features: &'static [Feature],
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FeatureCatalog {
    pub const fn new(features: &'static [Feature]) -> Self {
        Self { features }
    }

    /// The platform's feature set.
    pub const fn standard() -> Self {
        Self::new(&STANDARD_FEATURES)
    }

    pub fn features(&self) -> &'static [Feature] {
        self.features
    }

    pub fn iter(&self) -> core::slice::Iter<'static, Feature> {
        self.features.iter()
    }

    pub fn get(&self, destination: RouteKey) -> Option<&'static Feature> {
        self.features.iter().find(|f| f.destination == destination)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirelens_auth::UserIdentity;
    use hirelens_core::UserId;

    fn signed_in() -> SessionState {
        SessionState::resolved(Some(UserIdentity::new(UserId::parse("u1").unwrap())))
    }

    #[test]
    fn standard_catalog_covers_every_guarded_route_once() {
        let catalog = FeatureCatalog::standard();
        let mut destinations: Vec<_> = catalog.iter().map(|f| f.destination).collect();
        destinations.sort();
        destinations.dedup();

        let guarded: Vec<_> = RouteKey::ALL.into_iter().filter(RouteKey::is_guarded).collect();
        assert_eq!(destinations, guarded);
        assert_eq!(catalog.len(), guarded.len());
        assert!(catalog.iter().all(|f| f.requires_auth));
    }

    #[test]
    fn unauthenticated_disables_guarded_features() {
        let catalog = FeatureCatalog::standard();
        for session in [SessionState::pending(), SessionState::resolved(None)] {
            assert!(catalog.iter().all(|f| !f.is_enabled(&session)));
        }
    }

    #[test]
    fn authenticated_enables_everything() {
        let catalog = FeatureCatalog::standard();
        assert!(catalog.iter().all(|f| f.is_enabled(&signed_in())));
    }

    #[test]
    fn card_action_reflects_resolution() {
        let feature = FeatureCatalog::standard().get(RouteKey::History).unwrap();

        assert_eq!(feature.action(&SessionState::pending()), CardAction::Loading);
        assert_eq!(feature.action(&SessionState::resolved(None)), CardAction::LoginRequired);
        assert_eq!(feature.action(&signed_in()), CardAction::GetStarted);
        assert_eq!(CardAction::LoginRequired.label(), "Login Required");
        assert_eq!(CardAction::GetStarted.label(), "Get Started");
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(64))]

        #[test]
        fn gating_follows_authentication_only(resolved: bool, uid in proptest::option::of("[a-z0-9]{1,12}")) {
            let session = match (resolved, uid) {
                (false, _) => SessionState::pending(),
                (true, uid) => SessionState::resolved(
                    uid.map(|uid| UserIdentity::new(UserId::parse(&uid).unwrap())),
                ),
            };

            for feature in FeatureCatalog::standard().iter() {
                proptest::prop_assert_eq!(feature.is_enabled(&session), session.is_authenticated());
                proptest::prop_assert_eq!(feature.action(&session).is_enabled(), session.is_authenticated());
            }
        }
    }

    #[test]
    fn public_feature_is_always_enabled() {
        static PUBLIC: [Feature; 1] = [Feature {
            title: "Home",
            description: "Landing page.",
            destination: RouteKey::Home,
            requires_auth: false,
        }];
        let catalog = FeatureCatalog::new(&PUBLIC);
        let feature = catalog.get(RouteKey::Home).unwrap();

        assert_eq!(feature.action(&SessionState::pending()), CardAction::GetStarted);
        assert!(catalog.get(RouteKey::Insights).is_none());
    }
}
