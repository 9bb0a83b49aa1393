//! Route guards: what a navigation attempt does for a given session.
//!
//! A guard is a pure function of the destination, the redirect policy and a
//! [`SessionState`] snapshot, so every guard mounted at the same time agrees.
//!
//! | session                  | decision                          |
//! |--------------------------|-----------------------------------|
//! | not resolved             | `Loading`                         |
//! | resolved, user present   | `Render(destination)`             |
//! | resolved, user absent    | `Redirect { policy target, Replace }` |
//!
//! Public destinations always render.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use hirelens_core::{Capability, ClientError, HistoryMode, RouteKey};

use crate::session::SessionState;

/// Where a denied guard sends the user.
///
/// `Home` keeps the long-standing behaviour; `Login` sends users straight to
/// the sign-in page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectPolicy {
    #[default]
    Home,
    Login,
}

impl RedirectPolicy {
    pub fn target(&self) -> RouteKey {
        match self {
            RedirectPolicy::Home => RouteKey::Home,
            RedirectPolicy::Login => RouteKey::Login,
        }
    }
}

impl FromStr for RedirectPolicy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "/" => Ok(RedirectPolicy::Home),
            "login" | "/login" => Ok(RedirectPolicy::Login),
            other => Err(ClientError::validation(format!(
                "redirect policy must be 'home' or 'login', got '{other}'"
            ))),
        }
    }
}

/// Where a guarded navigation attempt stands.
///
/// `Pending → Admitted | Denied` happens once, on the first resolved
/// notification; afterwards the state follows sign-in/sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Pending,
    Admitted,
    Denied,
}

impl GuardState {
    pub fn from_session(session: &SessionState) -> Self {
        if !session.is_resolved() {
            GuardState::Pending
        } else if session.user().is_some() {
            GuardState::Admitted
        } else {
            GuardState::Denied
        }
    }
}

/// What the view layer should do for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral loading indicator in place of the guarded region.
    Loading,
    /// Render the destination.
    Render(RouteKey),
    /// Navigate away. Not an error.
    Redirect { to: RouteKey, history: HistoryMode },
}

/// Gate for a single destination.
///
/// - No IO
/// - No panics
/// - Pure function of `(destination, policy, session)`, so guards mounted side
///   by side always agree on the same snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    destination: RouteKey,
    policy: RedirectPolicy,
}

impl RouteGuard {
    pub fn new(destination: RouteKey, policy: RedirectPolicy) -> Self {
        Self {
            destination,
            policy,
        }
    }

    pub fn destination(&self) -> RouteKey {
        self.destination
    }

    pub fn required_capability(&self) -> Capability {
        self.destination.required_capability()
    }

    pub fn fallback(&self) -> RouteKey {
        self.policy.target()
    }

    pub fn evaluate(&self, session: &SessionState) -> GuardDecision {
        if self.required_capability() == Capability::Public {
            return GuardDecision::Render(self.destination);
        }

        match GuardState::from_session(session) {
            GuardState::Pending => GuardDecision::Loading,
            GuardState::Admitted => GuardDecision::Render(self.destination),
            GuardState::Denied => {
                tracing::debug!(
                    from = %self.destination,
                    to = %self.fallback(),
                    "guarded route requested without a session; redirecting"
                );
                GuardDecision::Redirect {
                    to: self.fallback(),
                    history: HistoryMode::Replace,
                }
            }
        }
    }
}
