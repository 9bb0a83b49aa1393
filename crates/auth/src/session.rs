use serde::{Deserialize, Serialize};
use thiserror::Error;

use hirelens_core::UserId;

/// Identity of a signed-in user as reported by the identity provider.
///
/// Only presence/absence drives gating; the e-mail is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(id: UserId) -> Self {
        Self { id, email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityStreamError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("identity provider rejected the session: {0}")]
    Rejected(String),
}

/// A single delivery from the identity provider: the current user (or none),
/// or a failure to determine it.
pub type IdentityNotification = Result<Option<UserIdentity>, IdentityStreamError>;

/// Client-side view of the authenticated session.
///
/// # Invariants
/// - `resolved` is monotonic: once a notification has been applied it never
///   reverts to `false`.
/// - A pending state never carries a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    user: Option<UserIdentity>,
    resolved: bool,
}

impl SessionState {
    /// State before the provider has said anything.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn resolved(user: Option<UserIdentity>) -> Self {
        Self {
            user,
            resolved: true,
        }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Resolved with a user present.
    pub fn is_authenticated(&self) -> bool {
        self.resolved && self.user.is_some()
    }

    /// Fold a provider notification into the state.
    ///
    /// A provider failure resolves the session as signed-out so that guarded
    /// views redirect instead of waiting forever.
    pub fn apply(&mut self, notification: IdentityNotification) {
        match notification {
            Ok(user) => {
                tracing::debug!(
                    authenticated = user.is_some(),
                    first = !self.resolved,
                    "identity notification applied"
                );
                self.user = user;
            }
            Err(err) => {
                tracing::warn!(error = %err, "identity stream failed; treating session as signed out");
                self.user = None;
            }
        }
        self.resolved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity::new(UserId::parse("alice-uid").unwrap()).with_email("alice@example.com")
    }

    #[test]
    fn pending_is_not_authenticated() {
        let state = SessionState::pending();
        assert!(!state.is_resolved());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn resolved_stays_resolved_across_sign_out() {
        let mut state = SessionState::pending();
        state.apply(Ok(Some(alice())));
        assert!(state.is_authenticated());

        state.apply(Ok(None));
        assert!(state.is_resolved());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn provider_failure_resolves_as_signed_out() {
        let mut state = SessionState::resolved(Some(alice()));
        state.apply(Err(IdentityStreamError::Unavailable("offline".into())));
        assert!(state.is_resolved());
        assert!(state.user().is_none());
    }

    #[test]
    fn identity_serializes_without_missing_email() {
        let json = serde_json::to_value(UserIdentity::new(UserId::parse("u1").unwrap())).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "u1" }));
    }
}
