//! Host-facing identity bridge.
//!
//! The identity SDK lives in the host page. Its auth-state callback forwards
//! each change here as a flat call (`signed_in`, `signed_out`, `failed`);
//! the bridge turns those into notifications on a shared
//! [`InMemoryIdentityProvider`] that the controller subscribes to.
//!
//! The bridge starts pending, so guarded routes show the loading state until
//! the host reports the first identity.

use hirelens_auth::{IdentityStreamError, InMemoryIdentityProvider, UserIdentity};
use hirelens_core::{ClientResult, UserId};

#[derive(Clone, Default)]
pub struct IdentityBridge {
    provider: InMemoryIdentityProvider,
}

impl IdentityBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider handle for [`crate::controller::NavigationController::mount`].
    pub fn provider(&self) -> InMemoryIdentityProvider {
        self.provider.clone()
    }

    /// The host reported a signed-in user.
    ///
    /// A uid the client cannot accept is reported to subscribers as a
    /// rejected identity, which resolves the session as signed out.
    pub fn signed_in(&self, uid: &str, email: Option<String>) -> ClientResult<()> {
        let id = match UserId::parse(uid) {
            Ok(id) => id,
            Err(err) => {
                self.provider
                    .fail(IdentityStreamError::Rejected(err.to_string()));
                return Err(err);
            }
        };

        let mut user = UserIdentity::new(id);
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            user = user.with_email(email);
        }

        tracing::debug!(uid = %user.id, "host reported sign-in");
        self.provider.sign_in(user);
        Ok(())
    }

    pub fn signed_out(&self) {
        tracing::debug!("host reported sign-out");
        self.provider.sign_out();
    }

    /// The host could not determine the identity (SDK failed to load, etc.).
    pub fn failed(&self, message: impl Into<String>) {
        self.provider
            .fail(IdentityStreamError::Unavailable(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirelens_auth::{GuardDecision, IdentityProvider, SessionState};
    use hirelens_core::ClientError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn follow(bridge: &IdentityBridge) -> (Rc<RefCell<SessionState>>, hirelens_auth::Subscription) {
        let session = Rc::new(RefCell::new(SessionState::pending()));
        let sink = session.clone();
        let sub = bridge
            .provider()
            .subscribe(Box::new(move |n| sink.borrow_mut().apply(n)));
        (session, sub)
    }

    #[test]
    fn starts_pending() {
        let bridge = IdentityBridge::new();
        let (session, _sub) = follow(&bridge);

        assert!(!session.borrow().is_resolved());
        assert!(!bridge.provider().is_resolved());
    }

    #[test]
    fn sign_in_and_out_reach_subscribers() {
        let bridge = IdentityBridge::new();
        let (session, _sub) = follow(&bridge);

        bridge
            .signed_in("Xk3fQ9aB", Some("ada@example.com".to_string()))
            .unwrap();
        {
            let session = session.borrow();
            assert!(session.is_authenticated());
            assert_eq!(
                session.user().and_then(|u| u.email.as_deref()),
                Some("ada@example.com")
            );
        }

        bridge.signed_out();
        assert!(session.borrow().is_resolved());
        assert!(!session.borrow().is_authenticated());
    }

    #[test]
    fn blank_email_is_dropped() {
        let bridge = IdentityBridge::new();
        bridge.signed_in("uid-1", Some("  ".to_string())).unwrap();

        let user = bridge.provider().current_user().unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn invalid_uid_resolves_as_signed_out() {
        let bridge = IdentityBridge::new();
        let (session, _sub) = follow(&bridge);

        let err = bridge.signed_in("", None).unwrap_err();

        assert!(matches!(err, ClientError::InvalidId(_)));
        assert!(session.borrow().is_resolved());
        assert!(!session.borrow().is_authenticated());
    }

    #[test]
    fn sdk_failure_denies_guarded_routes() {
        let bridge = IdentityBridge::new();
        let (session, _sub) = follow(&bridge);

        bridge.failed("sdk failed to load");

        let guard = hirelens_auth::RouteGuard::new(
            hirelens_core::RouteKey::History,
            hirelens_auth::RedirectPolicy::Home,
        );
        assert!(matches!(
            guard.evaluate(&session.borrow()),
            GuardDecision::Redirect { .. }
        ));
    }
}
