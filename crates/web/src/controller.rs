//! Session-gated navigation controller.
//!
//! The controller is the only owner of the two pieces of mutable client
//! state:
//!
//! - the [`SessionState`] fed by the identity provider subscription, and
//! - the [`ServiceStatus`] written once by the health probe.
//!
//! Everything else (guards, cards, the rendering layer) works on
//! [`ControllerSnapshot`] copies.
//!
//! ## Lifecycle
//!
//! ```text
//! mount ──► subscribe(identity) ──► notifications ──► snapshot ──► observer
//!   │
//!   └─────► ProbeTask (spawned by the host) ──► status (once) ──► observer
//!
//! unmount ──► unsubscribe (exactly once) + discard any later probe result
//! ```
//!
//! Execution is single-threaded: state lives in `Rc<RefCell<_>>` and the
//! probe task is `!Send`, to be driven by `spawn_local` (browser) or a
//! current-thread runtime.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use serde::Serialize;

use hirelens_auth::{
    GuardDecision, IdentityProvider, RedirectPolicy, RouteGuard, SessionState, Subscription,
};
use hirelens_core::RouteKey;

use crate::catalog::{CardAction, FeatureCatalog};
use crate::config::ClientConfig;
use crate::health::{HealthCheck, ServiceStatus};
use crate::navigation::{NavigationAction, Navigator, dispatch};

/// Point-in-time copy of the controller's state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerSnapshot {
    pub session: SessionState,
    pub status: ServiceStatus,
    pub status_checked_at: Option<DateTime<Utc>>,
}

/// Callback invoked after every state change.
pub type Observer = Rc<dyn Fn(&ControllerSnapshot)>;

#[derive(Clone)]
pub struct ControllerOptions {
    pub policy: RedirectPolicy,
    pub catalog: FeatureCatalog,
    observer: Option<Observer>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::new(RedirectPolicy::default())
    }
}

impl ControllerOptions {
    pub fn new(policy: RedirectPolicy) -> Self {
        Self {
            policy,
            catalog: FeatureCatalog::standard(),
            observer: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.redirect_policy)
    }

    pub fn with_catalog(mut self, catalog: FeatureCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn observe(mut self, observer: impl Fn(&ControllerSnapshot) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }
}

struct ControllerState {
    snapshot: ControllerSnapshot,
    mounted: bool,
    observer: Option<Observer>,
}

impl ControllerState {
    /// Apply `change` if still mounted, then notify outside the borrow so the
    /// observer may read the controller.
    fn update<F>(cell: &RefCell<Self>, change: F)
    where
        F: FnOnce(&mut ControllerSnapshot) -> bool,
    {
        let pending = {
            let mut state = cell.borrow_mut();
            if !state.mounted || !change(&mut state.snapshot) {
                return;
            }
            state
                .observer
                .clone()
                .map(|observer| (observer, state.snapshot.clone()))
        };

        if let Some((observer, snapshot)) = pending {
            observer(&snapshot);
        }
    }

    fn record_status(cell: &RefCell<Self>, status: ServiceStatus) {
        if !cell.borrow().mounted {
            tracing::debug!(%status, "discarding health check result; controller unmounted");
            return;
        }

        Self::update(cell, |snapshot| {
            if snapshot.status.is_terminal() {
                return false;
            }
            snapshot.status = status;
            snapshot.status_checked_at = Some(Utc::now());
            true
        });
    }
}

/// The mount's single health check.
///
/// The host spawns it once. Dropping it without polling leaves the status
/// `unknown`. A result that arrives after unmount is discarded.
#[must_use = "the health check only runs when the task is spawned or awaited"]
pub struct ProbeTask {
    inner: Pin<Box<dyn Future<Output = ()>>>,
}

impl ProbeTask {
    fn new<H>(state: Weak<RefCell<ControllerState>>, probe: H) -> Self
    where
        H: HealthCheck + 'static,
    {
        Self {
            inner: Box::pin(async move {
                let mounted = state.upgrade().is_some_and(|s| s.borrow().mounted);
                if !mounted {
                    tracing::debug!("controller unmounted before the health check started");
                    return;
                }

                let status = probe.check().await;

                match state.upgrade() {
                    Some(state) => ControllerState::record_status(&state, status),
                    None => tracing::debug!(%status, "discarding health check result; controller dropped"),
                }
            }),
        }
    }
}

impl Future for ProbeTask {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.get_mut().inner.as_mut().poll(cx)
    }
}

impl core::fmt::Debug for ProbeTask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbeTask").finish_non_exhaustive()
    }
}

/// One card on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub destination: RouteKey,
    pub action: CardAction,
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything the home page needs, derived from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub session_resolved: bool,
    pub authenticated: bool,
    /// Sign-in call to action; hidden while the session is unresolved.
    pub show_sign_in: bool,
    pub user_email: Option<String>,
    pub status: ServiceStatus,
    pub status_label: &'static str,
    pub status_checked_at: Option<DateTime<Utc>>,
    pub cards: Vec<FeatureCard>,
}

impl HomeView {
    pub fn build(snapshot: &ControllerSnapshot, catalog: &FeatureCatalog) -> Self {
        let session = &snapshot.session;
        let cards = catalog
            .iter()
            .map(|feature| {
                let action = feature.action(session);
                FeatureCard {
                    title: feature.title,
                    description: feature.description,
                    destination: feature.destination,
                    action,
                    label: action.label(),
                    enabled: action.is_enabled(),
                }
            })
            .collect();

        Self {
            session_resolved: session.is_resolved(),
            authenticated: session.is_authenticated(),
            show_sign_in: session.is_resolved() && session.user().is_none(),
            user_email: session.user().and_then(|u| u.email.clone()),
            status: snapshot.status,
            status_label: snapshot.status.indicator_label(),
            status_checked_at: snapshot.status_checked_at,
            cards,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Navigation performed: the destination itself, or the guard's redirect.
    Navigated(NavigationAction),
    /// The entry is gated off for this session; nothing happened.
    Ignored,
}

/// Handle a click on `route` given a session snapshot.
///
/// Catalog entries use their own gating; other routes are gated by the
/// capability they require. An accepted activation is then evaluated by the
/// destination's [`RouteGuard`], which has the final say.
pub fn activate<N>(
    session: &SessionState,
    catalog: &FeatureCatalog,
    policy: RedirectPolicy,
    route: RouteKey,
    navigator: &N,
) -> Activation
where
    N: Navigator + ?Sized,
{
    let enabled = match catalog.get(route) {
        Some(feature) => feature.is_enabled(session),
        None => !route.is_guarded() || session.is_authenticated(),
    };

    if !enabled {
        tracing::debug!(%route, "activation ignored; feature requires a session");
        return Activation::Ignored;
    }

    let action = match RouteGuard::new(route, policy).evaluate(session) {
        GuardDecision::Render(destination) => dispatch(destination),
        GuardDecision::Redirect { to, history } => NavigationAction { to, history },
        GuardDecision::Loading => {
            tracing::debug!(%route, "activation ignored; session not resolved");
            return Activation::Ignored;
        }
    };

    navigator.navigate(action);
    Activation::Navigated(action)
}

/// Top-level orchestrator of session gating and the health indicator.
pub struct NavigationController {
    state: Rc<RefCell<ControllerState>>,
    subscription: Option<Subscription>,
    catalog: FeatureCatalog,
    policy: RedirectPolicy,
}

impl NavigationController {
    /// Subscribe to `identity` and prepare the mount's health check.
    ///
    /// The returned [`ProbeTask`] must be spawned (or awaited) by the host;
    /// it is the only health check this mount performs.
    pub fn mount<I, H>(identity: &I, probe: H, options: ControllerOptions) -> (Self, ProbeTask)
    where
        I: IdentityProvider + ?Sized,
        H: HealthCheck + 'static,
    {
        let state = Rc::new(RefCell::new(ControllerState {
            snapshot: ControllerSnapshot::default(),
            mounted: true,
            observer: options.observer,
        }));

        let listener_state = Rc::downgrade(&state);
        let subscription = identity.subscribe(Box::new(move |notification| {
            if let Some(state) = listener_state.upgrade() {
                ControllerState::update(&state, |snapshot| {
                    snapshot.session.apply(notification);
                    true
                });
            }
        }));

        let task = ProbeTask::new(Rc::downgrade(&state), probe);

        tracing::info!(
            policy = ?options.policy,
            features = options.catalog.len(),
            "navigation controller mounted"
        );

        let controller = Self {
            state,
            subscription: Some(subscription),
            catalog: options.catalog,
            policy: options.policy,
        };
        (controller, task)
    }

    /// Tear down the subscription and stop accepting probe results.
    ///
    /// Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        let was_mounted = std::mem::replace(&mut self.state.borrow_mut().mounted, false);

        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }

        if was_mounted {
            tracing::info!("navigation controller unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.state.borrow().snapshot.clone()
    }

    pub fn session(&self) -> SessionState {
        self.state.borrow().snapshot.session.clone()
    }

    pub fn status(&self) -> ServiceStatus {
        self.state.borrow().snapshot.status
    }

    pub fn policy(&self) -> RedirectPolicy {
        self.policy
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn guard(&self, route: RouteKey) -> GuardDecision {
        RouteGuard::new(route, self.policy).evaluate(&self.state.borrow().snapshot.session)
    }

    /// Resolve `path`, apply its guard, and perform the redirect if denied.
    pub fn visit<N>(&self, path: &str, navigator: &N) -> GuardDecision
    where
        N: Navigator + ?Sized,
    {
        let decision = self.guard(RouteKey::resolve(path));
        if let Some(redirect) = NavigationAction::from_decision(decision) {
            navigator.navigate(redirect);
        }
        decision
    }

    pub fn home_view(&self) -> HomeView {
        HomeView::build(&self.state.borrow().snapshot, &self.catalog)
    }

    pub fn activate<N>(&self, route: RouteKey, navigator: &N) -> Activation
    where
        N: Navigator + ?Sized,
    {
        let session = self.session();
        activate(&session, &self.catalog, self.policy, route, navigator)
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl core::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigationController")
            .field("mounted", &self.is_mounted())
            .field("policy", &self.policy)
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}
