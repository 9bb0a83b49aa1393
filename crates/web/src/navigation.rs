//! Mapping destinations to navigation actions.
//!
//! The view layer never builds paths itself: it asks [`dispatch`] for the
//! action belonging to a [`RouteKey`] and hands it to a [`Navigator`]. In the
//! browser the navigator is backed by the router; in tests it records.

use std::cell::RefCell;

use serde::Serialize;

use hirelens_auth::GuardDecision;
use hirelens_core::{HistoryMode, RouteKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationAction {
    pub to: RouteKey,
    pub history: HistoryMode,
}

impl NavigationAction {
    pub fn path(&self) -> &'static str {
        self.to.path()
    }

    /// The redirect carried by a guard decision, if any.
    pub fn from_decision(decision: GuardDecision) -> Option<Self> {
        match decision {
            GuardDecision::Redirect { to, history } => Some(Self { to, history }),
            GuardDecision::Loading | GuardDecision::Render(_) => None,
        }
    }
}

/// Navigation for a user-initiated activation of `route`.
pub fn dispatch(route: RouteKey) -> NavigationAction {
    NavigationAction {
        to: route,
        history: HistoryMode::Push,
    }
}

/// Performs navigation actions.
pub trait Navigator {
    fn navigate(&self, action: NavigationAction);
}

impl<N> Navigator for &N
where
    N: Navigator + ?Sized,
{
    fn navigate(&self, action: NavigationAction) {
        (**self).navigate(action)
    }
}

/// Navigator that only records what it was asked to do (tests/dev).
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    actions: RefCell<Vec<NavigationAction>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<NavigationAction> {
        self.actions.borrow().clone()
    }

    pub fn last(&self) -> Option<NavigationAction> {
        self.actions.borrow().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, action: NavigationAction) {
        tracing::debug!(to = %action.to, history = ?action.history, "navigate");
        self.actions.borrow_mut().push(action);
    }
}
