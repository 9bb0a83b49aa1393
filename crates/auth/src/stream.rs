//! Identity provider subscription abstraction (mechanics only).
//!
//! An identity provider is anything that can tell the client who is signed
//! in and notify it when that changes. The client treats it as a capability:
//! hand it a listener, get back a [`Subscription`] that tears the listener
//! down again.
//!
//! ## Delivery contract
//!
//! - The **first** notification delivered to a listener is the provider's
//!   current known state (possibly "no user"). Providers that already know the
//!   state deliver it synchronously from `subscribe`; providers still
//!   determining it deliver it later.
//! - Every later change of authentication status delivers exactly one
//!   notification.
//! - After [`Subscription::unsubscribe`] returns, the listener is never called
//!   again.
//!
//! ## Execution model
//!
//! Single-threaded: listeners are plain `FnMut` closures invoked on the same
//! event loop that owns the subscriber, so no `Send`/`Sync` bounds apply.

use std::cell::Cell;
use std::rc::Rc;

use crate::session::IdentityNotification;

/// Callback invoked for each notification.
pub type Listener = Box<dyn FnMut(IdentityNotification)>;

/// Capability interface over an identity provider.
pub trait IdentityProvider {
    fn subscribe(&self, listener: Listener) -> Subscription;
}

impl<P> IdentityProvider for Rc<P>
where
    P: IdentityProvider + ?Sized,
{
    fn subscribe(&self, listener: Listener) -> Subscription {
        (**self).subscribe(listener)
    }
}

/// Handle to a live listener registration.
///
/// Unsubscribing is idempotent. Dropping the handle unsubscribes.
pub struct Subscription {
    active: Rc<Cell<bool>>,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// `active` is shared with the provider, which must check it before each
    /// delivery. `teardown` releases the provider-side registration.
    pub fn new(active: Rc<Cell<bool>>, teardown: impl FnOnce() + 'static) -> Self {
        Self {
            active,
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            self.active.set(false);
            teardown();
            tracing::debug!("identity subscription torn down");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsubscribe_runs_teardown_once() {
        let calls = Rc::new(Cell::new(0u32));
        let active = Rc::new(Cell::new(true));

        let counter = calls.clone();
        let mut sub = Subscription::new(active.clone(), move || counter.set(counter.get() + 1));

        sub.unsubscribe();
        sub.unsubscribe();
        drop(sub);

        assert_eq!(calls.get(), 1);
        assert!(!active.get());
    }

    #[test]
    fn drop_unsubscribes() {
        let active = Rc::new(Cell::new(true));
        let sub = Subscription::new(active.clone(), || {});
        assert!(sub.is_active());

        drop(sub);
        assert!(!active.get());
    }
}
