//! In-memory identity provider for tests, dev, and host glue.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::session::{IdentityNotification, IdentityStreamError, UserIdentity};
use crate::stream::{IdentityProvider, Listener, Subscription};

struct ListenerSlot {
    id: u64,
    active: Rc<Cell<bool>>,
    listener: RefCell<Listener>,
}

#[derive(Default)]
struct Shared {
    /// `None` until the provider has determined the session.
    current: RefCell<Option<IdentityNotification>>,
    listeners: RefCell<Vec<Rc<ListenerSlot>>>,
    next_id: Cell<u64>,
    /// Notifications published while a fan-out is running.
    queued: RefCell<VecDeque<IdentityNotification>>,
    delivering: Cell<bool>,
}

/// In-memory identity provider.
///
/// - No IO
/// - Synchronous fan-out on the caller's stack
/// - Clones share the same state (host glue keeps one, the controller another)
///
/// Changes made from inside a listener are queued and delivered, in order and
/// to every listener, once the current fan-out completes. The last
/// notification each listener sees is always the provider's current state.
#[derive(Clone, Default)]
pub struct InMemoryIdentityProvider {
    shared: Rc<Shared>,
}

impl InMemoryIdentityProvider {
    /// A provider that has not determined the session yet; subscribers wait.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A provider that already knows the session.
    pub fn resolved(user: Option<UserIdentity>) -> Self {
        let provider = Self::default();
        *provider.shared.current.borrow_mut() = Some(Ok(user));
        provider
    }

    pub fn sign_in(&self, user: UserIdentity) {
        self.publish(Ok(Some(user)));
    }

    pub fn sign_out(&self) {
        self.publish(Ok(None));
    }

    /// Report that the provider could not determine the session.
    pub fn fail(&self, error: IdentityStreamError) {
        self.publish(Err(error));
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        match &*self.shared.current.borrow() {
            Some(Ok(user)) => user.clone(),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.shared.current.borrow().is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.shared
            .listeners
            .borrow()
            .iter()
            .filter(|slot| slot.active.get())
            .count()
    }

    fn publish(&self, notification: IdentityNotification) {
        {
            let mut current = self.shared.current.borrow_mut();
            if current.as_ref() == Some(&notification) {
                return;
            }
            *current = Some(notification.clone());
        }

        self.shared.queued.borrow_mut().push_back(notification);
        if self.shared.delivering.replace(true) {
            tracing::debug!("identity change queued behind running fan-out");
            return;
        }

        loop {
            let next = self.shared.queued.borrow_mut().pop_front();
            let Some(notification) = next else { break };

            // Snapshot so listeners may unsubscribe (or subscribe) during fan-out.
            let slots: Vec<Rc<ListenerSlot>> = self.shared.listeners.borrow().clone();
            tracing::debug!(listeners = slots.len(), "publishing identity notification");

            for slot in slots {
                deliver(&slot, notification.clone());
            }
        }

        self.shared.delivering.set(false);
    }
}

fn deliver(slot: &ListenerSlot, notification: IdentityNotification) {
    if !slot.active.get() {
        return;
    }
    match slot.listener.try_borrow_mut() {
        Ok(mut listener) => listener(notification),
        Err(_) => tracing::debug!(listener = slot.id, "skipping re-entrant identity notification"),
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);

        let active = Rc::new(Cell::new(true));
        let slot = Rc::new(ListenerSlot {
            id,
            active: active.clone(),
            listener: RefCell::new(listener),
        });
        self.shared.listeners.borrow_mut().push(slot.clone());

        let initial = self.shared.current.borrow().clone();
        if let Some(notification) = initial {
            deliver(&slot, notification);
        }

        let shared: Weak<Shared> = Rc::downgrade(&self.shared);
        Subscription::new(active, move || {
            if let Some(shared) = shared.upgrade() {
                shared.listeners.borrow_mut().retain(|slot| slot.id != id);
            }
        })
    }
}
