//! `hirelens-auth`: session state and navigation gating (client side).
//!
//! This crate is intentionally decoupled from HTTP and rendering: it turns an
//! identity provider's notifications into a [`SessionState`] and decides,
//! per destination, whether to render, wait, or redirect.

pub mod guard;
pub mod in_memory;
pub mod session;
pub mod stream;

pub use guard::{GuardDecision, GuardState, RedirectPolicy, RouteGuard};
pub use in_memory::InMemoryIdentityProvider;
pub use session::{IdentityNotification, IdentityStreamError, SessionState, UserIdentity};
pub use stream::{IdentityProvider, Listener, Subscription};
