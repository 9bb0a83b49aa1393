//! `hirelens-core`: foundation types shared by every client crate.
//!
//! This crate contains **pure** primitives (no IO, no async, no rendering).

pub mod error;
pub mod id;
pub mod route;

pub use error::{ClientError, ClientResult};
pub use id::UserId;
pub use route::{Capability, HistoryMode, RouteKey};
