//! HireLens client shell: session-gated navigation, the feature catalog and
//! the AI engine status indicator.
//!
//! The modules here are host-agnostic and tested natively. The Leptos
//! rendering layer in [`frontend`] is only compiled for `wasm32`.

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod health;
pub mod navigation;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use bridge::IdentityBridge;
pub use catalog::{CardAction, Feature, FeatureCatalog};
pub use config::{ClientConfig, ConfigError};
pub use controller::{
    Activation, ControllerOptions, ControllerSnapshot, FeatureCard, HomeView, NavigationController,
    ProbeTask, activate,
};
pub use health::{HealthCheck, HttpHealthProbe, ProbeFailure, ServiceStatus};
pub use navigation::{NavigationAction, Navigator, RecordingNavigator, dispatch};
