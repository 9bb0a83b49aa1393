//! Leptos frontend for the browser build.
//!
//! The host page forwards its identity SDK's auth-state callback through the
//! exported functions below, e.g.
//!
//! ```js
//! auth.onAuthStateChanged(user => user
//!     ? hirelens.signedIn(user.uid, user.email)
//!     : hirelens.signedOut());
//! ```

pub mod app;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use hirelens_auth::IdentityProvider;

use crate::bridge::IdentityBridge;
use crate::config::ClientConfig;

thread_local! {
    static IDENTITY: IdentityBridge = IdentityBridge::new();
}

/// Build-time configuration baked into the bundle.
fn bundled_config() -> ClientConfig {
    let lookup = |key: &str| -> Option<String> {
        match key {
            crate::config::ENV_API_URL => option_env!("HIRELENS_API_URL"),
            crate::config::ENV_DENIED_REDIRECT => option_env!("HIRELENS_DENIED_REDIRECT"),
            crate::config::ENV_PROBE_TIMEOUT_MS => option_env!("HIRELENS_PROBE_TIMEOUT_MS"),
            _ => None,
        }
        .map(str::to_string)
    };

    ClientConfig::from_lookup(lookup).unwrap_or_else(|err| {
        leptos::logging::warn!("invalid bundled configuration, using defaults: {err}");
        ClientConfig::default()
    })
}

#[wasm_bindgen(js_name = signedIn)]
pub fn signed_in(uid: String, email: Option<String>) -> Result<(), JsError> {
    IDENTITY
        .with(|bridge| bridge.signed_in(&uid, email))
        .map_err(|err| JsError::new(&err.to_string()))
}

#[wasm_bindgen(js_name = signedOut)]
pub fn signed_out() {
    IDENTITY.with(IdentityBridge::signed_out);
}

#[wasm_bindgen(js_name = identityFailed)]
pub fn identity_failed(message: String) {
    IDENTITY.with(|bridge| bridge.failed(message));
}

/// WASM entry point, called when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = bundled_config();
    let identity: Rc<dyn IdentityProvider> = Rc::new(IDENTITY.with(IdentityBridge::provider));

    leptos::mount_to_body(move || {
        leptos::view! { <app::App identity=identity.clone() config=config.clone()/> }
    });
}
