//! `hirelens-status`: mount the controller natively, run the health check once
//! and print the home view as JSON.
//!
//! Exit code 0 when the AI engine is online, 1 otherwise, 2 on bad config.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() {
    use hirelens_auth::InMemoryIdentityProvider;
    use hirelens_observability::LogConfig;
    use hirelens_web::{
        ClientConfig, ControllerOptions, HttpHealthProbe, NavigationController, ServiceStatus,
    };

    hirelens_observability::tracing::init(&LogConfig::from_env());

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(2);
        }
    };

    tracing::info!(endpoint = %config.health_endpoint(), "checking AI engine");

    let identity = InMemoryIdentityProvider::resolved(None);
    let (mut controller, probe) = NavigationController::mount(
        &identity,
        HttpHealthProbe::from_config(&config),
        ControllerOptions::from_config(&config),
    );
    probe.await;

    let view = controller.home_view();
    controller.unmount();

    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = %err, "failed to serialize home view"),
    }

    let code = if view.status == ServiceStatus::Online { 0 } else { 1 };
    std::process::exit(code);
}

#[cfg(target_arch = "wasm32")]
fn main() {}
