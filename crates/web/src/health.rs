//! One-shot reachability check of the AI engine.
//!
//! The probe hits `GET <base-url>/` once and classifies the outcome:
//!
//! | outcome                              | status    |
//! |--------------------------------------|-----------|
//! | any 2xx                              | `online`  |
//! | any other HTTP status                | `error`   |
//! | refused / DNS / timeout / other I/O  | `offline` |
//!
//! Failures never escape [`HealthCheck::check`]; they are folded into the
//! status. There is no retry and no polling.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Reachability of the remote processing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// No check has completed yet (or it never settled).
    #[default]
    Unknown,
    /// Responded with a 2xx status.
    Online,
    /// Unreachable at the network level.
    Offline,
    /// Reachable but responded with a non-2xx status.
    Error,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "unknown",
            ServiceStatus::Online => "online",
            ServiceStatus::Offline => "offline",
            ServiceStatus::Error => "error",
        }
    }

    /// Whether this status is final for the current mount.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ServiceStatus::Unknown)
    }

    /// Text of the status indicator on the home page.
    pub fn indicator_label(&self) -> &'static str {
        match self {
            ServiceStatus::Unknown => "Checking AI Engine...",
            ServiceStatus::Online => "AI Engine Connected",
            ServiceStatus::Offline => "AI Engine Offline - Some features may be unavailable",
            ServiceStatus::Error => "AI Engine Error - Some features may be unavailable",
        }
    }
}

impl core::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a probe did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    /// Connection refused, DNS failure, timeout, or any other transport error.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service responded with HTTP {0}")]
    Service(u16),
}

impl ServiceStatus {
    pub fn from_probe(outcome: &Result<(), ProbeFailure>) -> Self {
        match outcome {
            Ok(()) => ServiceStatus::Online,
            Err(ProbeFailure::Service(_)) => ServiceStatus::Error,
            Err(ProbeFailure::Transport(_)) => ServiceStatus::Offline,
        }
    }
}

/// Something that can report the service's reachability once.
pub trait HealthCheck {
    /// Produce a terminal status. Must not fail.
    fn check(&self) -> impl Future<Output = ServiceStatus>;
}

/// HTTP implementation of [`HealthCheck`].
#[derive(Debug, Clone)]
pub struct HttpHealthProbe {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpHealthProbe {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.health_endpoint()).with_timeout(config.probe_timeout())
    }

    /// Bound the request. Without a timeout an unanswered request leaves the
    /// status `unknown` for the rest of the mount.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform the request and report the raw outcome.
    pub async fn probe(&self) -> Result<(), ProbeFailure> {
        #[allow(unused_mut)]
        let mut req = self.client.get(&self.endpoint);

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ProbeFailure::Transport(e.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ProbeFailure::Service(resp.status().as_u16()))
        }
    }
}

impl HealthCheck for HttpHealthProbe {
    async fn check(&self) -> ServiceStatus {
        let outcome = self.probe().await;
        let status = ServiceStatus::from_probe(&outcome);

        match outcome {
            Ok(()) => tracing::info!(endpoint = %self.endpoint, %status, "health check completed"),
            Err(err) => tracing::warn!(endpoint = %self.endpoint, %status, error = %err, "health check failed"),
        }

        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_responding(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    /// An address nothing listens on.
    fn closed_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    #[test]
    fn classification_table() {
        assert_eq!(ServiceStatus::from_probe(&Ok(())), ServiceStatus::Online);
        assert_eq!(
            ServiceStatus::from_probe(&Err(ProbeFailure::Service(503))),
            ServiceStatus::Error
        );
        assert_eq!(
            ServiceStatus::from_probe(&Err(ProbeFailure::Transport("refused".into()))),
            ServiceStatus::Offline
        );
    }

    #[test]
    fn only_unknown_is_non_terminal() {
        assert!(!ServiceStatus::Unknown.is_terminal());
        for status in [ServiceStatus::Online, ServiceStatus::Offline, ServiceStatus::Error] {
            assert!(status.is_terminal());
        }
    }

    #[tokio::test]
    async fn ok_response_is_online() {
        let server = server_responding(200).await;
        let probe = HttpHealthProbe::new(format!("{}/", server.uri()));

        assert_eq!(probe.check().await, ServiceStatus::Online);
    }

    #[tokio::test]
    async fn no_content_is_still_online() {
        let server = server_responding(204).await;
        let probe = HttpHealthProbe::new(format!("{}/", server.uri()));

        assert_eq!(probe.check().await, ServiceStatus::Online);
    }

    #[tokio::test]
    async fn server_error_is_error() {
        let server = server_responding(500).await;
        let probe = HttpHealthProbe::new(format!("{}/", server.uri()));

        assert_eq!(probe.probe().await, Err(ProbeFailure::Service(500)));
    }

    #[tokio::test]
    async fn not_found_is_error() {
        let server = server_responding(404).await;
        let probe = HttpHealthProbe::new(format!("{}/", server.uri()));

        assert_eq!(probe.check().await, ServiceStatus::Error);
    }

    #[tokio::test]
    async fn refused_connection_is_offline() {
        let probe = HttpHealthProbe::new(closed_endpoint());

        assert_eq!(probe.check().await, ServiceStatus::Offline);
    }

    #[tokio::test]
    async fn timeout_is_offline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let probe = HttpHealthProbe::new(format!("{}/", server.uri()))
            .with_timeout(Some(Duration::from_millis(50)));

        assert_eq!(probe.check().await, ServiceStatus::Offline);
    }

    #[tokio::test]
    async fn from_config_targets_root_of_base_url() {
        let server = server_responding(200).await;
        let config = ClientConfig {
            api_base_url: server.uri(),
            ..ClientConfig::default()
        };

        let probe = HttpHealthProbe::from_config(&config);
        assert_eq!(probe.endpoint(), format!("{}/", server.uri()));
        assert_eq!(probe.check().await, ServiceStatus::Online);
    }
}
