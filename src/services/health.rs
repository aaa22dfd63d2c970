use crate::domain::traits::ServiceHealth;
use crate::domain::{HealthProbe, ServiceDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: Option<String>,
}

/// Readiness probe over HTTP against the service's host port.
#[derive(Debug)]
pub struct HttpHealth {
    client: reqwest::Client,
}

impl HttpHealth {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpHealth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceHealth for HttpHealth {
    async fn probe(&self, definition: &ServiceDefinition) -> bool {
        let url = format!(
            "http://localhost:{}{}",
            definition.host_port,
            definition.probe.path()
        );

        let response = match self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!("probe de {} falhou: {err}", definition.key);
                return false;
            }
        };

        if !response.status().is_success() {
            debug!(
                "probe de {} retornou status {}",
                definition.key,
                response.status()
            );
            return false;
        }

        match &definition.probe {
            HealthProbe::StatusOnly { .. } => true,
            HealthProbe::JsonStatus { accepted, .. } => match response.text().await {
                Ok(body) => body_indicates_ready(&body, accepted),
                Err(_) => false,
            },
        }
    }
}

/// A JSON-status body counts as ready only when its `status` field is
/// among the accepted values; anything malformed reads as not ready.
fn body_indicates_ready(raw: &str, accepted: &[&str]) -> bool {
    match serde_json::from_str::<HealthBody>(raw) {
        Ok(body) => body
            .status
            .as_deref()
            .map(|status| accepted.contains(&status))
            .unwrap_or(false),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_listed_status_values() {
        assert!(body_indicates_ready(
            r#"{"status": "healthy"}"#,
            &["healthy", "ok"]
        ));
        assert!(body_indicates_ready(r#"{"status": "ok"}"#, &["healthy", "ok"]));
    }

    #[test]
    fn rejects_other_status_values() {
        assert!(!body_indicates_ready(
            r#"{"status": "starting"}"#,
            &["healthy"]
        ));
    }

    #[test]
    fn rejects_missing_status_field() {
        assert!(!body_indicates_ready(r#"{"uptime": 42}"#, &["healthy"]));
    }

    #[test]
    fn rejects_malformed_body() {
        assert!(!body_indicates_ready("<html>busy</html>", &["healthy"]));
        assert!(!body_indicates_ready("", &["healthy"]));
    }
}
