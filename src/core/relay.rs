use crate::config::relay::{RelayConfig, RelayMode};
use crate::domain::model::{ContactSubmission, DispatchOutcome};
use crate::domain::ports::{Relay, ResponseVisibility};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

fn transport_outcome(err: reqwest::Error) -> DispatchOutcome {
    if err.is_timeout() {
        DispatchOutcome::Timeout
    } else {
        DispatchOutcome::TransportFailure(err.to_string())
    }
}

/// 第三方表單腳本。回應對呼叫端不可見，只要完成一次往返就算送達
pub struct ScriptRelay {
    client: Client,
    endpoint: String,
}

impl ScriptRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Relay for ScriptRelay {
    async fn dispatch(&self, submission: &ContactSubmission) -> DispatchOutcome {
        tracing::debug!("Posting form to relay script: {}", self.endpoint);

        match self
            .client
            .post(&self.endpoint)
            .form(submission)
            .send()
            .await
        {
            Ok(response) => {
                // opaque 模式下看不到狀態碼，只記錄在 log
                tracing::debug!("Relay script answered {}", response.status());
                DispatchOutcome::Success
            }
            Err(e) => transport_outcome(e),
        }
    }

    fn visibility(&self) -> ResponseVisibility {
        ResponseVisibility::Opaque
    }
}

#[derive(Debug, Serialize)]
struct BackendRequest<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// 自家的 `/api/contact` 服務，時間戳記由伺服器產生
pub struct BackendRelay {
    client: Client,
    endpoint: String,
}

impl BackendRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Relay for BackendRelay {
    async fn dispatch(&self, submission: &ContactSubmission) -> DispatchOutcome {
        tracing::debug!("Posting contact to backend: {}", self.endpoint);

        let body = BackendRequest {
            name: &submission.name,
            email: &submission.email,
            message: &submission.message,
        };

        match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => DispatchOutcome::Success,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                DispatchOutcome::TransportFailure(format!("HTTP {}: {}", status, body))
            }
            Err(e) => transport_outcome(e),
        }
    }

    fn visibility(&self) -> ResponseVisibility {
        ResponseVisibility::Transparent
    }
}

/// 每個部署只啟用一種 relay
pub fn relay_from_config(config: &RelayConfig) -> Box<dyn Relay> {
    match config.mode {
        RelayMode::Backend => Box::new(BackendRelay::new(config.endpoint.clone())),
        RelayMode::Script => Box::new(ScriptRelay::new(config.endpoint.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello there".to_string(),
            timestamp: "2024-05-01T12:30:05.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_script_relay_ignores_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/exec")
                .body_contains("name=Ada")
                .body_contains("email=ada%40example.com")
                .body_contains("timestamp=2024-05-01T12%3A30%3A05.000Z");
            then.status(500);
        });

        let relay = ScriptRelay::new(server.url("/exec"));
        assert_eq!(relay.dispatch(&submission()).await, DispatchOutcome::Success);
        assert_eq!(relay.visibility(), ResponseVisibility::Opaque);
        mock.assert();
    }

    #[tokio::test]
    async fn test_backend_relay_surfaces_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/contact").json_body(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "message": "Hello there"
            }));
            then.status(500)
                .json_body(serde_json::json!({"error": "Failed to save data"}));
        });

        let relay = BackendRelay::new(server.url("/api/contact"));
        match relay.dispatch(&submission()).await {
            DispatchOutcome::TransportFailure(reason) => assert!(reason.contains("500")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        mock.assert();
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // 先 bind 再釋放，取得沒有人在聽的 port
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let relay = ScriptRelay::new(format!("http://127.0.0.1:{}/exec", port));
        assert!(matches!(
            relay.dispatch(&submission()).await,
            DispatchOutcome::TransportFailure(_)
        ));
    }

    #[test]
    fn test_relay_from_config_picks_mode() {
        let backend = relay_from_config(&RelayConfig::new(
            RelayMode::Backend,
            "http://localhost:3001/api/contact",
        ));
        assert_eq!(backend.visibility(), ResponseVisibility::Transparent);

        let script = relay_from_config(&RelayConfig::new(
            RelayMode::Script,
            "https://script.example.com/exec",
        ));
        assert_eq!(script.visibility(), ResponseVisibility::Opaque);
    }
}
