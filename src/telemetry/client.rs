//! Telemetry client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{generic_status_message, FetchFailure};
use crate::telemetry::endpoints;
use crate::telemetry::payloads::{
    CommandReply, CommandRequest, ConfigFile, ConfigWrite, RuleUpdateReply,
};
use crate::traits::{Headers, HttpClient, Response, StreamResponse};

/// Stateless, typed wrapper over the backend's HTTP API.
///
/// Paths are joined onto `base_url`. Nothing is retried here; callers
/// decide.
#[derive(Clone)]
pub struct TelemetryClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

fn serialize_body<T: serde::Serialize>(endpoint: &str, body: &T) -> Result<String, FetchFailure> {
    serde_json::to_string(body)
        .map_err(|e| FetchFailure::transport(endpoint, format!("could not encode request: {}", e)))
}

impl TelemetryClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET returning the response whatever its status. Only transport
    /// failures are errors.
    pub async fn get_raw(&self, endpoint: &str) -> Result<Response, FetchFailure> {
        debug!("GET {}", endpoint);
        self.http
            .get(&self.url(endpoint), &Headers::new())
            .await
            .map_err(|e| {
                warn!("GET {} failed: {}", endpoint, e);
                FetchFailure::transport(endpoint, e.to_string())
            })
    }

    async fn post_raw(&self, endpoint: &str, body: &str) -> Result<Response, FetchFailure> {
        debug!("POST {}", endpoint);
        self.http
            .post(&self.url(endpoint), body, &json_headers())
            .await
            .map_err(|e| {
                warn!("POST {} failed: {}", endpoint, e);
                FetchFailure::transport(endpoint, e.to_string())
            })
    }

    /// GET a JSON body. Non-2xx, transport and decode failures are errors.
    pub async fn fetch_json(&self, endpoint: &str) -> Result<serde_json::Value, FetchFailure> {
        self.fetch_typed(endpoint).await
    }

    /// GET a body as text. Non-2xx and transport failures are errors.
    pub async fn fetch_text(&self, endpoint: &str) -> Result<String, FetchFailure> {
        let response = self.get_raw(endpoint).await?;
        if !response.is_success() {
            return Err(FetchFailure::from_status(endpoint, response.status, &response.body));
        }
        Ok(response.text_lossy())
    }

    /// GET a JSON body and deserialize it.
    pub async fn fetch_typed<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchFailure> {
        let response = self.get_raw(endpoint).await?;
        if !response.is_success() {
            return Err(FetchFailure::from_status(endpoint, response.status, &response.body));
        }
        response
            .json()
            .map_err(|e| FetchFailure::decode(endpoint, response.status, &e))
    }

    /// Content of a config file under the sensor's config directory.
    pub async fn get_config(&self, filename: &str) -> Result<String, FetchFailure> {
        let file: ConfigFile = self.fetch_typed(&endpoints::config(filename)).await?;
        Ok(file.content)
    }

    /// Overwrite a config file. Success is any 2xx.
    pub async fn save_config(&self, filename: &str, content: &str) -> Result<(), FetchFailure> {
        let endpoint = endpoints::config(filename);
        let body = serialize_body(&endpoint, &ConfigWrite { content })?;
        let response = self.post_raw(&endpoint, &body).await?;
        if !response.is_success() {
            return Err(FetchFailure::from_status(&endpoint, response.status, &response.body));
        }
        Ok(())
    }

    /// Trigger a rule-list update. Success is 2xx with `status: "success"`.
    pub async fn run_rule_update(&self) -> Result<RuleUpdateReply, FetchFailure> {
        let endpoint = endpoints::RULE_UPDATE;
        let response = self.post_raw(endpoint, "{}").await?;
        let reply: Option<RuleUpdateReply> = response.json().ok();

        if !response.is_success() {
            let mut failure = FetchFailure::from_status(endpoint, response.status, &response.body);
            if let Some(message) = reply.and_then(|r| r.message).filter(|m| !m.is_empty()) {
                if failure.reason == generic_status_message(response.status) {
                    failure.reason = message;
                }
            }
            return Err(failure);
        }

        let reply = response
            .json::<RuleUpdateReply>()
            .map_err(|e| FetchFailure::decode(endpoint, response.status, &e))?;
        if !reply.succeeded() {
            let reason = reply
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    format!(
                        "rule update reported status '{}'",
                        reply.status.as_deref().unwrap_or("unknown")
                    )
                });
            return Err(FetchFailure::rejected(endpoint, response.status, reason));
        }
        Ok(reply)
    }

    /// Relay a command to the sensor.
    ///
    /// Success is 2xx with a `return` other than `FAILED`. The failure reason
    /// is the reply's `message` when present.
    pub async fn send_command(
        &self,
        command: &str,
        arguments: Option<&serde_json::Value>,
    ) -> Result<CommandReply, FetchFailure> {
        let endpoint = endpoints::COMMAND;
        let body = serialize_body(endpoint, &CommandRequest { command, arguments })?;
        let response = self.post_raw(endpoint, &body).await?;

        let reply = match response.json::<CommandReply>() {
            Ok(reply) => reply,
            Err(e) if response.is_success() => {
                return Err(FetchFailure::decode(endpoint, response.status, &e));
            }
            Err(_) => {
                return Err(FetchFailure::from_status(endpoint, response.status, &response.body));
            }
        };

        if !response.is_success() {
            let mut failure = FetchFailure::from_status(endpoint, response.status, &response.body);
            if let Some(message) = reply.message_text().filter(|m| !m.is_empty()) {
                failure.reason = message;
            }
            return Err(failure);
        }
        if reply.is_failed() {
            let reason = reply
                .message_text()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("{} returned FAILED", command));
            return Err(FetchFailure::rejected(endpoint, response.status, reason));
        }
        Ok(reply)
    }

    /// Open the live log subscription for `logfile`.
    ///
    /// A non-2xx answer is a failure; the body of a successful answer is
    /// returned unread.
    pub async fn open_log_stream(&self, logfile: &str) -> Result<StreamResponse, FetchFailure> {
        let endpoint = endpoints::log_stream(logfile);
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!("GET {} (stream)", endpoint);
        let response = self
            .http
            .get_stream(&self.url(&endpoint), &headers)
            .await
            .map_err(|e| FetchFailure::transport(&endpoint, e.to_string()))?;

        if !response.is_success() {
            return Err(FetchFailure::from_status(&endpoint, response.status, &[]));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::error::FailureKind;
    use crate::traits::HttpError;
    use serde_json::json;

    const BASE: &str = "http://sensor:5001";

    fn client_with(mock: &MockHttpClient) -> TelemetryClient {
        TelemetryClient::new(format!("{}/", BASE), Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_fetch_json_success() {
        let mock = MockHttpClient::new();
        mock.set_json(
            &format!("{}/api/stats/top_dns", BASE),
            200,
            json!({"labels": ["example.org"], "values": [3]}),
        );

        let body = client_with(&mock).fetch_json(endpoints::TOP_DNS).await.unwrap();
        assert_eq!(body["labels"][0], "example.org");
        assert_eq!(mock.get_requests()[0].url, format!("{}/api/stats/top_dns", BASE));
    }

    #[tokio::test]
    async fn test_fetch_json_decode_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/stats/top_dns", BASE),
            MockResponse::Success(Response::new(200, bytes::Bytes::from("<html>"))),
        );

        let failure = client_with(&mock).fetch_json(endpoints::TOP_DNS).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Decode);
        assert_eq!(failure.status, Some(200));
        assert_eq!(failure.endpoint, endpoints::TOP_DNS);
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/stats/top_dns", BASE),
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let failure = client_with(&mock).fetch_text(endpoints::TOP_DNS).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Transport);
        assert_eq!(failure.status, None);
        assert!(failure.reason.contains("refused"));
    }

    #[tokio::test]
    async fn test_command_failed_on_2xx() {
        let mock = MockHttpClient::new();
        mock.set_json(
            &format!("{}/api/command", BASE),
            200,
            json!({"return": "FAILED", "message": "Reload already in progress"}),
        );

        let failure = client_with(&mock)
            .send_command("ruleset-reload-rules", None)
            .await
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Rejected);
        assert_eq!(failure.reason, "Reload already in progress");
    }

    #[tokio::test]
    async fn test_command_500_uses_message() {
        let mock = MockHttpClient::new();
        mock.set_json(
            &format!("{}/api/command", BASE),
            500,
            json!({"return": "FAILED", "message": "Socket file not found"}),
        );

        let failure = client_with(&mock).send_command("uptime", None).await.unwrap_err();
        assert_eq!(failure.status, Some(500));
        assert_eq!(failure.kind, FailureKind::Status);
        assert_eq!(failure.reason, "Socket file not found");
    }

    #[tokio::test]
    async fn test_rule_update_requires_success_status() {
        let mock = MockHttpClient::new();
        mock.set_json(
            &format!("{}/api/run-suricata-update", BASE),
            200,
            json!({"status": "error", "message": "suricata-update exited with 1"}),
        );

        let failure = client_with(&mock).run_rule_update().await.unwrap_err();
        assert_eq!(failure.reason, "suricata-update exited with 1");
    }

    #[tokio::test]
    async fn test_save_config_posts_content() {
        let mock = MockHttpClient::new();
        mock.set_json(
            &format!("{}/api/config/enable.conf", BASE),
            200,
            json!({"status": "success"}),
        );

        client_with(&mock)
            .save_config(endpoints::ENABLE_CONF, "2019401\n")
            .await
            .unwrap();

        let request = &mock.requests_to("/api/config/enable.conf")[0];
        assert_eq!(request.method, "POST");
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"content": "2019401\n"}));
    }

    #[tokio::test]
    async fn test_open_log_stream_rejects_non_success() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &format!("{}/api/logs/stream", BASE),
            MockResponse::Success(Response::new(404, bytes::Bytes::new())),
        );

        let failure = client_with(&mock).open_log_stream("eve").await.unwrap_err();
        assert_eq!(failure.status, Some(404));
        assert_eq!(failure.reason, "HTTP error, status: 404");
    }
}
