//! Mock HTTP client for testing.
//!
//! Responses are configured per URL (exact match first, then prefix match,
//! then a default) and every request is recorded for later assertions.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response, StreamResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// Request body (for POST requests)
    pub body: Option<String>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a complete response. On a streaming request the body is
    /// delivered as a single chunk.
    Success(Response),
    /// Fail the request before any response arrives
    Error(HttpError),
    /// 200 with these chunks, then end of body
    Stream(Vec<Bytes>),
    /// 200 with these chunks, then the body stays open forever
    HangingStream(Vec<Bytes>),
    /// 200 with these chunks, then a body read error
    BrokenStream(Vec<Bytes>, HttpError),
}

/// Mock HTTP client for testing.
///
/// Clones share configuration and the request log.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL (or URL prefix).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Shorthand for a JSON body with the given status.
    pub fn set_json(&self, url: &str, status: u16, body: serde_json::Value) {
        self.set_response(
            url,
            MockResponse::Success(Response::new(status, Bytes::from(body.to_string()))),
        );
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests whose URL contains `fragment`.
    pub fn requests_to(&self, fragment: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.url.contains(fragment))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so "/api/config/enable.conf" beats "/api/config"
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }

    fn complete(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_))
            | Some(MockResponse::HangingStream(_))
            | Some(MockResponse::BrokenStream(..)) => Err(HttpError::Other(
                "Stream response on non-stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn chunk_stream(chunks: Vec<Bytes>) -> impl futures::Stream<Item = Result<Bytes, HttpError>> {
    futures::stream::iter(chunks.into_iter().map(Ok))
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.complete(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.complete(url)
    }

    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<StreamResponse, HttpError> {
        self.record_request("GET", url, headers, None);

        let (status, body): (u16, crate::traits::ByteStream) = match self.get_response(url) {
            Some(MockResponse::Success(response)) => (
                response.status,
                Box::pin(chunk_stream(vec![response.body])),
            ),
            Some(MockResponse::Error(err)) => return Err(err),
            Some(MockResponse::Stream(chunks)) => (200, Box::pin(chunk_stream(chunks))),
            Some(MockResponse::HangingStream(chunks)) => (
                200,
                Box::pin(chunk_stream(chunks).chain(futures::stream::pending())),
            ),
            Some(MockResponse::BrokenStream(chunks, err)) => (
                200,
                Box::pin(chunk_stream(chunks).chain(futures::stream::once(async move { Err(err) }))),
            ),
            None => return Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        };

        Ok(StreamResponse {
            status,
            headers: Headers::new(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://sensor/api/stats/top_dns",
            MockResponse::Success(Response::new(200, Bytes::from("{}"))),
        );

        let response = client
            .get("http://sensor/api/stats/top_dns", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_post_records_body() {
        let client = MockHttpClient::new();
        client.set_json("http://sensor/api/command", 200, serde_json::json!({"return": "OK"}));

        client
            .post("http://sensor/api/command", r#"{"command":"uptime"}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.requests_to("/api/command");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"command":"uptime"}"#));
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_json("http://sensor/api/config", 500, serde_json::json!({}));
        client.set_json("http://sensor/api/config/enable.conf", 200, serde_json::json!({}));

        let response = client
            .post("http://sensor/api/config/enable.conf", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let response = client
            .post("http://sensor/api/config/disable.conf", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_stream_chunks_then_end() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://sensor/api/logs/stream",
            MockResponse::Stream(vec![Bytes::from("data: 1\n\n"), Bytes::from("data: 2\n\n")]),
        );

        let response = client
            .get_stream("http://sensor/api/logs/stream?logfile=eve", &Headers::new())
            .await
            .unwrap();
        assert!(response.is_success());

        let chunks: Vec<_> = response.body.collect().await;
        assert_eq!(chunks.len(), 2);
    }

    #[tokio::test]
    async fn test_broken_stream_ends_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://sensor/api/logs/stream",
            MockResponse::BrokenStream(
                vec![Bytes::from("data: 1\n\n")],
                HttpError::Io("connection reset".to_string()),
            ),
        );

        let response = client
            .get_stream("http://sensor/api/logs/stream", &Headers::new())
            .await
            .unwrap();
        let chunks: Vec<_> = response.body.collect().await;
        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].is_err());
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("http://sensor/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }
}
