//! reqwest implementation of the core `Transport`.

use std::error::Error as _;
use std::time::Duration;

use movie_search_core::{HttpMethod, HttpRequest, HttpResponse, NetworkError, Transport};
use tracing::debug;

/// Markers reqwest/hyper put in the cause chain when name resolution or
/// routing fails, which is what a disconnected host looks like.
const OFFLINE_MARKERS: &[&str] = &["dns error", "failed to lookup address", "network is unreachable"];

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport. `timeout` bounds each whole request when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(classify)?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest failure onto the core's network taxonomy.
fn classify(err: reqwest::Error) -> NetworkError {
    let detail = describe(&err);
    if err.is_timeout() {
        NetworkError::Other(detail)
    } else if err.is_connect() {
        let lowered = detail.to_lowercase();
        if OFFLINE_MARKERS.iter().any(|m| lowered.contains(m)) {
            NetworkError::Offline(detail)
        } else {
            NetworkError::FetchFailed(detail)
        }
    } else if err.is_request() {
        NetworkError::FetchFailed(detail)
    } else {
        NetworkError::Other(detail)
    }
}

/// The error and all of its sources, joined.
fn describe(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
