//! Stateless HTTP request builder and response parser for the OMDb API.
//!
//! # Design
//! `OmdbClient` holds the base URL and access key and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between.
//!
//! Request URLs keep the provider's shape exactly:
//! `<base>?s=<query>&apikey=<key>` and `<base>?i=<id>&apikey=<key>`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{classify_api_error, ClientError, NetworkError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DetailRecord, ResultList, SearchQuery};

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Option<ResultList>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Stateless client for the OMDb API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_search(&self, query: &SearchQuery) -> HttpRequest {
        self.get(format!(
            "{}?s={}&apikey={}",
            self.base_url,
            encode_component(query.as_str()),
            self.api_key
        ))
    }

    pub fn build_detail(&self, imdb_id: &str) -> HttpRequest {
        self.get(format!(
            "{}?i={}&apikey={}",
            self.base_url,
            encode_component(imdb_id),
            self.api_key
        ))
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<ResultList, ClientError> {
        check_status(&response)?;
        let envelope: SearchEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| NetworkError::Malformed(e.to_string()))?;
        if envelope.response == "True" {
            let results = envelope.search.ok_or_else(|| {
                NetworkError::Malformed("success response without a Search array".to_string())
            })?;
            debug!(count = results.len(), "search response parsed");
            return Ok(results);
        }
        Err(provider_failure(envelope.error)?)
    }

    pub fn parse_detail(&self, response: HttpResponse) -> Result<DetailRecord, ClientError> {
        check_status(&response)?;
        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| NetworkError::Malformed(e.to_string()))?;
        if value.get("Response").and_then(Value::as_str) == Some("True") {
            return serde_json::from_value(value)
                .map_err(|e| NetworkError::Malformed(e.to_string()).into());
        }
        let error = value
            .get("Error")
            .and_then(Value::as_str)
            .map(str::to_string);
        Err(provider_failure(error)?)
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Any non-2xx status is a transport-level failure, whatever the body says.
fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::Status(response.status))
}

/// Turn a `Response: "False"` body into the matching error. A failure without
/// an `Error` field is not the documented shape and counts as malformed.
fn provider_failure(error: Option<String>) -> Result<ClientError, NetworkError> {
    match error {
        Some(message) => Ok(ClientError::Api(classify_api_error(&message))),
        None => Err(NetworkError::Malformed(
            "failure response without an Error field".to_string(),
        )),
    }
}
