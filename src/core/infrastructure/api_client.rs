//! HTTP client for the SWIS JSON API.

use crate::core::{
    domain::{
        error::{OrionError, OrionResult},
        model::{
            client_config::ClientConfig,
            orion_connection::OrionConnection,
            swis::{QueryRequest, QueryResponse, SwisFault},
        },
    },
    infrastructure::swis_api::SwisApi,
};
use async_trait::async_trait;
use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

/// HTTP client bound to one Orion server.
///
/// Every request carries HTTP Basic credentials; SWIS has no session
/// handshake. The client is created once per invocation and passed to the
/// use cases that need it.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: OrionConnection,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `OrionError::Connection` if the HTTP client cannot be built.
    pub fn new(connection: OrionConnection, config: &ClientConfig) -> OrionResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accepts_invalid_certs())
            .timeout(config.request_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| OrionError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            connection,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &OrionConnection {
        &self.connection
    }

    /// Sends an authenticated JSON POST.
    async fn post_json<B>(&self, url: Url, body: &B) -> Result<Response, reqwest::Error>
    where
        B: Serialize + ?Sized,
    {
        self.http_client
            .post(url)
            .basic_auth(
                self.connection.orion_username().as_str(),
                Some(self.connection.orion_password().as_str()),
            )
            .json(body)
            .send()
            .await
    }
}

/// Reads a failed response into a short message and optional detail.
async fn describe_failure(response: Response) -> (StatusCode, String, Option<String>) {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown".to_string());
    match SwisFault::parse(&body) {
        Some(fault) => {
            let detail = fault.detail();
            (status, fault.message.unwrap_or_default(), detail)
        }
        None if body.trim().is_empty() => (status, status.to_string(), None),
        None => (status, body.trim().to_string(), None),
    }
}

#[async_trait]
impl SwisApi for ApiClient {
    async fn query(&self, query: &str, parameters: Map<String, Value>) -> OrionResult<Vec<Value>> {
        debug!(query, ?parameters, "SWIS query");
        let request = QueryRequest {
            query,
            parameters: &parameters,
        };

        let url = self.connection.orion_url().join("Query")?;
        let response = self
            .post_json(url, &request)
            .await
            .map_err(|e| OrionError::Connection(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let (status, message, _) = describe_failure(response).await;
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OrionError::Authentication(
                    format!("SWIS rejected the credentials ({}): {}", status, message),
                ),
                _ => OrionError::Connection(format!("API error ({}): {}", status, message)),
            });
        }

        let body = response
            .json::<QueryResponse>()
            .await
            .map_err(|e| OrionError::Connection(format!("Failed to parse response: {}", e)))?;
        debug!(rows = body.results.len(), "SWIS query returned");
        Ok(body.results)
    }

    async fn invoke(&self, entity: &str, verb: &str, args: Vec<Value>) -> OrionResult<Value> {
        debug!(entity, verb, ?args, "SWIS invoke");
        let url = self
            .connection
            .orion_url()
            .join(&format!("Invoke/{}/{}", entity, verb))?;

        let response = self
            .post_json(url, &args)
            .await
            .map_err(|e| OrionError::RemoteOperation {
                message: format!("{}.{} request failed: {}", entity, verb, e),
                detail: None,
            })?;

        if !response.status().is_success() {
            let (status, message, detail) = describe_failure(response).await;
            return Err(OrionError::RemoteOperation {
                message: format!("{}.{} failed ({}): {}", entity, verb, status, message),
                detail,
            });
        }

        // Void verbs answer with an empty body or a bare `null`.
        let text = response.text().await.map_err(|e| OrionError::RemoteOperation {
            message: format!("Failed to read {}.{} response: {}", entity, verb, e),
            detail: None,
        })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}
