// HTTP client for the Kusto REST query endpoint

use crate::client::headers::{baseline_headers, merge_headers, CLIENT_REQUEST_ID_HEADER};
use crate::client::QueryExecutor;
use crate::config::ClientConfig;
use crate::core::errors::ClientError;
use crate::core::models::{ErrorResponse, HeaderOverrides, RequestPayload, TableResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// Query client for Azure Data Explorer
///
/// Holds only the transport. Cloning is cheap and clones share the underlying
/// connection pool, so one instance can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct AdxClient {
    http_client: Client,
}

impl AdxClient {
    /// Wrap a caller-owned transport. Timeouts and connection policy are whatever
    /// the caller configured on `http_client`.
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Create a client with its own transport
    ///
    /// # Arguments
    /// * `request_timeout` - Deadline for the whole exchange, body included
    /// * `connect_timeout` - Deadline for establishing the connection
    pub fn with_timeouts(request_timeout: Duration, connect_timeout: Duration) -> Result<Self, ClientError> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ClientError::Configuration(format!(
                "Failed to create HTTP client: {}", e
            )))?;

        Ok(Self::new(http_client))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeouts(
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Send one query to `endpoint` and decode the result tables.
    ///
    /// Status 200 decodes as [`TableResponse`]; any other status decodes the
    /// service error envelope into [`ClientError::Service`].
    pub async fn kusto_request(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
        headers: Option<&HeaderOverrides>,
    ) -> Result<TableResponse, ClientError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ClientError::Serialization(format!("Failed to encode request payload: {}", e)))?;
        let request_headers = merge_headers(baseline_headers(), headers)?;

        let request_id = request_headers
            .get(CLIENT_REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        debug!(
            endpoint = %endpoint,
            database = %payload.db,
            query_source = %payload.query_source,
            request_id = %request_id,
            "Sending query request"
        );
        trace!(csl = %payload.csl, "Query text");

        let response = self
            .http_client
            .post(endpoint)
            .headers(request_headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, endpoint = %endpoint, request_id = %request_id, "Query request failed");
                map_transport_error(e)
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, endpoint = %endpoint, status = %status, "Failed to read response body");
            map_transport_error(e)
        })?;

        if status != StatusCode::OK {
            return Err(Self::service_error(status, &bytes, endpoint, &request_id));
        }

        let table: TableResponse = serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, endpoint = %endpoint, request_id = %request_id, "Failed to decode query response");
            ClientError::Decode(format!("Failed to decode query response: {}", e))
        })?;

        info!(
            endpoint = %endpoint,
            request_id = %request_id,
            tables = table.tables.len(),
            "Query completed"
        );
        Ok(table)
    }

    /// Build the error for a non-200 response from its error envelope
    fn service_error(status: StatusCode, body: &[u8], endpoint: &str, request_id: &str) -> ClientError {
        match serde_json::from_slice::<ErrorResponse>(body) {
            Ok(envelope) => {
                error!(
                    status = %status,
                    endpoint = %endpoint,
                    request_id = %request_id,
                    code = ?envelope.error.code,
                    message = %envelope.error.message,
                    "Service returned an error"
                );
                ClientError::Service {
                    status: status.as_u16(),
                    code: envelope.error.code,
                    message: envelope.error.message,
                }
            }
            Err(e) => {
                error!(error = %e, status = %status, endpoint = %endpoint, "Failed to decode error response");
                ClientError::Decode(format!(
                    "Failed to decode error response (HTTP {}): {}", status.as_u16(), e
                ))
            }
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout(e.to_string())
    } else if e.is_connect() {
        ClientError::Transport(format!("Connection failed: {}", e))
    } else {
        ClientError::Transport(format!("HTTP request failed: {}", e))
    }
}

#[async_trait]
impl QueryExecutor for AdxClient {
    async fn execute(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
        headers: Option<&HeaderOverrides>,
    ) -> Result<TableResponse, ClientError> {
        self.kusto_request(endpoint, payload, headers).await
    }
}
