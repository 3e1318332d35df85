// Query client layer

pub mod adx;
pub mod headers;

pub use adx::AdxClient;

use crate::core::errors::ClientError;
use crate::core::models::{HeaderOverrides, RequestPayload, TableResponse};

/// Executes a single query request against a data-exploration endpoint
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(
        &self,
        endpoint: &str,
        payload: &RequestPayload,
        headers: Option<&HeaderOverrides>,
    ) -> Result<TableResponse, ClientError>;
}
