// Library root for the Azure Data Explorer query client

pub mod client;
pub mod config;
pub mod core;

pub use crate::client::{AdxClient, QueryExecutor};
pub use crate::core::errors::ClientError;
pub use crate::core::models::{HeaderOverrides, RequestPayload, TableResponse};
