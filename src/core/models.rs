//! Wire models for the Kusto REST query API.
//!
//! Request payloads are serialized exactly as the service expects them. Response
//! shapes decode only the fields the client needs; anything else the service sends
//! is ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra headers layered over the client's baseline headers, applied in key order
pub type HeaderOverrides = BTreeMap<String, String>;

/// Body of a single query request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    /// Target database
    pub db: String,
    /// Query-language statement
    pub csl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ClientRequestProperties>,
    /// Provenance tag, e.g. "schema" or "query"
    pub query_source: String,
}

impl RequestPayload {
    pub fn new(db: impl Into<String>, csl: impl Into<String>, query_source: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            csl: csl.into(),
            properties: None,
            query_source: query_source.into(),
        }
    }

    pub fn with_properties(mut self, properties: ClientRequestProperties) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// Client request properties forwarded to the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRequestProperties {
    #[serde(rename = "Options", default)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl ClientRequestProperties {
    /// Properties carrying a `servertimeout` option (timespan such as "00:04:00")
    pub fn with_server_timeout(timeout: impl Into<String>) -> Self {
        let mut options = BTreeMap::new();
        options.insert(
            "servertimeout".to_string(),
            serde_json::Value::String(timeout.into()),
        );
        Self { options }
    }
}

/// Successful query response: one or more result tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResponse {
    #[serde(rename = "Tables")]
    pub tables: Vec<Table>,
}

impl TableResponse {
    /// First table of the response, which holds the primary result in v1 responses
    pub fn primary_table(&self) -> Option<&Table> {
        self.tables.first()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "TableName")]
    pub table_name: String,
    #[serde(rename = "Columns")]
    pub columns: Vec<Column>,
    #[serde(rename = "Rows", default)]
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.column_name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of a named column across all rows; missing cells are `Null`
    pub fn column_values(&self, name: &str) -> Option<Vec<&serde_json::Value>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&serde_json::Value::Null))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "ColumnName")]
    pub column_name: String,
    #[serde(rename = "DataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(rename = "ColumnType", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

/// Error envelope returned with non-200 statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Short form of `message`, without the request-level prefix
    #[serde(rename = "@message", default, skip_serializing_if = "Option::is_none")]
    pub short_message: Option<String>,
    #[serde(rename = "@permanent", default, skip_serializing_if = "Option::is_none")]
    pub permanent: Option<bool>,
}
