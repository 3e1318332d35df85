// Outgoing header construction

use crate::core::errors::ClientError;
use crate::core::models::HeaderOverrides;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use uuid::Uuid;

pub const APP_HEADER: &str = "x-ms-app";
pub const APP_NAME: &str = "Grafana-ADX";
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";
pub const USER_ID_HEADER: &str = "x-ms-user-id";

/// Headers present on every query request
pub fn baseline_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(APP_HEADER),
        HeaderValue::from_static(APP_NAME),
    );
    headers
}

/// Layer caller overrides on top of `baseline`.
///
/// Overrides are applied in key order and replace any existing header with the
/// same name (names are case-insensitive).
pub fn merge_headers(
    mut baseline: HeaderMap,
    overrides: Option<&HeaderOverrides>,
) -> Result<HeaderMap, ClientError> {
    let Some(overrides) = overrides else {
        return Ok(baseline);
    };

    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidHeader(format!("name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidHeader(format!("value for '{}': {}", name, e)))?;
        baseline.insert(header_name, header_value);
    }

    Ok(baseline)
}

/// Correlation id in the form `KGC.<source>;<uuid>`
pub fn client_request_id(query_source: &str) -> String {
    format!("KGC.{};{}", query_source, Uuid::new_v4())
}

/// Identification overrides for a request from `query_source`, optionally on
/// behalf of `user_login`
pub fn identification_headers(query_source: &str, user_login: Option<&str>) -> HeaderOverrides {
    let mut headers = HeaderOverrides::new();
    headers.insert(
        CLIENT_REQUEST_ID_HEADER.to_string(),
        client_request_id(query_source),
    );
    if let Some(user) = user_login.filter(|u| !u.is_empty()) {
        headers.insert(USER_ID_HEADER.to_string(), user.to_string());
    }
    headers
}
