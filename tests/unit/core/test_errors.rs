// Unit tests for client error classification

use adx_client::ClientError;

#[test]
fn test_service_error_keeps_message_verbatim() {
    let message = "Request is invalid and cannot be processed: Semantic error: 'Perf' could not be resolved";
    let err = ClientError::Service {
        status: 400,
        code: Some("General_BadRequest".to_string()),
        message: message.to_string(),
    };

    assert!(err.is_service());
    assert!(!err.is_transport());
    assert!(err.to_string().contains(message));
    assert_eq!(err.service_message(), Some(message));
}

#[test]
fn test_kinds_are_distinguishable() {
    let errors = [
        ClientError::Transport("Connection failed".to_string()),
        ClientError::Timeout("operation timed out".to_string()),
        ClientError::Decode("expected value at line 1 column 1".to_string()),
        ClientError::Service { status: 500, code: None, message: "boom".to_string() },
    ];

    let prefixes: Vec<String> = errors
        .iter()
        .map(|e| e.to_string().split(':').next().unwrap().to_string())
        .collect();
    assert_eq!(prefixes, vec!["Transport error", "Request timeout", "Decode error", "HTTP error"]);
}

#[test]
fn test_non_service_errors_have_no_status() {
    assert_eq!(ClientError::Decode("x".to_string()).status_code(), None);
    assert_eq!(ClientError::InvalidHeader("x".to_string()).status_code(), None);
}
