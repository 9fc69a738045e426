use super::*;
use http::HeaderMap;
use std::error::Error as StdError;

fn response_with_status(status: StatusCode) -> Box<Response> {
    Box::new(Response::new(status, HeaderMap::new()))
}

#[test]
fn test_api_error() {
    let error = Error::Api {
        method: Method::DELETE,
        url: "https://gitlab.example.com/api/v4/projects/1/labels/9".to_string(),
        status: StatusCode::NOT_FOUND,
        message: "404 Label Not Found".to_string(),
        response: response_with_status(StatusCode::NOT_FOUND),
    };

    // Test error message
    assert_eq!(
        error.to_string(),
        "DELETE https://gitlab.example.com/api/v4/projects/1/labels/9: 404 Not Found 404 Label Not Found"
    );

    // Metadata is reachable from the error
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert!(error.is_not_found());
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("token is not a valid header value".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitLab client: token is not a valid header value"
    );
    assert!(error.response().is_none());
}

#[test]
fn test_config_error() {
    let error = Error::Config("relative URL without a base".to_string());

    assert_eq!(
        error.to_string(),
        "Invalid client configuration: relative URL without a base"
    );
}

#[test]
fn test_deserialization_error_has_source() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = Error::from(json_err);

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize GitLab response:"));
    assert!(error.source().is_some());
    assert!(error.status().is_none());
}

#[test]
fn test_invalid_id_error() {
    let error = Error::InvalidId(
        "invalid ID type 1.1, the ID must be an int or a string".to_string(),
    );

    assert_eq!(
        error.to_string(),
        "invalid ID type 1.1, the ID must be an int or a string"
    );
    assert!(error.response().is_none());
    assert!(!error.is_not_found());
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded {
        retry_after: Some(60),
        response: response_with_status(StatusCode::TOO_MANY_REQUESTS),
    };

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert_eq!(error.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    assert!(error.source().is_none());
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
