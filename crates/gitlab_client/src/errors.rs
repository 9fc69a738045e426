//! Error types for GitLab client operations.
//!
//! This module defines the error types that can occur when interacting with the GitLab API
//! through the gitlab_client crate. Errors that happen after the server answered carry the
//! [`Response`] metadata so callers can inspect the status and headers.

use http::{Method, StatusCode};

use crate::Response;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitLab client operations.
///
/// The variants fall into four groups: input validation ([`Error::InvalidId`]), which is
/// raised before any request is sent; transport failures ([`Error::Transport`]), where no
/// response exists; API failures ([`Error::Api`], [`Error::RateLimitExceeded`]), which carry
/// the response metadata; and decode failures ([`Error::Deserialization`]).
///
/// ## Examples
///
/// ```rust,ignore
/// use gitlab_client::{Error, LabelsClient};
///
/// match client.get_label("group/project".into(), 5u64.into()).await {
///     Ok((label, _)) => println!("Found label: {}", label.name),
///     Err(Error::Api { status, message, .. }) => eprintln!("GitLab said {status}: {message}"),
///     Err(Error::InvalidId(msg)) => eprintln!("Bad identifier: {msg}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The GitLab API answered with a non-success status code.
    ///
    /// The message is the one supplied by the server in the `message` or `error` field of
    /// the response body, or the raw body when neither field is present.
    #[error("{method} {url}: {status} {message}")]
    Api {
        method: Method,
        url: String,
        status: StatusCode,
        message: String,
        response: Box<Response>,
    },

    /// The private token could not be used to build the client.
    ///
    /// This happens when the token contains characters that are not valid in an HTTP
    /// header value.
    #[error("Failed to authenticate or initialize GitLab client: {0}")]
    AuthError(String),

    /// The client configuration is invalid or could not be loaded.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// Error deserializing the response from GitLab.
    ///
    /// This error occurs when the GitLab API returns a body that cannot be parsed into
    /// the expected data structure.
    #[error("Failed to deserialize GitLab response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A resource identifier could not be turned into a path segment.
    ///
    /// Raised before any network call is made.
    #[error("{0}")]
    InvalidId(String),

    /// GitLab API rate limit has been exceeded.
    ///
    /// `retry_after` holds the number of seconds from the `Retry-After` header when the
    /// server sent one.
    #[error("Rate limit exceeded")]
    RateLimitExceeded {
        retry_after: Option<u64>,
        response: Box<Response>,
    },

    /// The request never produced a response (connection refused, timeout, TLS failure).
    #[error("Failed to send request to GitLab: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Returns the response metadata attached to the error, if the server answered.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Api { response, .. } | Error::RateLimitExceeded { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Returns the HTTP status of the failed call, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns `true` when the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
