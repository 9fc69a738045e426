//! Crate for interacting with the GitLab REST API.
//!
//! This crate provides a client for the GitLab v4 API authenticated with a private token,
//! along with typed request and response models for the project label endpoints.

use std::time::Duration;

use async_trait::async_trait;
use http::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Method, StatusCode,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod config;
pub use config::ClientConfig;

pub mod errors;
pub use errors::Error;

pub mod labels;
pub use labels::{
    CreateLabelOptions, DeleteLabelOptions, Label, ListLabelsOptions, UpdateLabelOptions,
};

pub mod pagination;
pub use pagination::ListOptions;

pub mod resource_id;
pub use resource_id::ResourceId;

pub mod response;
pub use response::Response;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "test_support.rs"]
mod test_support;

/// Header GitLab reads private, personal and project access tokens from
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

const API_VERSION_PATH: &str = "api/v4";

/// A client for interacting with the GitLab API.
///
/// Cloning the client is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitLabClient {
    /// Creates a new `GitLabClient` from the given configuration.
    ///
    /// The configured base URL is normalised so that it ends in `/api/v4/`. The token, when
    /// present, is sent with every request and is marked sensitive so it never shows up in
    /// debug output.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base URL cannot be parsed or the HTTP client cannot be
    /// built, and `Error::AuthError` if the token is not a valid header value.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gitlab_client::{ClientConfig, GitLabClient, LabelsClient, ListLabelsOptions};
    ///
    /// # async fn example() -> Result<(), gitlab_client::Error> {
    /// let config = ClientConfig::new("https://gitlab.example.com").with_token("glpat-xxxx");
    /// let client = GitLabClient::new(&config)?;
    ///
    /// let (labels, _) = client
    ///     .list_labels("my-group/my-project".into(), &ListLabelsOptions::default())
    ///     .await?;
    /// for label in labels {
    ///     println!("{} ({})", label.name, label.color);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base_url = api_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token.expose_secret()).map_err(|e| {
                error!(error = %e, "Private token cannot be used as a header value");
                Error::AuthError(format!("Invalid private token: {}", e))
            })?;
            value.set_sensitive(true);
            headers.insert(PRIVATE_TOKEN_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                Error::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        info!(api_url = %base_url, "Created GitLab client");

        Ok(Self { http, base_url })
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// The caller is responsible for authentication headers and timeouts.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: api_base_url(base_url)?,
        })
    }

    /// The API root every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidId(format!("Cannot build URL for path {}: {}", path, e)))
    }

    /// Executes a request and decodes the JSON body of the response into `T`.
    pub(crate) async fn send_json<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<(T, Response), Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let (bytes, response) = self.send(method, path, query, body).await?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            error!(
                status = %response.status,
                error = %e,
                "Failed to decode GitLab response body"
            );
            Error::Deserialization(e)
        })?;

        Ok((value, response))
    }

    /// Executes a request whose response body carries nothing of interest.
    pub(crate) async fn send_no_content<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response, Error>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let (_, response) = self.send(method, path, query, body).await?;
        Ok(response)
    }

    async fn send<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<(Vec<u8>, Response), Error>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;

        let mut request = self.http.request(method.clone(), url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(method = %method, path = path, "Sending GitLab API request");
        let http_response = request.send().await.map_err(|e| {
            error!(method = %method, path = path, error = %e, "GitLab API request failed");
            Error::Transport(e)
        })?;

        let url = http_response.url().to_string();
        let status = http_response.status();
        let headers = http_response.headers().clone();
        let bytes = http_response.bytes().await.map_err(|e| {
            error!(method = %method, url = url, error = %e, "Failed to read GitLab response body");
            Error::Transport(e)
        })?;

        let response = check_response(&method, &url, Response::new(status, headers), &bytes)?;
        debug!(method = %method, url = url, status = %response.status, "Received GitLab API response");

        Ok((bytes.to_vec(), response))
    }
}

/// Trait for project label operations.
///
/// Every method takes the project as a [`ResourceId`]: either its numeric ID or its
/// `namespace/path`. Labels are addressed by numeric ID or by name.
#[async_trait]
pub trait LabelsClient: Send + Sync {
    /// Lists the labels of a project.
    ///
    /// Pagination and filter options are sent as query parameters; the pagination state
    /// of the result is available on the returned [`Response`].
    ///
    /// # Errors
    /// Returns `Error::InvalidId` for an unusable project identifier, `Error::Api` for a
    /// non-success status and `Error::Deserialization` if the body is not a label array.
    async fn list_labels(
        &self,
        project: ResourceId,
        options: &ListLabelsOptions,
    ) -> Result<(Vec<Label>, Response), Error>;

    /// Fetches a single label.
    async fn get_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<(Label, Response), Error>;

    /// Creates a label in a project.
    ///
    /// # Errors
    /// Returns `Error::Api` if GitLab rejects the label, e.g. because the name is taken.
    async fn create_label(
        &self,
        project: ResourceId,
        options: &CreateLabelOptions,
    ) -> Result<(Label, Response), Error>;

    /// Deletes a label. The options, when given, are sent as the request body.
    async fn delete_label(
        &self,
        project: ResourceId,
        label: ResourceId,
        options: Option<&DeleteLabelOptions>,
    ) -> Result<Response, Error>;

    /// Updates a label.
    ///
    /// Only the fields set in `options` are sent, so unset fields keep their current value
    /// on the server.
    async fn update_label(
        &self,
        project: ResourceId,
        label: ResourceId,
        options: &UpdateLabelOptions,
    ) -> Result<(Label, Response), Error>;

    /// Subscribes the authenticated user to a label and returns the updated label.
    async fn subscribe_to_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<(Label, Response), Error>;

    /// Unsubscribes the authenticated user from a label.
    async fn unsubscribe_from_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<Response, Error>;

    /// Promotes a project label to a label of the parent group.
    async fn promote_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<Response, Error>;
}

#[async_trait]
impl LabelsClient for GitLabClient {
    #[instrument(skip(self, project, options), fields(project = %project))]
    async fn list_labels(
        &self,
        project: ResourceId,
        options: &ListLabelsOptions,
    ) -> Result<(Vec<Label>, Response), Error> {
        let path = labels::labels_path(&project)?;
        let (labels, response): (Vec<Label>, Response) = self
            .send_json(Method::GET, &path, Some(options), None::<&()>)
            .await?;

        info!(
            count = labels.len(),
            page = response.current_page,
            next_page = response.next_page,
            "Listed project labels"
        );
        Ok((labels, response))
    }

    #[instrument(skip(self, project, label), fields(project = %project, label = %label))]
    async fn get_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<(Label, Response), Error> {
        let path = labels::label_path(&project, &label)?;
        self.send_json(Method::GET, &path, None::<&()>, None::<&()>)
            .await
    }

    #[instrument(skip(self, project, options), fields(project = %project))]
    async fn create_label(
        &self,
        project: ResourceId,
        options: &CreateLabelOptions,
    ) -> Result<(Label, Response), Error> {
        let path = labels::labels_path(&project)?;
        let (label, response): (Label, Response) = self
            .send_json(Method::POST, &path, None::<&()>, Some(options))
            .await?;

        info!(label_id = label.id, label_name = %label.name, "Created label");
        Ok((label, response))
    }

    #[instrument(skip(self, project, label, options), fields(project = %project, label = %label))]
    async fn delete_label(
        &self,
        project: ResourceId,
        label: ResourceId,
        options: Option<&DeleteLabelOptions>,
    ) -> Result<Response, Error> {
        let path = labels::label_path(&project, &label)?;
        let response = self
            .send_no_content(Method::DELETE, &path, None::<&()>, options)
            .await?;

        info!("Deleted label");
        Ok(response)
    }

    #[instrument(skip(self, project, label, options), fields(project = %project, label = %label))]
    async fn update_label(
        &self,
        project: ResourceId,
        label: ResourceId,
        options: &UpdateLabelOptions,
    ) -> Result<(Label, Response), Error> {
        let path = labels::label_path(&project, &label)?;
        let (updated, response): (Label, Response) = self
            .send_json(Method::PUT, &path, None::<&()>, Some(options))
            .await?;

        info!(label_id = updated.id, label_name = %updated.name, "Updated label");
        Ok((updated, response))
    }

    #[instrument(skip(self, project, label), fields(project = %project, label = %label))]
    async fn subscribe_to_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<(Label, Response), Error> {
        let path = format!("{}/subscribe", labels::label_path(&project, &label)?);
        self.send_json(Method::POST, &path, None::<&()>, None::<&()>)
            .await
    }

    #[instrument(skip(self, project, label), fields(project = %project, label = %label))]
    async fn unsubscribe_from_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<Response, Error> {
        let path = format!("{}/unsubscribe", labels::label_path(&project, &label)?);
        self.send_no_content(Method::POST, &path, None::<&()>, None::<&()>)
            .await
    }

    #[instrument(skip(self, project, label), fields(project = %project, label = %label))]
    async fn promote_label(
        &self,
        project: ResourceId,
        label: ResourceId,
    ) -> Result<Response, Error> {
        let path = format!("{}/promote", labels::label_path(&project, &label)?);
        let response = self
            .send_no_content(Method::PUT, &path, None::<&()>, None::<&()>)
            .await?;

        info!("Promoted label to group label");
        Ok(response)
    }
}

/// Normalises a GitLab instance URL into the v4 API root, always ending in `/`.
fn api_base_url(base_url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url).map_err(|e| {
        Error::Config(format!("Invalid GitLab base URL {}: {}", base_url, e))
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!(
            "GitLab base URL {} cannot be used as a base",
            base_url
        )));
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    let path = if trimmed.ends_with(API_VERSION_PATH) {
        format!("{}/", trimmed)
    } else {
        format!("{}/{}/", trimmed, API_VERSION_PATH)
    };
    url.set_path(&path);

    Ok(url)
}

fn check_response(
    method: &Method,
    url: &str,
    response: Response,
    body: &[u8],
) -> Result<Response, Error> {
    if response.status.is_success() {
        return Ok(response);
    }

    if response.status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = crate::response::header_u64(&response.headers, "retry-after");
        warn!(method = %method, url = url, retry_after, "GitLab rate limit exceeded");
        return Err(Error::RateLimitExceeded {
            retry_after,
            response: Box::new(response),
        });
    }

    let message = parse_error_message(body);
    error!(
        method = %method,
        url = url,
        status = %response.status,
        error_message = message,
        "Received an error from GitLab"
    );

    Err(Error::Api {
        method: method.clone(),
        url: url.to_string(),
        status: response.status,
        message,
        response: Box::new(response),
    })
}

/// Extracts the human readable message from a GitLab error body.
///
/// GitLab reports errors as `{"message": ...}` where the message is a string, a list, or a
/// map of field names to lists of problems, and occasionally as `{"error": "..."}`.
fn parse_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => {
            if let Some(message) = fields.get("message") {
                flatten_message(message)
            } else if let Some(message) = fields.get("error") {
                flatten_message(message)
            } else {
                Value::Object(fields).to_string()
            }
        }
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}

fn flatten_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_message)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(fields) => fields
            .iter()
            .map(|(field, problems)| format!("{}: {}", field, flatten_message(problems)))
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
