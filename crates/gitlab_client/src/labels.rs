//! Label domain types.
//!
//! This module contains the label resource returned by GitLab and the option payloads
//! accepted by the label endpoints. Every option field is an `Option`: `None` is left out
//! of the request entirely while `Some` is always sent, including `Some(false)`, `Some(0)`
//! and `Some(String::new())`.

use serde::{Deserialize, Serialize};

use crate::{pagination::ListOptions, Error, ResourceId};

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

/// A project label.
///
/// Fields missing from the server response take their zero value; a JSON `null` for
/// `description` or `priority` maps to `None`.
///
/// # Examples
///
/// ```
/// use gitlab_client::Label;
///
/// let label: Label = serde_json::from_str(
///     r##"{"id":5,"name":"kind/bug","color":"#d9534f","priority":null}"##,
/// ).unwrap();
///
/// assert_eq!(label.id, 5);
/// assert_eq!(label.name, "kind/bug");
/// assert_eq!(label.priority, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: u64,
    pub name: String,

    /// Background color in `#RRGGBB` notation
    pub color: String,

    /// Foreground color chosen by GitLab to contrast with `color`
    pub text_color: String,

    pub description: Option<String>,
    pub open_issues_count: u64,
    pub closed_issues_count: u64,
    pub open_merge_requests_count: u64,

    /// Whether the authenticated user is subscribed to the label
    pub subscribed: bool,

    /// Ordering priority; `None` means the label is not prioritized
    pub priority: Option<i64>,

    /// `false` when the label is inherited from a group
    pub is_project_label: bool,
}

/// Query parameters for listing the labels of a project.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ListLabelsOptions {
    #[serde(flatten)]
    pub list_options: ListOptions,

    /// Include issue and merge request counts in the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_counts: Option<bool>,

    /// Include labels inherited from ancestor groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_ancestor_groups: Option<bool>,

    /// Keyword filter on the label name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of a create-label request.
///
/// GitLab requires `name` and `color`; they are still optional here so that the server
/// reports the validation error.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct CreateLabelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

/// Body of a delete-label request.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct DeleteLabelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of an update-label request.
///
/// Only the fields that are set are changed on the server.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct UpdateLabelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

pub(crate) fn labels_path(project: &ResourceId) -> Result<String, Error> {
    Ok(format!("projects/{}/labels", project.to_path_segment()?))
}

pub(crate) fn label_path(project: &ResourceId, label: &ResourceId) -> Result<String, Error> {
    Ok(format!(
        "{}/{}",
        labels_path(project)?,
        label.to_path_segment()?
    ))
}
