//! Identifiers used to address GitLab resources in URL paths.
//!
//! GitLab accepts either the numeric ID of a resource or its textual form (a project's
//! `namespace/path`, a label's name) in the same path position. [`ResourceId`] models the
//! two shapes and is responsible for turning them into a safe path segment.

use std::fmt;

use serde_json::Value;

use crate::Error;

#[cfg(test)]
#[path = "resource_id_tests.rs"]
mod tests;

/// A numeric or textual identifier of a GitLab resource.
///
/// # Examples
///
/// ```rust
/// use gitlab_client::ResourceId;
///
/// let by_id = ResourceId::from(42u64);
/// let by_path = ResourceId::from("my-group/my-project");
///
/// assert_eq!(by_id.to_path_segment().unwrap(), "42");
/// assert_eq!(by_path.to_path_segment().unwrap(), "my-group%2Fmy-project");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// Numeric ID assigned by GitLab
    Id(u64),

    /// Path or name, escaped before being placed in a URL
    Path(String),
}

impl ResourceId {
    /// Converts the identifier into a URL path segment.
    ///
    /// Numeric IDs render as decimal. Strings are percent-escaped, including `/`, so that a
    /// project path or a label name with special characters stays a single segment.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidId` if the identifier is an empty string, `.` or `..`.
    pub fn to_path_segment(&self) -> Result<String, Error> {
        match self {
            ResourceId::Id(id) => Ok(id.to_string()),
            ResourceId::Path(path) if path.is_empty() => Err(Error::InvalidId(
                "invalid ID, the ID must not be an empty string".to_string(),
            )),
            // URL resolution would treat these as directory steps
            ResourceId::Path(path) if path == "." || path == ".." => Err(Error::InvalidId(
                format!("invalid ID {path:?}, the ID must not be a relative path segment"),
            )),
            ResourceId::Path(path) => Ok(urlencoding::encode(path).into_owned()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Id(id) => write!(f, "{id}"),
            ResourceId::Path(path) => f.write_str(path),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        ResourceId::Id(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Path(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        ResourceId::Path(value)
    }
}

impl From<&String> for ResourceId {
    fn from(value: &String) -> Self {
        ResourceId::Path(value.clone())
    }
}

impl TryFrom<i64> for ResourceId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(ResourceId::Id)
            .map_err(|_| Error::InvalidId(format!("invalid ID {value}, the ID must not be negative")))
    }
}

impl TryFrom<&Value> for ResourceId {
    type Error = Error;

    /// Accepts JSON integers and strings; any other shape is rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(ResourceId::Path(s.clone())),
            Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                (Some(id), _) => Ok(ResourceId::Id(id)),
                (None, Some(id)) => ResourceId::try_from(id),
                _ => Err(invalid_type(value)),
            },
            _ => Err(invalid_type(value)),
        }
    }
}

impl TryFrom<Value> for ResourceId {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ResourceId::try_from(&value)
    }
}

fn invalid_type(value: &Value) -> Error {
    Error::InvalidId(format!(
        "invalid ID type {value}, the ID must be an int or a string"
    ))
}
