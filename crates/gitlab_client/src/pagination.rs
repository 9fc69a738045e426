//! Offset pagination parameters shared by list endpoints.

use serde::Serialize;

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

/// Page selection for list endpoints.
///
/// Both fields are omitted from the query string when unset, in which case GitLab applies
/// its defaults (page 1, 20 items per page).
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListOptions {
    /// Selects a page with an explicit page size.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}
