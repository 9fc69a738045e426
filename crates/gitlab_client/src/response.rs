//! Response metadata returned alongside every decoded result.

use http::{HeaderMap, StatusCode};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Metadata of a completed GitLab API call.
///
/// GitLab reports offset pagination state in response headers. They are parsed once here so
/// callers can drive their own pagination without touching the raw header map.
///
/// # Examples
///
/// ```rust,ignore
/// let (labels, response) = client.list_labels("1".into(), &options).await?;
/// if let Some(next) = response.next_page {
///     println!("{} labels on this page, next page is {}", labels.len(), next);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code of the response
    pub status: StatusCode,

    /// Raw response headers
    pub headers: HeaderMap,

    /// Total number of items (`X-Total`)
    pub total_items: Option<u64>,

    /// Total number of pages (`X-Total-Pages`)
    pub total_pages: Option<u64>,

    /// Number of items per page (`X-Per-Page`)
    pub items_per_page: Option<u64>,

    /// Index of the current page, starting at 1 (`X-Page`)
    pub current_page: Option<u64>,

    /// Index of the next page (`X-Next-Page`)
    pub next_page: Option<u64>,

    /// Index of the previous page (`X-Prev-Page`)
    pub previous_page: Option<u64>,
}

impl Response {
    /// Builds the metadata from a status code and header map.
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            status,
            total_items: header_u64(&headers, "x-total"),
            total_pages: header_u64(&headers, "x-total-pages"),
            items_per_page: header_u64(&headers, "x-per-page"),
            current_page: header_u64(&headers, "x-page"),
            next_page: header_u64(&headers, "x-next-page"),
            previous_page: header_u64(&headers, "x-prev-page"),
            headers,
        }
    }
}

// GitLab sends empty strings for X-Next-Page / X-Prev-Page on the last / first page.
pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
