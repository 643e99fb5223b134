//! Error taxonomy of the API boundary.

use thiserror::Error;

/// Low-level HTTP failure.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl HttpError {
    /// Returns the HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Transport(err) => err.status().map(|status| status.as_u16()),
            HttpError::Status { status, .. } => Some(*status),
        }
    }
}

/// What went wrong, from the session's point of view.
///
/// One variant per class of user-visible failure; the HTTP cause rides
/// along for logs. None of these are fatal — the session surfaces the
/// message and stays usable.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The product catalog could not be fetched. Dependents treat the
    /// catalog as empty and every lookup as not-found.
    #[error("Product catalog unavailable: {0}")]
    CatalogUnavailable(#[source] HttpError),

    /// Reading orders failed. Shown as an inline error state.
    #[error("Fetching orders failed: {0}")]
    FetchFailed(#[source] HttpError),

    /// Create/update failed. The draft is kept intact for retry.
    #[error("Order submission failed: {0}")]
    SubmissionFailed(#[source] HttpError),

    /// Delete failed. The list is unchanged.
    #[error("Order deletion failed: {0}")]
    DeletionFailed(#[source] HttpError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_code() {
        let err = HttpError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Backend returned 503: unavailable");
    }

    #[test]
    fn api_error_messages_name_the_operation() {
        let err = ApiError::SubmissionFailed(HttpError::Status {
            status: 400,
            body: "bad payload".to_string(),
        });
        assert!(err.to_string().starts_with("Order submission failed"));

        let err = ApiError::CatalogUnavailable(HttpError::Status {
            status: 500,
            body: String::new(),
        });
        assert!(err.to_string().starts_with("Product catalog unavailable"));
    }

    #[test]
    fn api_error_exposes_http_source() {
        use std::error::Error;

        let err = ApiError::DeletionFailed(HttpError::Status {
            status: 404,
            body: "no such order".to_string(),
        });
        let source = err.source().unwrap();
        assert!(source.to_string().contains("404"));
    }
}
