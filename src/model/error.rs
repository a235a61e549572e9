//! Error types for the asset store, session persistence and form validation

use thiserror::Error;

/// Errors returned by the asset store client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    /// Non-success HTTP status. `message` is the store's own message when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("unexpected response from asset store: {0}")]
    Decode(String),

    #[error("not logged in")]
    NotAuthenticated,
}

impl ApiError {
    pub fn status(status: u16, store_message: Option<String>) -> Self {
        let message = store_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        ApiError::Status { status, message }
    }
}

/// Client-side validation failures. Nothing is sent to the store when one of these is raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("year must be a number")]
    InvalidYear,
}

/// Failure of a form submission: either rejected locally or by the store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("credentials file error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_store_message() {
        let err = ApiError::status(404, Some("asset not found".to_string()));
        assert_eq!(err.to_string(), "asset not found");
    }

    #[test]
    fn status_error_falls_back_to_generic_message() {
        assert_eq!(
            ApiError::status(500, None).to_string(),
            "request failed with status 500"
        );
        assert_eq!(
            ApiError::status(502, Some("   ".to_string())).to_string(),
            "request failed with status 502"
        );
    }

    #[test]
    fn validation_error_names_the_field() {
        assert_eq!(ValidationError::Required("Name").to_string(), "Name is required");
    }
}
