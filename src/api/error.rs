//! API Error Types
//!
//! Defines error types for the HTTP layer and their conversion to
//! responses. JSON routes answer with an [`ErrorResponse`] body; HTML routes
//! wrap the error in a [`PageError`] and get an error page inside the usual
//! chrome.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::api::session::Session;
use crate::data::DataError;
use crate::nav::{NavError, RenderContext};
use crate::render::{render_page, PageBody};
use crate::view::ViewError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid navigation or settings value
    #[error("Invalid navigation: {0}")]
    Nav(#[from] NavError),

    /// View could not be built
    #[error("{0}")]
    View(#[from] ViewError),

    /// CSV parsing or sample generation failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Nav(_) => (StatusCode::BAD_REQUEST, "INVALID_NAVIGATION"),
            ApiError::View(ViewError::Upload(e)) | ApiError::Data(e) => data_status(e),
            ApiError::View(ViewError::MissingSampleData(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "VIEW_ERROR")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// Short heading for the HTML error page
    fn title(&self) -> &'static str {
        match self {
            ApiError::View(ViewError::Upload(_)) => "Could not read the uploaded file",
            ApiError::Data(_) => "Could not read the data",
            ApiError::Nav(_) | ApiError::Validation(_) => "Invalid request",
            ApiError::NotFound(_) => "Page not found",
            _ => "Something went wrong",
        }
    }

    /// Log the error and return a fresh request id
    fn log(&self, code: &str) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        request_id
    }
}

fn data_status(error: &DataError) -> (StatusCode, &'static str) {
    match error {
        DataError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        DataError::InvalidYear(_) => (StatusCode::BAD_REQUEST, "INVALID_YEAR"),
        _ => (StatusCode::BAD_REQUEST, "PARSE_ERROR"),
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = self.log(code);

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// An error raised by an HTML route, rendered inside the page chrome
#[derive(Debug)]
pub struct PageError {
    pub ctx: RenderContext,
    pub error: ApiError,
    /// Session whose cookie still has to reach the browser
    pub session: Option<Session>,
}

impl PageError {
    pub fn new(ctx: RenderContext, error: impl Into<ApiError>) -> Self {
        Self {
            ctx,
            error: error.into(),
            session: None,
        }
    }

    /// Issue the session cookie with the error page as well
    pub fn with_session(mut self, session: &Session) -> Self {
        self.session = Some(session.clone());
        self
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, code) = self.error.status_and_code();
        let request_id = self.error.log(code);

        let message = format!("{}\n\nRequest id: {}", self.error, request_id);
        let html = render_page(
            &self.ctx,
            PageBody::Error {
                title: self.error.title(),
                message: &message,
            },
        );

        let mut response = (status, Html(html)).into_response();
        if let Some(session) = &self.session {
            session.attach(&mut response);
        }
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for HTML page routes
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::SESSION_COOKIE;
    use crate::nav::{NavigationState, Page};
    use axum::http::header;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("x".into()).status_and_code().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_and_code().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ViewError::Upload(DataError::Empty)).status_and_code(),
            (StatusCode::BAD_REQUEST, "PARSE_ERROR")
        );
        assert_eq!(
            ApiError::from(ViewError::MissingSampleData(Page::DataViz))
                .status_and_code()
                .0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_page_error_issues_new_session_cookie() {
        let ctx = RenderContext::new(NavigationState::default());
        let session = Session::from_headers(&Default::default());
        let response = PageError::new(ctx.clone(), ApiError::Validation("bad".into()))
            .with_session(&session)
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap();
        assert!(cookie.starts_with(&format!("{}={}", SESSION_COOKIE, session.id)));

        let plain = PageError::new(ctx, ApiError::Validation("bad".into())).into_response();
        assert!(plain.headers().get(header::SET_COOKIE).is_none());
    }
}
