//! Application error that may occur during the processing of a request.
//!
//! See [`AppError`].

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use axum::{
    extract::rejection::{FormRejection, JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};

use derive_more::{Display, From};

use http::StatusCode;

use intern_portal_model::ApiError;

use crate::app::AppJson;

/// Application error that may occur during the processing of a request.
///
/// This includes both internal errors and user errors.
#[derive(Debug)]
pub struct AppError {
    kind: AppErrorKind,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            AppErrorKind::Json(err) => Some(err),
            AppErrorKind::Form(err) => Some(err),
            AppErrorKind::Query(err) => Some(err),
            AppErrorKind::Garde(err) => Some(err),
            AppErrorKind::MissingContentType
            | AppErrorKind::UnsupportedContentType(_)
            | AppErrorKind::CookieFetch(_) => None,
        }
    }
}

impl<T> From<T> for AppError
where
    T: Into<AppErrorKind>,
{
    fn from(value: T) -> Self {
        AppError { kind: value.into() }
    }
}

/// The specific kind of error that happened.
#[derive(Debug, Display, From)]
#[non_exhaustive]
pub enum AppErrorKind {
    /// The request's JSON payload was malformed or invalid.
    #[display("{_0}")]
    Json(JsonRejection),
    /// The request's urlencoded payload was malformed or invalid.
    #[display("{_0}")]
    Form(FormRejection),
    /// The request's query string was malformed.
    #[display("{_0}")]
    Query(QueryRejection),
    /// The request's payload failed validation.
    #[display("{_0}")]
    Garde(garde::Report),
    /// A request with a body was sent without a content type.
    #[display("missing content type")]
    #[from(ignore)]
    MissingContentType,
    /// A request with a body was sent with a content type that is not
    /// understood.
    #[display("unsupported content type: {_0}")]
    #[from(ignore)]
    UnsupportedContentType(String),
    /// The cookie manager layer is missing.
    #[display("failed to fetch cookies: {_0}")]
    #[from(ignore)]
    CookieFetch(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut internal_error = None;

        let (status, error) = match self.kind {
            AppErrorKind::Json(error) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(error.body_text()),
            ),
            AppErrorKind::Form(error) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(error.body_text()),
            ),
            AppErrorKind::Query(error) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(error.body_text()),
            ),
            AppErrorKind::Garde(report) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(report.to_string()),
            ),
            AppErrorKind::MissingContentType => (
                StatusCode::BAD_REQUEST,
                ApiError::new("Missing content type."),
            ),
            AppErrorKind::UnsupportedContentType(mime) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ApiError::new(format!("Unsupported content type \"{mime}\".")),
            ),
            // fallthrough for internal server errors not turned into user
            // errors here
            error => {
                internal_error = Some(error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("An internal server error occured."),
                )
            }
        };

        let mut response = (status, AppJson(error)).into_response();
        if let Some(error) = internal_error {
            response
                .extensions_mut()
                .insert(Arc::new(AppError::from(error)));
        }
        response
    }
}
