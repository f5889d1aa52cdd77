//! Application interface and state.

pub mod error;

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

pub use error::AppError;

use axum::{
    Form, Json, RequestExt as _,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};

use cookie::Key;

use derive_more::Deref;

use garde::Validate;

use http::header;

use intern_portal_model::MergeRules;

use serde::de::DeserializeOwned;

use crate::{app::error::AppErrorKind, config::Config, remote::RemoteClient};

/// Shared app state.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Client for the remote data source.
    pub remote: RemoteClient,
    /// Rules for folding the viewer into remote data.
    pub rules: Arc<MergeRules>,
    /// Key the identity cookie is encrypted with.
    pub cookie_key: Key,
    /// Server config.
    ///
    /// May be missing secrets as they are taken at initialization.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the app state from a config and cookie key.
    pub fn new(config: Arc<Config>, cookie_key: Key) -> Result<AppState, anyhow::Error> {
        Ok(AppState {
            remote: RemoteClient::new(&config.remote)?,
            rules: Arc::new(config.identity.merge_rules()),
            cookie_key,
            config,
        })
    }
}

impl Debug for AppState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("remote", &self.remote)
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Selective, validated body extractor.
///
/// The portal accepts both JSON and urlencoded bodies, so the auth form can
/// be posted straight from a browser. Bodies are checked with [`garde`]
/// before they reach the handler.
#[derive(Deref)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Validate + 'static,
    <T as Validate>::Context: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // switch on content type, ignoring parameters like charset
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim())
            .ok_or(AppErrorKind::MissingContentType)?
            .to_ascii_lowercase();

        let payload = match content_type.as_str() {
            "application/x-www-form-urlencoded" => {
                let AppForm(form) = req.extract_with_state::<AppForm<T>, _, _>(state).await?;
                form
            }
            "application/json" => {
                let AppJson(json) = req.extract_with_state::<AppJson<T>, _, _>(state).await?;
                json
            }
            _ => return Err(AppErrorKind::UnsupportedContentType(content_type).into()),
        };

        payload.validate().map_err(AppErrorKind::Garde)?;

        Ok(Payload(payload))
    }
}

/// App Form extractor and responder.
#[derive(Deref, FromRequest)]
#[from_request(via(Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

impl<T> IntoResponse for AppForm<T>
where
    Form<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Form(self.0).into_response()
    }
}

/// App JSON extractor and responder.
#[derive(Deref, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}
