//! Viewer sessions.

use axum::{
    RequestPartsExt as _,
    extract::{FromRef, FromRequestParts},
};

use cookie::{Cookie, Key, SameSite};

use derive_more::Deref;

use intern_portal_model::ViewerIdentity;

use tower_cookies::Cookies;

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use http::request::Parts;

use crate::app::{AppError, AppState, error::AppErrorKind};

/// The viewer's session, used to keep their display name.
///
/// The display name lives in a private cookie with no expiry, so it lasts as
/// long as the browsing session does.
///
/// **Warning!** This is not authentication. Anybody can claim any name!
#[derive(Clone, Deref)]
pub struct ViewerSession {
    // too cute of a name
    cookie_jar: Cookies,
    key: Key,
    cookie_name: Arc<str>,
    secure: bool,
    #[deref]
    identity: ViewerIdentity,
}

impl ViewerSession {
    /// The identity of the viewer.
    pub fn identity(&self) -> &ViewerIdentity {
        &self.identity
    }

    /// Stores a display name for the viewer.
    ///
    /// Blank names are ignored.
    pub fn sign_up(&mut self, display_name: &str) {
        let identity = ViewerIdentity::new(display_name);

        if let Some(display_name) = identity.display_name() {
            let cookie = self.build_cookie(display_name.to_owned());
            self.cookie_jar.private(&self.key).add(cookie);

            tracing::debug!(%display_name, "stored viewer display name");
            self.identity = identity;
        }
    }

    /// Forgets the viewer's display name.
    pub fn sign_out(&mut self) {
        let cookie = self.build_cookie(String::new());
        self.cookie_jar.private(&self.key).remove(cookie);

        self.identity = ViewerIdentity::anonymous();
    }

    fn build_cookie(&self, value: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.cookie_name.to_string(), value);
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_secure(self.secure);
        cookie.set_path("/");
        cookie
    }
}

impl Debug for ViewerSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerSession")
            .field("cookie_name", &self.cookie_name)
            .field("identity", &self.identity)
            .finish()
    }
}

impl<S> FromRequestParts<S> for ViewerSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookie_jar = parts
            .extract::<Cookies>()
            .await
            .map_err(|(_, msg)| AppErrorKind::CookieFetch(msg))?;

        let state = AppState::from_ref(state);
        let cookie_name = state.config.server.cookie_name.as_str();

        // cookies that fail to decrypt are treated as missing
        let identity = cookie_jar
            .private(&state.cookie_key)
            .get(cookie_name)
            .map(|cookie| ViewerIdentity::new(cookie.value()))
            .unwrap_or_default();

        Ok(ViewerSession {
            cookie_jar,
            key: state.cookie_key.clone(),
            cookie_name: Arc::from(cookie_name),
            secure: state.config.server.secure_cookies,
            identity,
        })
    }
}
