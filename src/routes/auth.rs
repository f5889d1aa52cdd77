//! Dummy authentication routes.

use axum::{
    extract::{Query, rejection::QueryRejection},
    response::Redirect,
};

use intern_portal_model::{
    request::auth::{AuthQuery, AuthRequest},
    view::AuthView,
};

use tracing::instrument;

use crate::{
    app::{AppError, AppJson, Payload},
    routes::{DASHBOARD_PATH, LANDING_PATH},
    session::ViewerSession,
};

/// Shows the auth landing view.
#[instrument]
pub async fn show(
    session: ViewerSession,
    query: Result<Query<AuthQuery>, QueryRejection>,
) -> Result<AppJson<AuthView>, AppError> {
    let Query(query) = query?;

    Ok(AppJson(AuthView::new(query.mode, session.identity())))
}

/// Submits the auth form.
///
/// Nothing is checked beyond the name length. Signups store the chosen
/// display name, then everyone is sent on to the dashboard.
#[instrument(skip(request))]
pub async fn submit(
    mut session: ViewerSession,
    Payload(request): Payload<AuthRequest>,
) -> Redirect {
    if let Some(display_name) = request.display_name() {
        session.sign_up(display_name);
    }

    Redirect::to(DASHBOARD_PATH)
}

/// Forgets the viewer's display name and returns to the landing page.
#[instrument]
pub async fn sign_out(mut session: ViewerSession) -> Redirect {
    session.sign_out();
    Redirect::to(LANDING_PATH)
}
