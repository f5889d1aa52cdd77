//! Dashboard routes.

use axum::extract::State;

use intern_portal_model::view::{DashboardView, ViewState};

use tracing::instrument;

use crate::{
    app::{AppJson, AppState},
    session::ViewerSession,
};

/// Shows the viewer's dashboard.
///
/// If the user summary can't be fetched, the dashboard stays loading.
#[instrument(skip(state))]
pub async fn show(
    session: ViewerSession,
    State(state): State<AppState>,
) -> AppJson<ViewState<DashboardView>> {
    match state.remote.fetch_user_summary().await {
        Ok(summary) => AppJson(ViewState::Ready(DashboardView::new(
            summary,
            session.identity(),
            &state.config.identity.referral_suffix,
        ))),
        Err(err) => {
            tracing::error!(%err, "failed to fetch user summary");
            AppJson(ViewState::Loading)
        }
    }
}
