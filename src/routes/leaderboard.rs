//! Leaderboard routes.

use axum::extract::State;

use intern_portal_model::view::{LeaderboardView, ViewState};

use tracing::instrument;

use crate::{
    app::{AppJson, AppState},
    session::ViewerSession,
};

/// Shows the leaderboard, with the viewer folded in.
///
/// If the leaderboard can't be fetched, it stays loading.
#[instrument(skip(state))]
pub async fn show(
    session: ViewerSession,
    State(state): State<AppState>,
) -> AppJson<ViewState<LeaderboardView>> {
    match state.remote.fetch_leaderboard().await {
        Ok(participants) => {
            tracing::debug!(count = participants.len(), "fetched leaderboard");

            AppJson(ViewState::Ready(LeaderboardView::new(
                participants,
                session.identity(),
                &state.rules,
            )))
        }
        Err(err) => {
            tracing::error!(%err, "failed to fetch leaderboard");
            AppJson(ViewState::Loading)
        }
    }
}
