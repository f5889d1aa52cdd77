//! Portal routes.
//!
//! The portal has three views. `/` is the dummy auth landing page, which
//! forwards to `/dashboard` once the form is submitted. `/dashboard` and
//! `/leaderboard` link to each other, and signing out returns to `/`.

pub mod auth;
pub mod dashboard;
pub mod leaderboard;

use axum::{
    Router,
    routing::{get, post},
};

use tower_cookies::CookieManagerLayer;

use crate::app::AppState;

pub const LANDING_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LEADERBOARD_PATH: &str = "/leaderboard";
pub const SIGN_OUT_PATH: &str = "/signout";

/// Builds the portal router.
pub fn router(state: AppState) -> Router {
    Router::<AppState>::new()
        .route(LANDING_PATH, get(auth::show).post(auth::submit))
        .route(SIGN_OUT_PATH, post(auth::sign_out))
        .route(DASHBOARD_PATH, get(dashboard::show))
        .route(LEADERBOARD_PATH, get(leaderboard::show))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
