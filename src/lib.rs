//! Fundraising intern portal backend.
//!
//! This serves the portal's dashboard and leaderboard views, built from a
//! remote data source and the viewer's chosen display name.

pub mod app;
pub mod cli;
pub mod config;
pub mod remote;
pub mod routes;
pub mod session;
