//! Request bodies.

pub mod auth;
