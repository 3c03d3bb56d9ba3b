//! Client library for the MovieRama movie rating service.
//!
//! Keeps a local, view-facing copy of server state consistent across
//! paginated fetches, vote toggles and session transitions.

pub mod api;
pub mod config;
pub mod logging;
pub mod movies;
pub mod session;
pub mod ui;
pub mod votes;
