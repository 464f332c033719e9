//! $BISOU frame server library - Farcaster Frame and browser app routes.
//!
//! Routes, state and configuration live here, separate from main.rs, so the
//! integration tests can build the router directly.

pub mod config;
pub mod error;
pub mod interaction_logger;
pub mod logging;
pub mod routes;
pub mod state;
pub mod token_image;
