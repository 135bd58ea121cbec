//! Newsdesk REST API: the HTTP surface over the moderation core.
//!
//! Everything speaks the `{ success, message?, data? }` envelope; all
//! mutating routes require a bearer token issued by `/v1/auth/login`.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod users;

pub use routes::build_router;
