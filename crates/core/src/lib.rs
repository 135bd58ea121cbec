//! Newsdesk core: the content moderation domain.
//!
//! Articles and web stories share one lifecycle (draft, pending,
//! approved, rejected), encoded as a pure transition table in
//! [`content::status`]. The collection lives in an explicit, injected
//! [`store::ContentStore`] mutated only through reducers, and the
//! [`engine::ModerationEngine`] ties validation, the collaborator
//! boundary, and the local commit together for dashboard clients.

pub mod content;
pub mod engine;
pub mod envelope;
pub mod events;
pub mod store;
