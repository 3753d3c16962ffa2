//! # taskdeck-engine
//!
//! The selection engine for the taskdeck command palette:
//!
//! - [`resolver`]: maps a user-supplied reference (id or name) to exactly
//!   one task, or reports ambiguity/absence
//! - [`ranker`]: scores and orders tasks against a free-text query,
//!   falling back to recency ordering for empty queries
//! - [`TaskService`]: the facade composing the store with both, exposing
//!   the CRUD + query API the CLI and picker consume

#![deny(unsafe_code)]

pub mod ranker;
pub mod resolver;
pub mod service;

pub use service::TaskService;
