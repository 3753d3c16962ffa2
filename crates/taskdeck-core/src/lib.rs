//! # taskdeck-core
//!
//! Foundation types for the taskdeck command palette.
//!
//! This crate provides the shared vocabulary the other taskdeck crates
//! depend on:
//!
//! - **Branded IDs**: [`TaskId`] as a newtype for type safety
//! - **Records**: the [`Task`] definition plus create/update parameter structs
//! - **Errors**: the [`DeckError`] hierarchy via `thiserror`
//! - **Constants**: package metadata and tuning defaults

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod ids;
pub mod task;

pub use errors::{DeckError, Result};
pub use ids::TaskId;
pub use task::{Task, TaskCreateParams, TaskUpdateParams};
