//! # taskdeck-tui
//!
//! The interactive fuzzy picker: a filter input, a ranked result list,
//! a preview pane for the selected task, and a recommendation line for
//! the current directory. The picker only *selects* a task; execution
//! happens in the CLI layer after the terminal is restored.

#![deny(unsafe_code)]

mod app;
mod ui;

pub use app::pick;
