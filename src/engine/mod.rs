//! Core engine modules for bundle-status.

pub mod config;
pub mod error;
pub mod lenient;
pub mod participant;
pub mod render;
pub mod snapshot;
pub mod state;
pub mod types;
