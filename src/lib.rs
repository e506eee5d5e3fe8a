//! Derived status for shared household bills.
//!
//! The core is [`engine::state::derive_status`]: a pure mapping from a snapshot of
//! participant tasks to the view-model a front-end draws.

pub mod engine;
