//! Input mapping: pressed keys and mouse deltas become camera actions.
//!
//! # Invariants
//! - Raw window events never reach the camera; the app translates them into
//!   `Action`s and local-space movement deltas here.
//! - Held movement keys combine into a single delta per frame.

pub mod action;

pub use action::{Action, BOOST_MULTIPLIER, MoveKey, local_delta};

pub fn crate_info() -> &'static str {
    "meshview-input v0.1.0"
}
