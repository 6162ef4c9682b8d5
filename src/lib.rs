//! Simulation core of a top-down arcade space shooter.
//!
//! The crate is split the usual way: `entities` holds pure data, `compute`
//! the pure per-tick rules, and `session` owns one running game.  Rendering
//! and terminal handling live in the binary.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod session;
pub mod snapshot;
