//! Internal utilities.
//!
//! Kept dependency-free so the record tables stay deterministic and cheap.

pub mod arena;

pub use arena::{Arena, ArenaIndex};
