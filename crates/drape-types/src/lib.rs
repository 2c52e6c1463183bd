//! # drape-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the drape cloth simulator.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other drape crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{DrapeError, DrapeResult};
pub use ids::GridCoord;
