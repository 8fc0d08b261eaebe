//! Core utilities and types for the kitgen service generator.
//!
//! This crate provides the error taxonomy, the write strategies that persist
//! rendered artifacts, and the naming helpers shared by every template.

mod error;
mod strategy;
mod utils;

// Errors
pub use error::{Error, Result};
// File operations
pub use strategy::{MemoryBuffer, Sink, StrategyInput, WriteOutcome, WriteStrategy};
// String utilities
pub use utils::{
    last_upper_or_first, to_lower, to_lower_first, to_pascal_case, to_snake_case, to_upper_first,
};
