//! Interface model for the kitgen service generator.
//!
//! This crate provides the immutable input model consumed by the generation
//! engine: method signatures with ordered, typed arguments and results, plus
//! the documentation tags attached to interfaces and methods.
//!
//! # Architecture
//!
//! ```text
//! front-end (parsing) → kitgen-ir (interface model) → codegen templates
//! ```
//!
//! The model is designed to be:
//! - Immutable once constructed by a front-end
//! - Target agnostic in shape, Go flavoured in vocabulary
//! - Self-contained (no knowledge of templates or output files)

mod interface;
mod tags;
mod types;

pub use interface::{Field, Interface, Signature};
pub use tags::{FORCE_TAG, MAIN_TAG, Tags};
pub use types::TypeExpr;
