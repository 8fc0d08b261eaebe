//! Code building blocks shared by the templates.
//!
//! Templates describe declarations as [`CodeFragment`]s (directly or through
//! [`Renderable`] nodes); a [`CodeBuilder`] lays them out with Go indentation.

mod code_builder;
mod renderable;

pub use code_builder::CodeBuilder;
pub use renderable::{CodeFragment, Renderable};
