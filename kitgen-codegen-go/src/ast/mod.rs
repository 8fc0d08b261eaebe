//! Builders for the Go declarations the templates emit.

mod funcs;
mod structs;

pub use funcs::Func;
pub use structs::{Field, Struct};
