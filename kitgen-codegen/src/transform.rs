//! Signature transform rules.
//!
//! Go service methods conventionally take a `context.Context` first and
//! return an `error` last. Generated exchange types and transport adapters
//! carry neither, so templates strip them with these rules.
//!
//! Only position 0 (context) and position N-1 (error) are inspected. A
//! context or error elsewhere in a list is passed through untouched.

use kitgen_ir::{Field, Signature};

/// Import path of the distinguished context package.
pub const CONTEXT_PACKAGE: &str = "context";

/// Identifier used for the error value when a method does not name it.
pub const DEFAULT_ERROR_NAME: &str = "err";

/// Check if the first argument is a `context.Context`.
pub fn is_context_first(args: &[Field]) -> bool {
    args.first()
        .is_some_and(|f| f.ty.is_named(Some(CONTEXT_PACKAGE), "Context"))
}

/// Check if the last result is the built-in `error`.
pub fn is_error_last(results: &[Field]) -> bool {
    results.last().is_some_and(|f| f.ty.is_named(None, "error"))
}

/// Drop the leading `context.Context` argument, if present.
pub fn strip_leading_context(args: &[Field]) -> &[Field] {
    if is_context_first(args) {
        &args[1..]
    } else {
        args
    }
}

/// Drop the trailing `error` result, if present.
pub fn strip_trailing_error(results: &[Field]) -> &[Field] {
    if is_error_last(results) {
        &results[..results.len() - 1]
    } else {
        results
    }
}

/// Name of the trailing error result, or [`DEFAULT_ERROR_NAME`] when the
/// method has none or leaves it anonymous.
pub fn last_result_error_name(signature: &Signature) -> &str {
    match signature.results.last() {
        Some(field) if is_error_last(&signature.results) && !field.is_anonymous() => &field.name,
        _ => DEFAULT_ERROR_NAME,
    }
}
