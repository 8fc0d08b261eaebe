//! Interface validation.
//!
//! Templates assume a well-formed interface. Anything the renderer could only
//! emit incorrectly is rejected here, before any unit runs.

use std::collections::HashSet;

use kitgen_core::{Error, Result};
use kitgen_ir::{Field, Interface, Signature, TypeExpr};

use crate::transform::strip_trailing_error;

/// Validate an interface before generation.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first offending method.
pub fn validate_interface(iface: &Interface) -> Result<()> {
    if iface.methods.is_empty() {
        return Err(Error::validation(
            &iface.name,
            "interface declares no methods",
        ));
    }

    let mut seen = HashSet::new();
    for method in &iface.methods {
        if !seen.insert(method.name.as_str()) {
            return Err(Error::validation(&method.name, "duplicate method name"));
        }
        validate_signature(method)?;
        validate_result_names(method)?;
    }
    Ok(())
}

/// Generated exchange fields and named-result wrappers need a name for every
/// result except a trailing `error`.
fn validate_result_names(method: &Signature) -> Result<()> {
    let residual = strip_trailing_error(&method.results);
    match residual.iter().position(Field::is_anonymous) {
        Some(i) => Err(Error::validation(
            &method.name,
            format!("result {} has no name", i + 1),
        )),
        None => Ok(()),
    }
}

/// Validate a single signature, including inline interfaces it mentions.
pub fn validate_signature(signature: &Signature) -> Result<()> {
    let fail = |reason: String| Err(Error::validation(&signature.name, reason));

    if signature.name.is_empty() {
        return fail("method name is empty".to_string());
    }

    let last = signature.args.len().saturating_sub(1);
    for (i, arg) in signature.args.iter().enumerate() {
        if arg.name.is_empty() {
            return fail(format!("argument {} has no name", i + 1));
        }
        let top_level_variadic_ok = i == last;
        if let Some(reason) = check_type(&arg.ty, top_level_variadic_ok) {
            return fail(format!("argument '{}': {}", arg.name, reason));
        }
    }

    for result in &signature.results {
        if let Some(reason) = check_type(&result.ty, false) {
            return fail(format!("result {}: {}", describe(result), reason));
        }
    }

    for_each_inline_interface(signature, &mut |method| validate_signature(method))
}

fn describe(field: &Field) -> String {
    if field.is_anonymous() {
        "(anonymous)".to_string()
    } else {
        format!("'{}'", field.name)
    }
}

fn check_type(ty: &TypeExpr, variadic_ok: bool) -> Option<String> {
    match ty {
        TypeExpr::Named { name, .. } => {
            if name.is_empty() {
                Some("type name is empty".to_string())
            } else {
                None
            }
        }
        TypeExpr::Pointer { depth, inner } => {
            if *depth == 0 {
                Some("pointer depth must be at least 1".to_string())
            } else {
                check_type(inner, false)
            }
        }
        TypeExpr::Slice(inner) | TypeExpr::Array { inner, .. } => check_type(inner, false),
        TypeExpr::Map { key, value } => check_type(key, false).or_else(|| check_type(value, false)),
        TypeExpr::Interface(_) => None,
        TypeExpr::Variadic(inner) => {
            if variadic_ok {
                check_type(inner, false)
            } else {
                Some("variadic type is only allowed on the last argument".to_string())
            }
        }
    }
}

fn for_each_inline_interface(
    signature: &Signature,
    f: &mut dyn FnMut(&Signature) -> Result<()>,
) -> Result<()> {
    fn visit(ty: &TypeExpr, f: &mut dyn FnMut(&Signature) -> Result<()>) -> Result<()> {
        match ty {
            TypeExpr::Interface(methods) => methods.iter().try_for_each(|m| f(m)),
            TypeExpr::Pointer { inner, .. }
            | TypeExpr::Slice(inner)
            | TypeExpr::Array { inner, .. }
            | TypeExpr::Variadic(inner) => visit(inner, f),
            TypeExpr::Map { key, value } => {
                visit(key, f)?;
                visit(value, f)
            }
            TypeExpr::Named { .. } => Ok(()),
        }
    }

    for field in signature.args.iter().chain(&signature.results) {
        visit(&field.ty, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> TypeExpr {
        TypeExpr::named("string")
    }

    fn reason(err: Error) -> String {
        match err {
            Error::Validation { reason, .. } => reason,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_interface() {
        let iface = Interface::new("StringService").method(
            Signature::new("Concat")
                .arg(Field::new("ctx", TypeExpr::context()))
                .arg(Field::new("parts", TypeExpr::variadic(string())))
                .result(Field::new("out", string()))
                .result(Field::anonymous(TypeExpr::error())),
        );
        assert!(validate_interface(&iface).is_ok());
    }

    #[test]
    fn test_empty_interface_rejected() {
        assert!(validate_interface(&Interface::new("Empty")).is_err());
    }

    #[test]
    fn test_duplicate_methods_rejected() {
        let iface = Interface::new("Svc")
            .method(Signature::new("Get"))
            .method(Signature::new("Get"));
        assert_eq!(
            reason(validate_interface(&iface).unwrap_err()),
            "duplicate method name"
        );
    }

    #[test]
    fn test_variadic_not_last_rejected() {
        let sig = Signature::new("Concat")
            .arg(Field::new("parts", TypeExpr::variadic(string())))
            .arg(Field::new("sep", string()));
        let err = validate_signature(&sig).unwrap_err();
        assert!(reason(err).contains("only allowed on the last argument"));
    }

    #[test]
    fn test_nested_variadic_rejected() {
        let sig = Signature::new("Concat")
            .arg(Field::new("parts", TypeExpr::slice(TypeExpr::variadic(string()))));
        assert!(validate_signature(&sig).is_err());
    }

    #[test]
    fn test_variadic_result_rejected() {
        let sig = Signature::new("Split").result(Field::new("parts", TypeExpr::variadic(string())));
        assert!(validate_signature(&sig).is_err());
    }

    #[test]
    fn test_zero_pointer_depth_rejected() {
        let sig = Signature::new("Get").arg(Field::new("id", TypeExpr::pointer(0, string())));
        assert!(reason(validate_signature(&sig).unwrap_err()).contains("pointer depth"));
    }

    #[test]
    fn test_unnamed_result_rejected() {
        let iface = Interface::new("Svc").method(
            Signature::new("Get")
                .result(Field::anonymous(string()))
                .result(Field::anonymous(TypeExpr::error())),
        );
        assert_eq!(
            reason(validate_interface(&iface).unwrap_err()),
            "result 1 has no name"
        );

        // inline interfaces may leave results unnamed
        let inline = Signature::new("Attach").arg(Field::new(
            "r",
            TypeExpr::interface(vec![Signature::new("Read").result(Field::anonymous(string()))]),
        ));
        assert!(validate_interface(&Interface::new("Svc").method(inline)).is_ok());
    }

    #[test]
    fn test_unnamed_argument_rejected() {
        let sig = Signature::new("Get").arg(Field::anonymous(string()));
        assert!(validate_signature(&sig).is_err());
    }

    #[test]
    fn test_inline_interface_validated() {
        let inner = Signature::new("Write")
            .arg(Field::new("chunks", TypeExpr::variadic(string())))
            .arg(Field::new("flush", TypeExpr::named("bool")));
        let sig = Signature::new("Attach").arg(Field::new("w", TypeExpr::interface(vec![inner])));

        match validate_signature(&sig).unwrap_err() {
            Error::Validation { method, .. } => assert_eq!(method, "Write"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
