//! Recursive type expressions.

use crate::Signature;

/// The type of a field, parameter or result.
///
/// The set of variants is closed: every consumer matches exhaustively, so a
/// new shape cannot be added without every renderer handling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain or import-qualified type name (`int`, `entity.Visit`).
    Named {
        /// Import path of the declaring package, `None` for built-ins.
        /// Types of the service package carry its import path too; the
        /// renderer drops the qualifier inside that package.
        qualifier: Option<String>,
        name: String,
    },
    /// `depth` levels of indirection over `inner`.
    Pointer { depth: usize, inner: Box<TypeExpr> },
    /// An unbounded sequence.
    Slice(Box<TypeExpr>),
    /// A fixed-length sequence.
    Array { len: usize, inner: Box<TypeExpr> },
    /// A mapping from `key` to `value`.
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// An inline interface declaring the given methods, in order.
    Interface(Vec<Signature>),
    /// A variadic marker. Only legal as the type of the last argument.
    Variadic(Box<TypeExpr>),
}

impl TypeExpr {
    /// Create an unqualified type name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            qualifier: None,
            name: name.into(),
        }
    }

    /// Create a type name qualified by an import path.
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    /// Create a pointer type with the given depth.
    pub fn pointer(depth: usize, inner: TypeExpr) -> Self {
        Self::Pointer {
            depth,
            inner: Box::new(inner),
        }
    }

    /// Create a slice type.
    pub fn slice(inner: TypeExpr) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Create a fixed-length array type.
    pub fn array(len: usize, inner: TypeExpr) -> Self {
        Self::Array {
            len,
            inner: Box::new(inner),
        }
    }

    /// Create a map type.
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create an inline interface type.
    pub fn interface(methods: Vec<Signature>) -> Self {
        Self::Interface(methods)
    }

    /// Create a variadic type.
    pub fn variadic(inner: TypeExpr) -> Self {
        Self::Variadic(Box::new(inner))
    }

    /// Convenience: the built-in `error` type.
    pub fn error() -> Self {
        Self::named("error")
    }

    /// Convenience: `context.Context`.
    pub fn context() -> Self {
        Self::qualified("context", "Context")
    }

    /// Check if this is a variadic type at the top level.
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic(_))
    }

    /// Check if this is exactly the named type `qualifier.name`.
    pub fn is_named(&self, qualifier: Option<&str>, name: &str) -> bool {
        match self {
            Self::Named {
                qualifier: q,
                name: n,
            } => q.as_deref() == qualifier && n == name,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            TypeExpr::named("int"),
            TypeExpr::Named {
                qualifier: None,
                name: "int".into()
            }
        );
        assert!(matches!(
            TypeExpr::pointer(2, TypeExpr::named("int")),
            TypeExpr::Pointer { depth: 2, .. }
        ));
        assert!(TypeExpr::variadic(TypeExpr::named("string")).is_variadic());
        assert!(!TypeExpr::slice(TypeExpr::named("string")).is_variadic());
    }

    #[test]
    fn test_is_named() {
        assert!(TypeExpr::context().is_named(Some("context"), "Context"));
        assert!(!TypeExpr::context().is_named(None, "Context"));
        assert!(TypeExpr::error().is_named(None, "error"));
        assert!(!TypeExpr::qualified("errs", "error").is_named(None, "error"));
        assert!(!TypeExpr::pointer(1, TypeExpr::error()).is_named(None, "error"));
    }
}
