//! Type-expression renderer.
//!
//! Renders [`TypeExpr`] values to Go syntax. Every template renders fields,
//! parameters and results through this module so that a type looks the same
//! in every generated file.

use kitgen_core::to_lower_first;
use kitgen_ir::{Field, Signature, TypeExpr};

use crate::ImportCollector;

/// Render a type expression with the default renderer.
///
/// `variadic_allowed` selects how a [`TypeExpr::Variadic`] is emitted: as a
/// spread (`...T`) for call parameters, or as a slice (`[]T`) for stored
/// fields.
pub fn render_type(ty: &TypeExpr, variadic_allowed: bool) -> String {
    TypeRenderer::default().render(ty, variadic_allowed)
}

/// Go package alias for an import path: its last segment, minus a major
/// version suffix and any characters that are not valid in an identifier.
///
/// ```
/// use kitgen_codegen::render::package_alias;
///
/// assert_eq!(package_alias("context"), "context");
/// assert_eq!(package_alias("github.com/go-kit/kit/transport/grpc"), "grpc");
/// assert_eq!(package_alias("github.com/acme/svc/v2"), "svc");
/// ```
pub fn package_alias(path: &str) -> String {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let mut last = segments.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(prev) = segments.next() {
            last = prev;
        }
    }
    let base = last.split('.').next().unwrap_or(last);
    base.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Renders type expressions relative to the package of the generated file.
///
/// Names qualified by the file's own package are emitted bare. Other
/// qualifiers use the alias the file's imports resolved for the path, or the
/// default [`package_alias`] without imports.
#[derive(Debug, Clone, Default)]
pub struct TypeRenderer<'a> {
    local_package: Option<&'a str>,
    imports: Option<&'a ImportCollector>,
}

impl<'a> TypeRenderer<'a> {
    /// Create a renderer for a file that lives in `import_path`.
    pub fn local_to(import_path: &'a str) -> Self {
        Self {
            local_package: Some(import_path),
            imports: None,
        }
    }

    /// Qualify names with the aliases of `imports`.
    pub fn with_imports(mut self, imports: &'a ImportCollector) -> Self {
        self.imports = Some(imports);
        self
    }

    /// Render a type expression.
    pub fn render(&self, ty: &TypeExpr, variadic_allowed: bool) -> String {
        let mut out = String::new();
        self.write(&mut out, ty, variadic_allowed, true);
        out
    }

    fn write(&self, out: &mut String, ty: &TypeExpr, variadic_allowed: bool, qualify: bool) {
        match ty {
            TypeExpr::Named { qualifier, name } => {
                if let Some(q) = qualifier.as_deref() {
                    if qualify && Some(q) != self.local_package {
                        match self.imports.and_then(|imports| imports.alias(q)) {
                            Some(alias) => out.push_str(alias),
                            None => out.push_str(&package_alias(q)),
                        }
                        out.push('.');
                    }
                }
                out.push_str(name);
            }
            TypeExpr::Pointer { depth, inner } => {
                out.push_str(&"*".repeat(*depth));
                self.write(out, inner, false, qualify);
            }
            TypeExpr::Slice(inner) => {
                out.push_str("[]");
                self.write(out, inner, false, qualify);
            }
            TypeExpr::Array { len, inner } => {
                out.push('[');
                out.push_str(&len.to_string());
                out.push(']');
                self.write(out, inner, false, qualify);
            }
            TypeExpr::Map { key, value } => {
                out.push_str("map[");
                self.write(out, key, false, false);
                out.push(']');
                self.write(out, value, false, qualify);
            }
            TypeExpr::Interface(methods) => {
                if methods.is_empty() {
                    out.push_str("interface{}");
                } else {
                    let decls: Vec<String> =
                        methods.iter().map(|m| self.signature(m)).collect();
                    out.push_str("interface{ ");
                    out.push_str(&decls.join("; "));
                    out.push_str(" }");
                }
            }
            TypeExpr::Variadic(inner) => {
                out.push_str(if variadic_allowed { "..." } else { "[]" });
                self.write(out, inner, false, qualify);
            }
        }
    }

    /// Render a parameter list for a definition: `ctx context.Context, a int`.
    ///
    /// Names are lower-first; anonymous fields render their type only.
    pub fn params(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|field| {
                let ty = self.render(&field.ty, true);
                if field.is_anonymous() {
                    ty
                } else {
                    format!("{} {}", to_lower_first(&field.name), ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render a method declaration without the `func` keyword:
    /// `Count(ctx context.Context, text string) (count int, err error)`.
    pub fn signature(&self, signature: &Signature) -> String {
        let args = self.params(&signature.args);
        let results = self.results(&signature.results);
        if results.is_empty() {
            format!("{}({})", signature.name, args)
        } else {
            format!("{}({}) {}", signature.name, args, results)
        }
    }

    /// Render a result list: empty, a bare anonymous type, or a parenthesized list.
    pub fn results(&self, fields: &[Field]) -> String {
        match fields {
            [] => String::new(),
            [single] if single.is_anonymous() => self.render(&single.ty, false),
            _ => format!("({})", self.params(fields)),
        }
    }
}

/// Render a parameter list with the default renderer.
pub fn render_params(fields: &[Field]) -> String {
    TypeRenderer::default().params(fields)
}

/// Render a method declaration with the default renderer.
pub fn render_signature(signature: &Signature) -> String {
    TypeRenderer::default().signature(signature)
}

/// Render call arguments for the given fields: `ctx, text, opts...`.
pub fn render_call_args(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| {
            let name = to_lower_first(&field.name);
            if field.ty.is_variadic() {
                format!("{}...", name)
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
