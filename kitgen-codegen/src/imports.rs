//! Import collection for generated Go files.

use std::collections::BTreeMap;

use kitgen_ir::{Field, TypeExpr};

use crate::{CodeFragment, Renderable, render::package_alias};

/// Tracks imported packages and deduplicates them.
///
/// Imports render sorted by path, as gofmt orders them. An explicit alias is
/// only written when it differs from the path's last segment.
///
/// Every path gets a distinct alias: a package whose alias is already taken
/// by an earlier import is numbered (`models`, `models1`). Add the packages
/// whose alias the template writes literally before the field types.
///
/// # Example
///
/// ```
/// use kitgen_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("context");
/// imports.add("github.com/go-kit/kit/endpoint");
/// imports.add("context");
///
/// assert_eq!(imports.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Import path -> alias
    imports: BTreeMap<String, String>,
    /// Packages never imported (the file's own package)
    local: Option<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector for a file in package `import_path`; references to
    /// that package are never imported.
    pub fn local_to(import_path: impl Into<String>) -> Self {
        Self {
            imports: BTreeMap::new(),
            local: Some(import_path.into()),
        }
    }

    /// Import a package under its default alias.
    pub fn add(&mut self, path: &str) {
        let alias = package_alias(path);
        self.add_aliased(path, &alias);
    }

    /// Import a package under an explicit alias.
    pub fn add_aliased(&mut self, path: &str, alias: &str) {
        if path.is_empty() || self.local.as_deref() == Some(path) || self.has(path) {
            return;
        }
        let alias = self.free_alias(alias);
        self.imports.insert(path.to_string(), alias);
    }

    /// The alias `path` was imported under.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.imports.get(path).map(String::as_str)
    }

    fn free_alias(&self, wanted: &str) -> String {
        let taken = |alias: &str| self.imports.values().any(|a| a == alias);
        if !taken(wanted) {
            return wanted.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}{}", wanted, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Import every package the rendered form of a type references.
    ///
    /// Map keys render unqualified, so their packages are not imported.
    pub fn add_type(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Named { qualifier, .. } => {
                if let Some(path) = qualifier.as_deref() {
                    self.add(path);
                }
            }
            TypeExpr::Pointer { inner, .. }
            | TypeExpr::Slice(inner)
            | TypeExpr::Array { inner, .. }
            | TypeExpr::Variadic(inner) => self.add_type(inner),
            TypeExpr::Map { value, .. } => self.add_type(value),
            TypeExpr::Interface(methods) => {
                for method in methods {
                    self.add_fields(&method.args);
                    self.add_fields(&method.results);
                }
            }
        }
    }

    /// Import every package referenced by a list of fields.
    pub fn add_fields(&mut self, fields: &[Field]) {
        for field in fields {
            self.add_type(&field.ty);
        }
    }

    /// Check if a package is imported.
    pub fn has(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of imported packages.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    fn spec(path: &str, alias: &str) -> String {
        let default_alias = path.rsplit('/').next().unwrap_or(path);
        if alias == default_alias {
            format!("\"{}\"", path)
        } else {
            format!("{} \"{}\"", alias, path)
        }
    }
}

impl Renderable for ImportCollector {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let specs: Vec<String> = self
            .imports
            .iter()
            .map(|(path, alias)| Self::spec(path, alias))
            .collect();

        match specs.as_slice() {
            [] => Vec::new(),
            [single] => vec![CodeFragment::line(format!("import {}", single))],
            _ => vec![CodeFragment::block_with_close(
                "import (",
                specs.into_iter().map(CodeFragment::Line).collect(),
                ")",
            )],
        }
    }
}
