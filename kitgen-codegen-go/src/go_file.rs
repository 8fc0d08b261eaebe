//! GoFile abstraction for structured Go file generation.
//!
//! Provides a high-level API for generating Go files with a generated-code
//! header, a package clause, collected imports and body declarations.

use kitgen_codegen::{CodeBuilder, CodeFragment, ImportCollector, Overwrite, Renderable};

use crate::VERSION;

/// A structured representation of a Go file.
///
/// # Example
///
/// ```ignore
/// let file = GoFile::new("stringsvc", Overwrite::Always)
///     .imports(imports)
///     .add(request_struct)
///     .add(response_struct)
///     .render();
/// ```
pub struct GoFile {
    package: String,
    overwrite: Overwrite,
    imports: ImportCollector,
    body: Vec<Vec<CodeFragment>>,
}

impl GoFile {
    /// Create a file in `package`. Always-overwritten files carry a
    /// do-not-edit notice.
    pub fn new(package: impl Into<String>, overwrite: Overwrite) -> Self {
        Self {
            package: package.into(),
            overwrite,
            imports: ImportCollector::new(),
            body: Vec::new(),
        }
    }

    pub fn imports(mut self, imports: ImportCollector) -> Self {
        self.imports = imports;
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// The generated-code header lines.
    pub fn header(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "This file was automatically generated by \"kitgen {}\" utility.",
            VERSION
        )];
        if self.overwrite == Overwrite::Always {
            lines.push("Please, do not edit.".to_string());
        }
        lines
    }

    /// Render the file with Go indentation (tabs).
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::go();

        for line in self.header() {
            builder.push_comment(&line);
        }
        builder.push_line(&format!("package {}", self.package));

        if !self.imports.is_empty() {
            builder.push_blank();
            builder.emit(&self.imports);
        }

        for fragments in &self.body {
            builder.push_blank();
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }
}
