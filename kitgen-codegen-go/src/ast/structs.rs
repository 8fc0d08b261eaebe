//! Go struct declarations.

use kitgen_codegen::{CodeFragment, Renderable};

/// A field in a Go struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub tag: Option<String>,
    pub comment: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            tag: None,
            comment: None,
        }
    }

    /// Struct tag, without backquotes (`json:"visit"`).
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Trailing line comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn format(&self) -> String {
        let mut line = format!("{} {}", self.name, self.ty);
        if let Some(tag) = &self.tag {
            line.push_str(&format!(" `{}`", tag));
        }
        if let Some(comment) = &self.comment {
            line.push_str(&format!(" // {}", comment));
        }
        line
    }
}

/// Builder for Go struct type declarations.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::comment(doc));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!("type {} struct{{}}", self.name)));
        } else {
            fragments.push(CodeFragment::block(
                format!("type {} struct {{", self.name),
                self.fields
                    .iter()
                    .map(|f| CodeFragment::Line(f.format()))
                    .collect(),
            ));
        }

        fragments
    }
}
