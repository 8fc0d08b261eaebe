//! Go function and method declarations.

use kitgen_codegen::{CodeFragment, Renderable};

/// Builder for Go functions and methods.
///
/// Parameters and results are pre-rendered strings; the type renderer owns
/// their syntax.
#[derive(Debug, Clone)]
pub struct Func {
    name: String,
    doc: Option<String>,
    receiver: Option<String>,
    params: String,
    results: String,
    body: Vec<CodeFragment>,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            receiver: None,
            params: String::new(),
            results: String::new(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Make this a method on `*ty`, bound to `name`.
    pub fn receiver(mut self, name: &str, ty: &str) -> Self {
        self.receiver = Some(format!("{} *{}", name, ty));
        self
    }

    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    /// Result list as it appears after the parameters: `error`, `(n int, err error)`.
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.results = results.into();
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    pub fn fragment(mut self, fragment: CodeFragment) -> Self {
        self.body.push(fragment);
        self
    }

    pub fn fragments(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    fn header(&self) -> String {
        let mut header = String::from("func ");
        if let Some(receiver) = &self.receiver {
            header.push_str(&format!("({}) ", receiver));
        }
        header.push_str(&format!("{}({})", self.name, self.params));
        if !self.results.is_empty() {
            header.push(' ');
            header.push_str(&self.results);
        }
        header.push_str(" {");
        header
    }
}

impl Renderable for Func {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::comment(doc));
        }
        fragments.push(CodeFragment::block(self.header(), self.body.clone()));
        fragments
    }
}
