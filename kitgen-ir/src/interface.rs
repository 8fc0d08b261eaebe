//! Interfaces, method signatures and fields.

use crate::{Tags, TypeExpr};

/// A named, typed argument or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared name. Empty for anonymous results.
    pub name: String,
    pub ty: TypeExpr,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Create an anonymous result field.
    pub fn anonymous(ty: TypeExpr) -> Self {
        Self::new("", ty)
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// A method signature.
///
/// Argument and result order is call-site order and is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub args: Vec<Field>,
    pub results: Vec<Field>,
    /// Raw documentation lines, tag markers included.
    pub docs: Vec<String>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            results: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, field: Field) -> Self {
        self.args.push(field);
        self
    }

    /// Append a result.
    pub fn result(mut self, field: Field) -> Self {
        self.results.push(field);
        self
    }

    /// Append a documentation line.
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }

    /// Parse the documentation tags of this method.
    pub fn tags(&self) -> Tags {
        Tags::parse(&self.docs)
    }
}

/// A service interface: the unit the whole engine operates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub methods: Vec<Signature>,
    /// Raw documentation lines, tag markers included.
    pub docs: Vec<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Append a method.
    pub fn method(mut self, signature: Signature) -> Self {
        self.methods.push(signature);
        self
    }

    /// Append a documentation line.
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.docs.push(line.into());
        self
    }

    /// Find a method by name.
    pub fn find_method(&self, name: &str) -> Option<&Signature> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Parse the documentation tags of this interface.
    pub fn tags(&self) -> Tags {
        Tags::parse(&self.docs)
    }
}
