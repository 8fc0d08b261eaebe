use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename, carried into every diagnostic.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create an invalid type error, pointing at the quoted type string.
    pub fn invalid_type_error(&self, ty: &str, reason: impl Into<String>) -> Box<Error> {
        Box::new(Error::InvalidType {
            src: self.named_source(),
            span: find_quoted_span(self.src, ty),
            ty: ty.to_string(),
            reason: reason.into(),
        })
    }

    pub fn no_interface_error(&self) -> Box<Error> {
        Box::new(Error::NoInterface {
            src: self.named_source(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the interface description with '--file <path>'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse interface description")]
    #[diagnostic(code(kitgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid type '{ty}'")]
    #[diagnostic(
        code(kitgen::invalid_type),
        help("{reason}. Types are written in Go syntax, e.g. '[]*pkg.User' or 'map[string]int'")
    )]
    InvalidType {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid type")]
        span: Option<SourceSpan>,
        ty: String,
        reason: String,
    },

    #[error("no interface is marked for generation")]
    #[diagnostic(
        code(kitgen::no_interface),
        help("add '// @microgen' to the docs of the interface to generate")
    )]
    NoInterface {
        #[source_code]
        src: NamedSource<String>,
    },
}

/// Locate `"text"` in the source, falling back to the bare text.
fn find_quoted_span(src: &str, text: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", text);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, text.len())));
    }
    src.find(text)
        .map(|pos| SourceSpan::from((pos, text.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_span_skips_quote() {
        let src = "type = \"map[int\"";
        let span = find_quoted_span(src, "map[int").unwrap();
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_span_missing() {
        assert!(find_quoted_span("name = \"a\"", "zzz").is_none());
    }
}
