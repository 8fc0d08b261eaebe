//! Tab-indented line buffer for Go source.

use super::{CodeFragment, Renderable};

/// One level of Go indentation, as gofmt emits it.
const TAB: &str = "\t";

/// Accumulates lines at a current indentation depth.
///
/// ```
/// use kitgen_codegen::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::go();
/// builder.apply_fragment(CodeFragment::block(
///     "func main() {",
///     vec![CodeFragment::line("run()")],
/// ));
/// assert_eq!(builder.build(), "func main() {\n\trun()\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn go() -> Self {
        Self::default()
    }

    /// Add a line at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add an empty line, never indented.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Add `// text`, one comment line per line of `text`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            if line.is_empty() {
                self.push_line("//");
            } else {
                self.push_line(&format!("// {}", line));
            }
        }
        self
    }

    /// Emit every fragment of a node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header).push_indent();
                body.into_iter().for_each(|f| self.apply_fragment(f));
                self.push_dedent();
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Sequence(fragments) => {
                fragments.into_iter().for_each(|f| self.apply_fragment(f));
            }
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
        }
    }

    /// Consume the builder and return the source text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        self.buffer.push_str(&TAB.repeat(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_depth() {
        let mut builder = CodeBuilder::go();
        builder
            .push_line("var (")
            .push_indent()
            .push_line("a = 1")
            .push_blank()
            .push_dedent()
            .push_dedent()
            .push_line(")");
        assert_eq!(builder.build(), "var (\n\ta = 1\n\n)\n");
    }

    #[test]
    fn test_comment_lines() {
        let mut builder = CodeBuilder::go();
        builder.push_indent().push_comment("first\n\nthird");
        assert_eq!(builder.build(), "\t// first\n\t//\n\t// third\n");
    }

    #[test]
    fn test_emit_nested_blocks() {
        struct FuncNode;
        impl Renderable for FuncNode {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::comment("Run runs."),
                    CodeFragment::block(
                        "func Run() error {",
                        vec![
                            CodeFragment::block(
                                "if err != nil {",
                                vec![CodeFragment::line("return err")],
                            ),
                            CodeFragment::line("return nil"),
                        ],
                    ),
                ]
            }
        }

        let mut builder = CodeBuilder::go();
        builder.emit(&FuncNode);
        assert_eq!(
            builder.build(),
            "// Run runs.\nfunc Run() error {\n\tif err != nil {\n\t\treturn err\n\t}\n\treturn nil\n}\n"
        );
    }

    #[test]
    fn test_custom_close_and_sequence() {
        let mut builder = CodeBuilder::go();
        builder.apply_fragment(CodeFragment::sequence(vec![
            CodeFragment::block_with_close("defer func() {", vec![CodeFragment::line("done()")], "}()"),
            CodeFragment::line("return"),
        ]));
        assert_eq!(builder.build(), "defer func() {\n\tdone()\n}()\nreturn\n");
    }
}
