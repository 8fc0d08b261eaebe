//! Output trait for rendering reports to different formats.

use std::io::{self, Write};

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Render a title/header.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render an added item (e.g., new file).
    fn added_item(&mut self, text: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an error line.
    fn error(&mut self, msg: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
pub struct TerminalOutput {
    writer: Box<dyn Write>,
}

impl TerminalOutput {
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    // Terminal write failures have nowhere better to go.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{}", text);
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        self.line(text);
        self.line(&"=".repeat(text.len()));
    }

    fn section(&mut self, name: &str) {
        self.line(&format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(&format!("{}: {}", key, value));
    }

    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {}", text));
    }

    fn list_item(&mut self, text: &str) {
        self.line(&format!("  - {}", text));
    }

    fn error(&mut self, msg: &str) {
        self.line(&format!("error: {}", msg));
    }

    fn newline(&mut self) {
        self.line("");
    }
}
