//! Generation run report.

use std::error::Error as _;

use kitgen_codegen::GenerationReport;
use kitgen_core::Error;

use super::output::{Output, Report};

/// Summary of one generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub interface: String,
    /// Output directory, or the stream name.
    pub destination: String,
    pub written: Vec<ArtifactLine>,
    /// Hand-editable artifacts left untouched.
    pub skipped: Vec<String>,
    /// Failed artifacts with their error chain.
    pub failed: Vec<(String, String)>,
}

/// A written artifact.
#[derive(Debug)]
pub struct ArtifactLine {
    pub path: &'static str,
    pub bytes: usize,
}

impl GenerateReport {
    pub fn new(interface: &str, destination: String, report: &GenerationReport) -> Self {
        let written = report
            .written()
            .filter_map(|unit| {
                let bytes = unit.result.as_ref().ok()?.bytes();
                Some(ArtifactLine {
                    path: unit.path,
                    bytes,
                })
            })
            .collect();
        let skipped = report.skipped().map(|unit| unit.path.to_string()).collect();
        let failed = report
            .failures()
            .filter_map(|unit| Some((unit.path.to_string(), error_chain(unit.failure()?))))
            .collect();

        Self {
            interface: interface.to_string(),
            destination,
            written,
            skipped,
            failed,
        }
    }
}

/// `a: b: c` from an error and its sources, skipping artifact wrappers
/// whose path is already shown.
fn error_chain(err: &Error) -> String {
    let mut parts = vec![err.root().to_string()];
    let mut source = err.root().source();
    while let Some(err) = source {
        parts.push(err.to_string());
        source = err.source();
    }
    parts.join(": ")
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("kitgen {}", self.interface));
        out.key_value("Output", &self.destination);

        if !self.written.is_empty() {
            out.newline();
            out.section(&format!("Written ({})", self.written.len()));
            for artifact in &self.written {
                out.added_item(&format!("{} ({} bytes)", artifact.path, artifact.bytes));
            }
        }

        if !self.skipped.is_empty() {
            out.newline();
            out.section(&format!("Skipped, already exists ({})", self.skipped.len()));
            for path in &self.skipped {
                out.list_item(path);
            }
        }

        if !self.failed.is_empty() {
            out.newline();
            out.section(&format!("Failed ({})", self.failed.len()));
            for (path, reason) in &self.failed {
                out.error(&format!("{}: {}", path, reason));
            }
        }
    }
}
