//! Report data structures for the CLI.
//!
//! Reports separate data collection from rendering: the run builds a report,
//! then renders it to an Output target.

mod generate;
mod output;

pub use generate::GenerateReport;
pub use output::{Report, TerminalOutput};
