//! Generation engine for the kitgen service generator.
//!
//! This crate turns an interface model into rendered artifacts. Concrete
//! artifact kinds live in template crates (e.g., `kitgen-codegen-go`); this
//! crate owns everything they share.
//!
//! # Module Organization
//!
//! - [`builder`] - Code fragments and the tab-indented CodeBuilder
//! - [`render`] - Type-expression renderer for Go syntax
//! - [`transform`] - Signature transform rules (context/error stripping)
//! - [`validate`] - Interface validation before generation
//! - [`imports`] - Import collection for generated files
//! - [`template`] - Template contract and per-run generation info
//! - [`unit`] - Generation units binding a template to a write strategy
//! - [`orchestrator`] - Concurrent execution and outcome aggregation

pub mod builder;
pub mod imports;
pub mod orchestrator;
pub mod render;
pub mod template;
pub mod transform;
pub mod unit;
pub mod validate;

pub use builder::{CodeBuilder, CodeFragment, Renderable};
pub use imports::ImportCollector;
pub use orchestrator::{GenerationReport, Orchestrator, UnitReport};
pub use template::{GenerationInfo, OutputTarget, Overwrite, Template, TemplateFactory};
pub use unit::GenerationUnit;
