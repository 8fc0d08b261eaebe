//! Template contract and per-run generation info.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use kitgen_core::{Result, Sink, StrategyInput, WriteStrategy};
use kitgen_ir::{FORCE_TAG, Interface};

/// A producer of exactly one artifact.
///
/// A template is driven in a fixed order: [`prepare`](Template::prepare)
/// once, [`choose_strategy`](Template::choose_strategy) once, then
/// [`render`](Template::render). Rendering is pure; all I/O belongs to the
/// chosen [`WriteStrategy`].
pub trait Template: Send {
    /// Category name, e.g. `"grpc-server"`.
    fn name(&self) -> &'static str;

    /// Output path relative to the output directory.
    fn default_path(&self) -> &'static str;

    /// Validate configuration and precompute render state.
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    /// Decide how the rendered artifact is persisted.
    fn choose_strategy(&self) -> Result<WriteStrategy>;

    /// Render the artifact content.
    fn render(&self) -> String;
}

/// Builds a template from the base generation info.
///
/// The template keeps its own copy of the info.
pub type TemplateFactory = fn(&GenerationInfo) -> Box<dyn Template>;

/// Overwrite behavior for existing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    Always,
    /// Only create if the file doesn't exist (hand-edited code)
    IfMissing,
}

/// Where artifacts go.
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Files under this directory, at each template's default path.
    Directory(PathBuf),
    /// Every artifact to one shared stream.
    Stream(Sink),
}

/// Configuration of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationInfo {
    /// The interface being generated for.
    pub iface: Arc<Interface>,
    /// Package name of the service interface (`stringsvc`).
    pub service_package: String,
    /// Import path of the service package.
    pub service_import_path: String,
    pub output: OutputTarget,
    /// Regenerate hand-editable artifacts even if they exist.
    pub force: bool,
    /// Import path of the generated protobuf package.
    pub protobuf_package: Option<String>,
    /// Service name in the protobuf definition. Defaults to the interface name.
    pub grpc_service_name: Option<String>,
}

impl GenerationInfo {
    pub fn new(
        iface: impl Into<Arc<Interface>>,
        service_package: impl Into<String>,
        output: OutputTarget,
    ) -> Self {
        let service_package = service_package.into();
        Self {
            iface: iface.into(),
            service_import_path: service_package.clone(),
            service_package,
            output,
            force: false,
            protobuf_package: None,
            grpc_service_name: None,
        }
    }

    pub fn with_import_path(mut self, path: impl Into<String>) -> Self {
        self.service_import_path = path.into();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_protobuf_package(mut self, package: impl Into<String>) -> Self {
        self.protobuf_package = Some(package.into());
        self
    }

    pub fn with_grpc_service_name(mut self, name: impl Into<String>) -> Self {
        self.grpc_service_name = Some(name.into());
        self
    }

    /// The protobuf service name.
    pub fn grpc_service(&self) -> &str {
        self.grpc_service_name
            .as_deref()
            .unwrap_or(&self.iface.name)
    }

    /// Absolute target for a default path, `None` when streaming.
    pub fn target_path(&self, default_path: &str) -> Option<PathBuf> {
        match &self.output {
            OutputTarget::Directory(dir) => Some(dir.join(default_path)),
            OutputTarget::Stream(_) => None,
        }
    }

    /// Decide the write strategy for an artifact.
    ///
    /// `Overwrite::Always` artifacts are treated as forced.
    pub fn decide(&self, default_path: &str, overwrite: Overwrite, tag_force: bool) -> WriteStrategy {
        let tag_force = tag_force || overwrite == Overwrite::Always;
        let input = match &self.output {
            OutputTarget::Directory(dir) => StrategyInput::for_path(dir.join(default_path)),
            OutputTarget::Stream(sink) => StrategyInput {
                path: Path::new(default_path).to_path_buf(),
                file_exists: false,
                run_force: false,
                tag_force: false,
                stream: Some(sink.clone()),
            },
        };
        WriteStrategy::decide(input.run_force(self.force).tag_force(tag_force))
    }

    /// Check if a `// @force` tag on the interface names any of `categories`.
    pub fn forced_by_tags(&self, categories: &[&str]) -> bool {
        self.iface.tags().contains_any(FORCE_TAG, categories)
    }
}
