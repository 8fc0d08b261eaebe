use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use eyre::{Result, WrapErr};
use kitgen_codegen::{GenerationInfo, Orchestrator, OutputTarget, validate::validate_interface};
use kitgen_codegen_go::templates_for;
use kitgen_core::Sink;
use kitgen_ir::Interface;
use kitgen_manifest::Manifest;
use tracing::info;

use crate::reports::{GenerateReport, Report, TerminalOutput};

/// Extension trait for exiting on manifest errors with pretty formatting
trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kitgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "kitgen")]
#[command(version)]
#[command(about = "Generate go-kit service scaffolding from an interface description")]
pub(crate) struct Cli {
    /// Path to the interface description
    #[arg(short, long, default_value = "kitgen.toml")]
    file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Regenerate hand-editable files even if they exist
    #[arg(long)]
    force: bool,

    /// Write every artifact to stdout instead of files
    #[arg(long, conflicts_with = "out")]
    stdout: bool,

    /// Import path of the service package (overrides the manifest)
    #[arg(long)]
    package_path: Option<String>,

    /// Import path of the compiled protobuf package, required by gRPC templates
    #[arg(long)]
    protobuf: Option<String>,

    /// gRPC service name (defaults to the interface name)
    #[arg(long)]
    grpc_service: Option<String>,

    /// Log progress of every artifact
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let default = if self.verbose { "info" } else { "warn" };
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        let manifest = Manifest::open(&self.file, self.package_path.as_deref()).unwrap_or_exit();
        let service = manifest.service().clone();
        validate_interface(&service)
            .wrap_err_with(|| format!("interface '{}' cannot be generated", service.name))?;

        let info = self.generation_info(&manifest, service);
        let factories = templates_for(&info.iface);
        info!(
            interface = %info.iface.name,
            templates = factories.len(),
            "starting generation"
        );

        let report = Orchestrator::new(info).templates(factories).run();

        let summary = GenerateReport::new(&manifest.service().name, self.destination(), &report);
        // the summary must not mix with streamed artifacts
        summary.render(&mut TerminalOutput::stderr());

        Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    fn generation_info(&self, manifest: &Manifest, service: Interface) -> GenerationInfo {
        let output = if self.stdout {
            OutputTarget::Stream(Sink::stdout())
        } else {
            OutputTarget::Directory(self.out.clone())
        };
        let mut info = GenerationInfo::new(service, &manifest.package, output)
            .with_import_path(&manifest.import_path)
            .with_force(self.force);
        if let Some(protobuf) = &self.protobuf {
            info = info.with_protobuf_package(protobuf);
        }
        if let Some(name) = &self.grpc_service {
            info = info.with_grpc_service_name(name);
        }
        info
    }

    fn destination(&self) -> String {
        if self.stdout {
            "stdout".to_string()
        } else {
            self.out.display().to_string()
        }
    }
}
