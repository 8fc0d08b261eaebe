//! End-to-end generation runs against temporary directories.

mod common;

use std::{fs, path::Path, sync::Arc};

use common::{adder, info_for, string_service};
use kitgen_codegen::{
    GenerationInfo, GenerationUnit, Orchestrator, OutputTarget, Template,
    validate::validate_interface,
};
use kitgen_core::{Error, Sink, WriteOutcome, WriteStrategy};
use kitgen_codegen_go::{ExchangesTemplate, LoggingTemplate, templates_for};
use kitgen_ir::{Field, Interface, Signature, TypeExpr};
use kitgen_manifest::Manifest;
use tempfile::TempDir;

fn run(info: GenerationInfo) -> kitgen_codegen::GenerationReport {
    let factories = templates_for(&info.iface);
    Orchestrator::new(info).templates(factories).run()
}

fn read(dir: &Path, path: &str) -> String {
    fs::read_to_string(dir.join(path)).unwrap()
}

#[test]
fn test_full_run_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let report = run(info_for(string_service(), dir.path()));

    assert!(report.is_success());
    assert_eq!(report.written().count(), 7);
    for path in [
        "exchanges.go",
        "endpoints.go",
        "middleware/middleware.go",
        "middleware/logging.go",
        "middleware/recovering.go",
        "transport/grpc/server.go",
        "transport/grpc/client.go",
    ] {
        assert!(dir.path().join(path).is_file(), "missing {path}");
    }
}

#[test]
fn test_adder_exchanges() {
    let dir = TempDir::new().unwrap();
    let report = run(info_for(adder(), dir.path()));
    assert!(report.is_success());

    let exchanges = read(dir.path(), "exchanges.go");
    assert!(exchanges.contains("\tA int `json:\"a\"`\n\tB int `json:\"b\"`\n}"));
    assert!(exchanges.contains("type AddResponse struct {\n\tSum int `json:\"sum\"`\n}"));
    assert!(!dir.path().join("middleware").exists());
}

#[test]
fn test_empty_request_gets_formal_type() {
    let iface = Interface::new("Health").method(
        Signature::new("Check")
            .arg(Field::new("ctx", TypeExpr::context()))
            .result(Field::new("ok", TypeExpr::named("bool")))
            .result(Field::new("err", TypeExpr::error())),
    );
    let dir = TempDir::new().unwrap();
    run(info_for(iface, dir.path()));

    let exchanges = read(dir.path(), "exchanges.go");
    assert!(exchanges.contains(
        "// Formal exchange type, please do not delete.\ntype CheckRequest struct{}\n"
    ));
}

#[test]
fn test_existing_file_skipped_without_force() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("middleware")).unwrap();
    fs::write(dir.path().join("middleware/logging.go"), "// edited by hand\n").unwrap();

    let template = LoggingTemplate::new(info_for(string_service(), dir.path()));
    let unit = GenerationUnit::bind(Box::new(template)).unwrap();
    assert!(unit.strategy().is_some_and(WriteStrategy::is_skip));

    let outcome = unit.generate().unwrap();
    assert!(outcome.is_skipped());
    assert_eq!(outcome.bytes(), 0);
    assert_eq!(read(dir.path(), "middleware/logging.go"), "// edited by hand\n");
}

#[test]
fn test_run_force_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("middleware")).unwrap();
    fs::write(dir.path().join("middleware/logging.go"), "// edited by hand\n").unwrap();

    let info = info_for(string_service(), dir.path()).with_force(true);
    let unit = GenerationUnit::bind(Box::new(LoggingTemplate::new(info))).unwrap();
    assert!(matches!(
        unit.strategy(),
        Some(WriteStrategy::CreateOrOverwrite(_))
    ));

    unit.generate().unwrap();
    assert!(read(dir.path(), "middleware/logging.go").contains("func LoggingMiddleware("));
}

#[test]
fn test_force_tag_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("middleware")).unwrap();
    fs::write(dir.path().join("middleware/logging.go"), "old").unwrap();
    fs::write(dir.path().join("middleware/recovering.go"), "old").unwrap();

    let iface = string_service().doc("// @force logging");
    let report = run(info_for(iface, dir.path()));

    assert!(report.is_success());
    let skipped: Vec<_> = report.skipped().map(|u| u.name).collect();
    assert_eq!(skipped, ["recovering"]);
    assert_ne!(read(dir.path(), "middleware/logging.go"), "old");
    assert_eq!(read(dir.path(), "middleware/recovering.go"), "old");
}

#[test]
fn test_generated_files_always_overwritten() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("exchanges.go"), "stale").unwrap();

    let report = run(info_for(adder(), dir.path()));
    assert!(report.is_success());
    assert!(read(dir.path(), "exchanges.go").contains("type AddRequest struct"));
}

#[test]
fn test_missing_protobuf_fails_only_grpc_units() {
    let dir = TempDir::new().unwrap();
    let mut info = info_for(string_service(), dir.path());
    info.protobuf_package = None;

    let report = run(info);

    assert!(!report.is_success());
    let failed: Vec<_> = report.failures().map(|u| u.name).collect();
    assert_eq!(failed, ["grpc-server", "grpc-client"]);
    for unit in report.failures() {
        let err = unit.failure().unwrap();
        assert!(matches!(err.root(), Error::Config { .. }));
        assert!(err.to_string().starts_with(unit.path));
    }
    assert_eq!(report.written().count(), 5);
    assert!(!dir.path().join("transport").exists());
}

#[test]
fn test_failing_unit_does_not_block_siblings() {
    let dir = TempDir::new().unwrap();
    // a file where the transport directory should be
    fs::write(dir.path().join("transport"), "blocker").unwrap();

    let report = run(info_for(string_service(), dir.path()));

    let failed: Vec<_> = report.failures().map(|u| u.name).collect();
    assert_eq!(failed, ["grpc-server", "grpc-client"]);
    for unit in report.failures() {
        assert!(matches!(unit.failure().unwrap().root(), Error::Io { .. }));
    }
    assert!(dir.path().join("exchanges.go").is_file());
    assert!(dir.path().join("middleware/recovering.go").is_file());
}

#[test]
fn test_stream_output_keeps_artifacts_whole() {
    let (sink, buffer) = Sink::memory();
    let info = GenerationInfo::new(string_service(), "stringsvc", OutputTarget::Stream(sink))
        .with_import_path(common::IMPORT_PATH)
        .with_protobuf_package(common::PROTOBUF);

    let report = run(info);
    assert!(report.is_success());
    assert!(
        report
            .units()
            .iter()
            .all(|u| matches!(u.result, Ok(WriteOutcome::Streamed { .. })))
    );

    let out = buffer.contents();
    let header = "// This file was automatically generated by";
    let starts: Vec<_> = out.match_indices(header).map(|(i, _)| i).collect();
    assert_eq!(starts.len(), 7);

    // every artifact is contiguous: one package clause per header
    let mut bounds = starts.clone();
    bounds.push(out.len());
    for pair in bounds.windows(2) {
        let artifact = &out[pair[0]..pair[1]];
        assert_eq!(artifact.matches("\npackage ").count(), 1);
    }
}

#[test]
fn test_variadic_not_last_rejected_before_generation() {
    let iface = Interface::new("Joiner").method(
        Signature::new("Join")
            .arg(Field::new("parts", TypeExpr::variadic(TypeExpr::named("string"))))
            .arg(Field::new("sep", TypeExpr::named("string"))),
    );
    let err = validate_interface(&iface).unwrap_err();
    assert!(matches!(err, Error::Validation { ref method, .. } if method == "Join"));
}

#[test]
fn test_templates_share_the_interface() {
    let dir = TempDir::new().unwrap();
    let info = info_for(adder(), dir.path());
    let mut template = ExchangesTemplate::new(info.clone());
    template.prepare().unwrap();

    // each template clones the info but shares the interface
    assert!(!info.force);
    assert_eq!(Arc::strong_count(&info.iface), 2);
    drop(template);
    assert_eq!(Arc::strong_count(&info.iface), 1);
}

#[test]
fn test_manifest_drives_generation() {
    let manifest: Manifest = include_str!("../../demos/stringsvc.toml").parse().unwrap();
    let service = manifest.service().clone();
    validate_interface(&service).unwrap();

    let dir = TempDir::new().unwrap();
    let info = GenerationInfo::new(
        service,
        &manifest.package,
        OutputTarget::Directory(dir.path().to_path_buf()),
    )
    .with_import_path(&manifest.import_path)
    .with_protobuf_package(common::PROTOBUF);
    let report = run(info);
    assert!(report.is_success());

    let exchanges = read(dir.path(), "exchanges.go");
    assert!(exchanges.contains(
        "\tIds []int64 `json:\"ids\"` // This field was defined with ellipsis (...).\n"
    ));
    assert!(exchanges.contains("\tWords map[int64]*Word `json:\"words\"`\n"));

    // service types are qualified outside the service package
    let logging = read(dir.path(), "middleware/logging.go");
    assert!(logging.contains("(words map[int64]*stringsvc.Word, err error)"));
}

#[test]
fn test_packages_sharing_a_name_get_distinct_aliases() {
    let iface = Interface::new("Sync")
        .doc("// @microgen logging")
        .method(
            Signature::new("Sync")
                .arg(Field::new("ctx", TypeExpr::context()))
                .arg(Field::new("a", TypeExpr::qualified("github.com/acme/billing/models", "Invoice")))
                .arg(Field::new("b", TypeExpr::qualified("github.com/acme/crm/models", "Customer")))
                .result(Field::new("err", TypeExpr::error())),
        );
    let dir = TempDir::new().unwrap();
    let report = run(info_for(iface, dir.path()));
    assert!(report.is_success());

    let exchanges = read(dir.path(), "exchanges.go");
    assert!(exchanges.contains("\t\"github.com/acme/billing/models\"\n\tmodels1 \"github.com/acme/crm/models\"\n"));
    assert!(exchanges.contains("\tA models.Invoice `json:\"a\"`\n\tB models1.Customer `json:\"b\"`\n"));

    let logging = read(dir.path(), "middleware/logging.go");
    assert!(logging.contains("\tmodels1 \"github.com/acme/crm/models\"\n"));
    assert!(logging.contains("Sync(ctx context.Context, a models.Invoice, b models1.Customer) (err error)"));
}

#[test]
fn test_force_tag_accepts_recovering() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("middleware")).unwrap();
    fs::write(dir.path().join("middleware/recovering.go"), "old").unwrap();

    let iface = string_service().doc("// @force recovering");
    let report = run(info_for(iface, dir.path()));

    assert!(report.is_success());
    assert_eq!(report.skipped().count(), 0);
    assert!(read(dir.path(), "middleware/recovering.go").contains("func RecoveringMiddleware("));
}
