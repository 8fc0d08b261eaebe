//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use kitgen_codegen::{GenerationInfo, OutputTarget};
use kitgen_ir::{Field, Interface, Signature, TypeExpr};

pub const IMPORT_PATH: &str = "github.com/acme/stringsvc";
pub const PROTOBUF: &str = "github.com/acme/protobuf/stringsvc";

fn string() -> TypeExpr {
    TypeExpr::named("string")
}

/// A service exercising every stripping case: context and error present,
/// no error, a variadic argument and an anonymous error-only result.
pub fn string_service() -> Interface {
    Interface::new("StringService")
        .doc("// @microgen middleware, logging, recover, grpc")
        .method(
            Signature::new("Uppercase")
                .arg(Field::new("ctx", TypeExpr::context()))
                .arg(Field::new("s", string()))
                .result(Field::new("result", string()))
                .result(Field::new("err", TypeExpr::error())),
        )
        .method(
            Signature::new("Count")
                .arg(Field::new("ctx", TypeExpr::context()))
                .arg(Field::new("text", string()))
                .arg(Field::new("symbol", string()))
                .result(Field::new("count", TypeExpr::named("int")))
                .result(Field::new("positions", TypeExpr::slice(TypeExpr::named("int")))),
        )
        .method(
            Signature::new("Concat")
                .arg(Field::new("ctx", TypeExpr::context()))
                .arg(Field::new("sep", string()))
                .arg(Field::new("parts", TypeExpr::variadic(string())))
                .result(Field::new("out", string()))
                .result(Field::new("err", TypeExpr::error())),
        )
        .method(
            Signature::new("Ping")
                .arg(Field::new("ctx", TypeExpr::context()))
                .result(Field::anonymous(TypeExpr::error())),
        )
}

/// The `Adder` service: `Add(ctx context.Context, a int, b int) (sum int, err error)`.
pub fn adder() -> Interface {
    Interface::new("Adder").method(
        Signature::new("Add")
            .arg(Field::new("ctx", TypeExpr::context()))
            .arg(Field::new("a", TypeExpr::named("int")))
            .arg(Field::new("b", TypeExpr::named("int")))
            .result(Field::new("sum", TypeExpr::named("int")))
            .result(Field::new("err", TypeExpr::error())),
    )
}

pub fn info_for(iface: Interface, dir: &Path) -> GenerationInfo {
    GenerationInfo::new(iface, "stringsvc", OutputTarget::Directory(dir.to_path_buf()))
        .with_import_path(IMPORT_PATH)
        .with_protobuf_package(PROTOBUF)
}
