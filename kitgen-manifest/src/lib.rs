//! TOML interface descriptions for the kitgen service generator.
//!
//! A manifest stands in for a Go parser: it declares the service package and
//! its interfaces with Go-syntax type strings, and resolves them into the
//! [`kitgen_ir`] model.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod schema;
mod types;

use std::{path::Path, str::FromStr};

pub use error::{Error, Result, SourceContext};
use kitgen_ir::{Field, Interface, MAIN_TAG, Signature};
use schema::{RawField, RawManifest};
pub use types::TypeParser;

const DEFAULT_FILENAME: &str = "kitgen.toml";

/// A resolved interface description.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Go package name of the service.
    pub package: String,
    /// Import path of the service package; the package name when not given.
    pub import_path: String,
    interfaces: Vec<Interface>,
    /// Index of the service in `interfaces`.
    service: usize,
}

impl Manifest {
    /// Parse a manifest file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, None)
    }

    /// Parse a manifest file, resolving service types against `import_path`
    /// instead of the path the manifest declares.
    pub fn open(path: impl AsRef<Path>, import_path: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string(), import_path)
    }

    /// Parse a manifest from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename, None)
    }

    /// The interface marked with `// @microgen`.
    pub fn service(&self) -> &Interface {
        &self.interfaces[self.service]
    }

    /// Every declared interface, in manifest order.
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, DEFAULT_FILENAME, None)
    }
}

/// Parse and resolve a manifest.
///
/// The first interface carrying the main tag is the service; the others are
/// kept so callers can inspect them. An `import_path` override wins over the
/// manifest's own `import_path`, which defaults to the package name.
pub fn parse_manifest(
    content: &str,
    filename: &str,
    import_path: Option<&str>,
) -> Result<Manifest> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawManifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let import_path = import_path
        .map(str::to_string)
        .or(raw.import_path)
        .unwrap_or_else(|| raw.package.clone());
    let parser = TypeParser::new(&import_path, &raw.imports);

    let mut interfaces = Vec::with_capacity(raw.interfaces.len());
    for raw_iface in raw.interfaces {
        let mut iface = Interface::new(raw_iface.name);
        iface.docs = raw_iface.docs;
        for raw_method in raw_iface.methods {
            let mut method = Signature::new(raw_method.name);
            method.docs = raw_method.docs;
            method.args = resolve_fields(&ctx, &parser, raw_method.args)?;
            method.results = resolve_fields(&ctx, &parser, raw_method.results)?;
            iface = iface.method(method);
        }
        interfaces.push(iface);
    }

    let service = interfaces
        .iter()
        .position(|iface| iface.tags().has(MAIN_TAG))
        .ok_or_else(|| ctx.no_interface_error())?;

    Ok(Manifest {
        package: raw.package,
        import_path,
        interfaces,
        service,
    })
}

fn resolve_fields(
    ctx: &SourceContext<'_>,
    parser: &TypeParser<'_>,
    fields: Vec<RawField>,
) -> Result<Vec<Field>> {
    fields
        .into_iter()
        .map(|field| {
            let ty = parser
                .parse(&field.ty)
                .map_err(|reason| ctx.invalid_type_error(&field.ty, reason))?;
            Ok(Field::new(field.name, ty))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use kitgen_ir::TypeExpr;

    use super::*;

    const STRINGSVC: &str = r#"
package = "stringsvc"
import_path = "github.com/acme/stringsvc"

[imports]
pb = "github.com/acme/protobuf/stringsvc"

[[interfaces]]
name = "Helper"

[[interfaces]]
name = "StringService"
docs = ["// @microgen middleware, logging"]

[[interfaces.methods]]
name = "Uppercase"
args = [{ name = "ctx", type = "context.Context" }, { name = "s", type = "string" }]
results = [{ name = "result", type = "*User" }, { name = "err", type = "error" }]

[[interfaces.methods]]
name = "Ping"
results = [{ type = "error" }]
"#;

    #[test]
    fn test_parse_selects_tagged_interface() {
        let manifest: Manifest = STRINGSVC.parse().unwrap();
        assert_eq!(manifest.package, "stringsvc");
        let names: Vec<_> = manifest.interfaces().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Helper", "StringService"]);

        let service = manifest.service();
        assert_eq!(service.name, "StringService");
        assert_eq!(service.methods.len(), 2);
        assert_eq!(service.methods[0].args[0].ty, TypeExpr::context());
        assert_eq!(
            service.methods[0].results[0].ty,
            TypeExpr::pointer(1, TypeExpr::qualified("github.com/acme/stringsvc", "User"))
        );
        assert!(service.methods[1].results[0].is_anonymous());
    }

    #[test]
    fn test_import_path_defaults_to_package() {
        let manifest: Manifest = r#"
package = "adder"

[[interfaces]]
name = "Adder"
docs = ["// @microgen"]

[[interfaces.methods]]
name = "Add"
args = [{ name = "a", type = "Number" }]
"#
        .parse()
        .unwrap();
        assert_eq!(manifest.import_path, "adder");
        assert_eq!(
            manifest.service().methods[0].args[0].ty,
            TypeExpr::qualified("adder", "Number")
        );
    }

    #[test]
    fn test_no_tagged_interface() {
        let err = "package = \"x\"\n[[interfaces]]\nname = \"X\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::NoInterface { .. }));
    }

    #[test]
    fn test_invalid_type_has_span() {
        let src = "package = \"x\"\n[[interfaces]]\nname = \"X\"\ndocs = [\"@microgen\"]\n\
                   [[interfaces.methods]]\nname = \"M\"\nargs = [{ name = \"a\", type = \"map[int\" }]\n";
        let err = Manifest::from_str_with_filename(src, "x.toml").unwrap_err();
        match *err {
            Error::InvalidType { ty, span, .. } => {
                assert_eq!(ty, "map[int");
                assert_eq!(span.map(|s| s.len()), Some(7));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_for_unknown_field() {
        let err = "package = \"x\"\nversion = 2\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("svc.toml");
        std::fs::write(&path, STRINGSVC).unwrap();
        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.service().name, "StringService");

        let err = Manifest::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_import_path_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("svc.toml");
        std::fs::write(&path, STRINGSVC).unwrap();

        let manifest = Manifest::open(&path, Some("example.com/strings")).unwrap();
        assert_eq!(manifest.import_path, "example.com/strings");
        assert_eq!(
            manifest.service().methods[0].results[0].ty,
            TypeExpr::pointer(1, TypeExpr::qualified("example.com/strings", "User"))
        );
    }
}
