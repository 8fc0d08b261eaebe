//! Raw TOML schema, before types are resolved.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Root of an interface description file.
///
/// ```toml
/// package = "stringsvc"
/// import_path = "github.com/acme/stringsvc"
///
/// [imports]
/// pb = "github.com/acme/protobuf/stringsvc"
///
/// [[interfaces]]
/// name = "StringService"
/// docs = ["// @microgen middleware, logging"]
///
/// [[interfaces.methods]]
/// name = "Uppercase"
/// args = [{ name = "ctx", type = "context.Context" }, { name = "s", type = "string" }]
/// results = [{ name = "result", type = "string" }, { name = "err", type = "error" }]
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawManifest {
    pub package: String,
    #[serde(default)]
    pub import_path: Option<String>,
    /// Package alias to import path.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
    #[serde(default)]
    pub interfaces: Vec<RawInterface>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawInterface {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawMethod {
    pub name: String,
    #[serde(default)]
    pub docs: Vec<String>,
    #[serde(default)]
    pub args: Vec<RawField>,
    #[serde(default)]
    pub results: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawField {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}
