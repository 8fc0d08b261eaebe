use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template,
    render::{TypeRenderer, package_alias},
};
use kitgen_core::{Error, Result, WriteStrategy};
use kitgen_ir::Signature;

use super::{
    PACKAGE_EMPTY_PROTOBUF, PACKAGE_GOKIT_GRPC, PACKAGE_GOOGLE_GRPC, endpoint_name,
    grpc_server::{
        PB_ALIAS, PROTOBUF_REQUIRED, TRANSPORT_PACKAGE, converter_path, pb_response, qualified,
        uses_empty,
    },
    request_struct_name, response_struct_name, service_type, tags,
};
use crate::{GoFile, ast::Func};

/// Alias of the go-kit gRPC transport, which collides with the gRPC runtime.
const GOKIT_GRPC_ALIAS: &str = "grpckit";

/// The gRPC client adapter: service endpoints backed by go-kit gRPC clients.
pub struct GrpcClientTemplate {
    info: GenerationInfo,
    tag_force: bool,
}

impl GrpcClientTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self {
            info,
            tag_force: false,
        }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }

    /// Fully qualified protobuf service name, `<package>.<Service>`.
    fn service_name(&self) -> String {
        let package = self
            .info
            .protobuf_package
            .as_deref()
            .map(package_alias)
            .unwrap_or_default();
        format!("{}.{}", package, self.info.grpc_service())
    }

    fn client_endpoint(&self, renderer: &TypeRenderer<'_>, method: &Signature) -> CodeFragment {
        // the reply prototype is a value, not a pointer
        let reply = pb_response(method).trim_start_matches('*').to_string();
        let converter = converter_path(&self.info.service_import_path);
        CodeFragment::block_with_close(
            format!("{}: {}.NewClient(", endpoint_name(method), GOKIT_GRPC_ALIAS),
            vec![
                CodeFragment::line("conn,"),
                CodeFragment::line(format!("\"{}\",", self.service_name())),
                CodeFragment::line(format!("\"{}\",", method.name)),
                CodeFragment::line(format!(
                    "{},",
                    qualified(renderer, &converter, &format!("Encode{}", request_struct_name(method)))
                )),
                CodeFragment::line(format!(
                    "{},",
                    qualified(renderer, &converter, &format!("Decode{}", response_struct_name(method)))
                )),
                CodeFragment::line(format!("{}{{}},", reply)),
                CodeFragment::line("opts...,"),
            ],
            ").Endpoint(),",
        )
    }
}

impl Template for GrpcClientTemplate {
    fn name(&self) -> &'static str {
        "grpc-client"
    }

    fn default_path(&self) -> &'static str {
        "transport/grpc/client.go"
    }

    fn prepare(&mut self) -> Result<()> {
        if self.info.protobuf_package.is_none() {
            return Err(Error::config(self.name(), PROTOBUF_REQUIRED));
        }
        self.tag_force = self
            .info
            .forced_by_tags(&[tags::GRPC, tags::GRPC_CLIENT]);
        Ok(())
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self
            .info
            .decide(self.default_path(), Overwrite::IfMissing, self.tag_force))
    }

    fn render(&self) -> String {
        let import_path = self.info.service_import_path.as_str();

        let mut imports = ImportCollector::new();
        imports.add_aliased(PACKAGE_GOKIT_GRPC, GOKIT_GRPC_ALIAS);
        imports.add(PACKAGE_GOOGLE_GRPC);
        if let Some(pb) = &self.info.protobuf_package {
            imports.add_aliased(pb, PB_ALIAS);
        }
        if uses_empty(&self.info.iface) {
            imports.add(PACKAGE_EMPTY_PROTOBUF);
        }
        imports.add(import_path);
        imports.add(&converter_path(import_path));

        let renderer = TypeRenderer::default().with_imports(&imports);
        let service = renderer.render(&service_type(import_path, &self.info.iface), false);
        let endpoints = self
            .info
            .iface
            .methods
            .iter()
            .map(|m| self.client_endpoint(&renderer, m))
            .collect();

        let constructor = Func::new("NewGRPCClient")
            .params(format!(
                "conn *grpc.ClientConn, opts ...{}.ClientOption",
                GOKIT_GRPC_ALIAS
            ))
            .results(service)
            .fragment(CodeFragment::block(
                format!("return &{}{{", qualified(&renderer, import_path, "Endpoints")),
                endpoints,
            ));

        GoFile::new(TRANSPORT_PACKAGE, Overwrite::IfMissing)
            .imports(imports)
            .add(constructor)
            .render()
    }
}
