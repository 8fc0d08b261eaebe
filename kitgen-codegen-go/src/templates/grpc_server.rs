use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template,
    render::TypeRenderer,
    transform::{strip_leading_context, strip_trailing_error},
};
use kitgen_core::{Error, Result, WriteStrategy, last_upper_or_first, to_lower_first};
use kitgen_ir::{Interface, Signature, TypeExpr};

use super::{
    PACKAGE_CONTEXT, PACKAGE_EMPTY_PROTOBUF, PACKAGE_GOKIT_GRPC, endpoint_name,
    request_struct_name, response_struct_name, tags,
};
use crate::{
    GoFile,
    ast::{Field, Func, Struct},
};

/// Go package of the gRPC transport artifacts.
pub(crate) const TRANSPORT_PACKAGE: &str = "transportgrpc";

/// Alias the generated protobuf package is imported under.
pub(crate) const PB_ALIAS: &str = "pb";

/// Import path of the request/response converters for a service.
pub(crate) fn converter_path(service_import_path: &str) -> String {
    format!(
        "{}/transport/converter/protobuf",
        service_import_path.trim_end_matches('/')
    )
}

/// The protobuf request type of a method, or `*empty.Empty` when nothing
/// remains after stripping the context.
pub(crate) fn pb_request(method: &Signature) -> String {
    if strip_leading_context(&method.args).is_empty() {
        "*empty.Empty".to_string()
    } else {
        format!("*{}.{}", PB_ALIAS, request_struct_name(method))
    }
}

/// The protobuf response type of a method, or `*empty.Empty` when nothing
/// remains after stripping the error.
pub(crate) fn pb_response(method: &Signature) -> String {
    if strip_trailing_error(&method.results).is_empty() {
        "*empty.Empty".to_string()
    } else {
        format!("*{}.{}", PB_ALIAS, response_struct_name(method))
    }
}

/// Whether any method needs the well-known empty message.
pub(crate) fn uses_empty(iface: &Interface) -> bool {
    iface.methods.iter().any(|m| {
        strip_leading_context(&m.args).is_empty() || strip_trailing_error(&m.results).is_empty()
    })
}

/// `alias.name` for a declaration of the package at `path`.
pub(crate) fn qualified(renderer: &TypeRenderer<'_>, path: &str, name: &str) -> String {
    renderer.render(&TypeExpr::qualified(path, name), false)
}

/// Error message when the protobuf package is not configured.
pub(crate) const PROTOBUF_REQUIRED: &str = "protobuf package is empty";

/// The gRPC server adapter: one go-kit handler per method, exposed as the
/// protobuf service server interface.
pub struct GrpcServerTemplate {
    info: GenerationInfo,
    tag_force: bool,
}

impl GrpcServerTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self {
            info,
            tag_force: false,
        }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }

    fn server_struct_name(&self) -> String {
        format!("{}Server", to_lower_first(&self.info.iface.name))
    }

    fn constructor(&self, renderer: &TypeRenderer<'_>, server: &str) -> Func {
        let converter = converter_path(&self.info.service_import_path);
        let handlers = self
            .info
            .iface
            .methods
            .iter()
            .map(|m| {
                CodeFragment::block_with_close(
                    format!("{}: grpc.NewServer(", to_lower_first(&m.name)),
                    vec![
                        CodeFragment::line(format!("endpoints.{},", endpoint_name(m))),
                        CodeFragment::line(format!(
                            "{},",
                            qualified(renderer, &converter, &format!("Decode{}", request_struct_name(m)))
                        )),
                        CodeFragment::line(format!(
                            "{},",
                            qualified(renderer, &converter, &format!("Encode{}", response_struct_name(m)))
                        )),
                        CodeFragment::line("opts...,"),
                    ],
                    "),",
                )
            })
            .collect();

        Func::new("NewGRPCServer")
            .params(format!(
                "endpoints *{}, opts ...grpc.ServerOption",
                qualified(renderer, &self.info.service_import_path, "Endpoints")
            ))
            .results(format!("{}.{}Server", PB_ALIAS, self.info.grpc_service()))
            .fragment(CodeFragment::block(format!("return &{}{{", server), handlers))
    }

    fn method(&self, server: &str, method: &Signature) -> Func {
        let receiver = last_upper_or_first(server);
        let response = pb_response(method);
        Func::new(&method.name)
            .receiver(&receiver, server)
            .params(format!("ctx context.Context, req {}", pb_request(method)))
            .results(format!("({}, error)", response))
            .line(format!(
                "_, resp, err := {}.{}.ServeGRPC(ctx, req)",
                receiver,
                to_lower_first(&method.name)
            ))
            .fragment(CodeFragment::block(
                "if err != nil {",
                vec![CodeFragment::line("return nil, err")],
            ))
            .line(format!("return resp.({}), nil", response))
    }
}

impl Template for GrpcServerTemplate {
    fn name(&self) -> &'static str {
        "grpc-server"
    }

    fn default_path(&self) -> &'static str {
        "transport/grpc/server.go"
    }

    fn prepare(&mut self) -> Result<()> {
        if self.info.protobuf_package.is_none() {
            return Err(Error::config(self.name(), PROTOBUF_REQUIRED));
        }
        self.tag_force = self
            .info
            .forced_by_tags(&[tags::GRPC, tags::GRPC_SERVER]);
        Ok(())
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self
            .info
            .decide(self.default_path(), Overwrite::IfMissing, self.tag_force))
    }

    fn render(&self) -> String {
        let server = self.server_struct_name();
        let methods = &self.info.iface.methods;

        let mut imports = ImportCollector::new();
        imports.add(PACKAGE_CONTEXT);
        imports.add(PACKAGE_GOKIT_GRPC);
        if let Some(pb) = &self.info.protobuf_package {
            imports.add_aliased(pb, PB_ALIAS);
        }
        if uses_empty(&self.info.iface) {
            imports.add(PACKAGE_EMPTY_PROTOBUF);
        }
        imports.add(&self.info.service_import_path);
        imports.add(&converter_path(&self.info.service_import_path));
        let renderer = TypeRenderer::default().with_imports(&imports);
        let constructor = self.constructor(&renderer, &server);

        let handlers = Struct::new(&server).fields(
            methods
                .iter()
                .map(|m| Field::new(to_lower_first(&m.name), "grpc.Handler")),
        );

        GoFile::new(TRANSPORT_PACKAGE, Overwrite::IfMissing)
            .imports(imports)
            .add(handlers)
            .add(constructor)
            .add_all(methods.iter().map(|m| self.method(&server, m)))
            .render()
    }
}
