//! go-kit templates and the catalogue that selects them.

mod endpoints;
mod exchanges;
mod grpc_client;
mod grpc_server;
mod logging;
mod middleware;
mod recovering;

pub use endpoints::EndpointsTemplate;
pub use exchanges::ExchangesTemplate;
pub use grpc_client::GrpcClientTemplate;
pub use grpc_server::GrpcServerTemplate;
pub use logging::LoggingTemplate;
pub use middleware::MiddlewareTemplate;
pub use recovering::RecoveringTemplate;

use kitgen_codegen::{TemplateFactory, transform::last_result_error_name};
use kitgen_ir::{Field, Interface, MAIN_TAG, Signature, TypeExpr};

pub const PACKAGE_CONTEXT: &str = "context";
pub const PACKAGE_FMT: &str = "fmt";
pub const PACKAGE_TIME: &str = "time";
pub const PACKAGE_GOKIT_ENDPOINT: &str = "github.com/go-kit/kit/endpoint";
pub const PACKAGE_GOKIT_LOG: &str = "github.com/go-kit/kit/log";
pub const PACKAGE_GOKIT_GRPC: &str = "github.com/go-kit/kit/transport/grpc";
pub const PACKAGE_GOOGLE_GRPC: &str = "google.golang.org/grpc";
pub const PACKAGE_EMPTY_PROTOBUF: &str = "github.com/golang/protobuf/ptypes/empty";

/// Generator categories an interface opts into with `// @microgen`.
pub mod tags {
    pub const MIDDLEWARE: &str = "middleware";
    pub const LOGGING: &str = "logging";
    pub const RECOVER: &str = "recover";
    /// Accepted by `// @force` next to [`RECOVER`].
    pub const RECOVERING: &str = "recovering";
    pub const GRPC: &str = "grpc";
    pub const GRPC_SERVER: &str = "grpc-server";
    pub const GRPC_CLIENT: &str = "grpc-client";
}

/// The templates that apply to `iface`.
///
/// Exchanges and endpoints always apply; the rest are gated by the arguments
/// of the interface's `// @microgen` tag.
pub fn templates_for(iface: &Interface) -> Vec<TemplateFactory> {
    let tags = iface.tags();
    let enabled = |categories: &[&str]| tags.contains_any(MAIN_TAG, categories);

    let mut factories: Vec<TemplateFactory> = vec![ExchangesTemplate::boxed, EndpointsTemplate::boxed];
    if enabled(&[tags::MIDDLEWARE]) {
        factories.push(MiddlewareTemplate::boxed);
    }
    if enabled(&[tags::LOGGING]) {
        factories.push(LoggingTemplate::boxed);
    }
    if enabled(&[tags::RECOVER]) {
        factories.push(RecoveringTemplate::boxed);
    }
    if enabled(&[tags::GRPC, tags::GRPC_SERVER]) {
        factories.push(GrpcServerTemplate::boxed);
    }
    if enabled(&[tags::GRPC, tags::GRPC_CLIENT]) {
        factories.push(GrpcClientTemplate::boxed);
    }
    factories
}

pub(crate) fn request_struct_name(signature: &Signature) -> String {
    format!("{}Request", signature.name)
}

pub(crate) fn response_struct_name(signature: &Signature) -> String {
    format!("{}Response", signature.name)
}

pub(crate) fn endpoint_name(signature: &Signature) -> String {
    format!("{}Endpoint", signature.name)
}

/// Results with an anonymous trailing `error` given its conventional name,
/// so the list can be used with named-result returns.
pub(crate) fn named_results(signature: &Signature) -> Vec<Field> {
    let err_name = last_result_error_name(signature);
    signature
        .results
        .iter()
        .map(|field| {
            if field.is_anonymous() {
                Field::new(err_name, field.ty.clone())
            } else {
                field.clone()
            }
        })
        .collect()
}

/// `base`, or `base` with the smallest numeric suffix that is not in `taken`.
pub(crate) fn free_name(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|t| t == base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// The service interface as a type, qualified by the service import path.
pub(crate) fn service_type(import_path: &str, iface: &Interface) -> TypeExpr {
    TypeExpr::qualified(import_path, iface.name.clone())
}
