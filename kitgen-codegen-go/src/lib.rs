//! go-kit service templates for the kitgen generator.
//!
//! Each template produces one Go file from the service interface:
//!
//! - `exchanges.go` - request/response structs per method
//! - `endpoints.go` - the `Endpoints` set and endpoint constructors
//! - `middleware/` - the middleware type, logging and recovering wrappers
//! - `transport/grpc/` - gRPC server and client adapters
//!
//! [`templates_for`] selects the templates an interface opts into.

mod go_file;

pub mod ast;
pub mod templates;

pub use go_file::GoFile;
pub use templates::{
    EndpointsTemplate, ExchangesTemplate, GrpcClientTemplate, GrpcServerTemplate,
    LoggingTemplate, MiddlewareTemplate, RecoveringTemplate, templates_for,
};

/// Version stamped into generated file headers.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
