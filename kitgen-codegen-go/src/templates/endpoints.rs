use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template,
    render::TypeRenderer,
    transform::{
        is_context_first, is_error_last, last_result_error_name, strip_leading_context,
        strip_trailing_error,
    },
};
use kitgen_core::{Result, WriteStrategy, to_lower_first, to_upper_first};
use kitgen_ir::{Field, Signature};

use super::{
    PACKAGE_CONTEXT, PACKAGE_GOKIT_ENDPOINT, endpoint_name, free_name, named_results,
    request_struct_name, response_struct_name, service_type,
};
use crate::{
    GoFile,
    ast::{self, Func, Struct},
};

/// The `Endpoints` set plus one endpoint constructor per method.
///
/// `Endpoints` implements the service interface itself, so a client built
/// from transport endpoints can stand in for the service.
pub struct EndpointsTemplate {
    info: GenerationInfo,
}

impl EndpointsTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self { info }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }

    fn endpoints_struct(&self) -> Struct {
        Struct::new("Endpoints")
            .doc("Endpoints collects all of the endpoints that compose the service.")
            .fields(
                self.info
                    .iface
                    .methods
                    .iter()
                    .map(|m| ast::Field::new(endpoint_name(m), "endpoint.Endpoint")),
            )
    }

    /// The service method implemented on `Endpoints`.
    ///
    /// The receiver and locals are renamed when the signature uses their names.
    fn client_method(&self, renderer: &TypeRenderer<'_>, method: &Signature) -> Func {
        let request_fields = strip_leading_context(&method.args);
        let residual = strip_trailing_error(&method.results);
        let results = named_results(method);
        let ctx = if is_context_first(&method.args) {
            to_lower_first(&method.args[0].name)
        } else {
            "context.Background()".to_string()
        };

        let taken: Vec<String> = method
            .args
            .iter()
            .chain(&results)
            .map(|f| to_lower_first(&f.name))
            .collect();
        let receiver = free_name("e", &taken);
        let request = free_name("request", &taken);
        let response = free_name("response", &taken);

        let call = format!(
            "{}.{}({}, &{})",
            receiver,
            endpoint_name(method),
            ctx,
            request
        );
        let cast = format!("{}.(*{})", response, response_struct_name(method));
        let values: Vec<String> = residual
            .iter()
            .map(|f| format!("{}.{}", cast, to_upper_first(&f.name)))
            .collect();

        let mut body = vec![CodeFragment::line(format!(
            "{} := {}{{{}}}",
            request,
            request_struct_name(method),
            key_values(request_fields)
        ))];

        if is_error_last(&method.results) {
            let err = to_lower_first(last_result_error_name(method));
            if values.is_empty() {
                body.push(CodeFragment::line(format!("_, {} = {}", err, call)));
                body.push(CodeFragment::line("return"));
            } else {
                body.push(CodeFragment::line(format!("{}, {} := {}", response, err, call)));
                body.push(CodeFragment::block(
                    format!("if {} != nil {{", err),
                    vec![CodeFragment::line("return")],
                ));
                body.push(CodeFragment::line(format!(
                    "return {}, {}",
                    values.join(", "),
                    err
                )));
            }
        } else if values.is_empty() {
            body.push(CodeFragment::line(call));
        } else {
            body.push(CodeFragment::line(format!("{}, _ := {}", response, call)));
            body.push(CodeFragment::line(format!("return {}", values.join(", "))));
        }

        Func::new(&method.name)
            .receiver(&receiver, "Endpoints")
            .params(renderer.params(&method.args))
            .results(renderer.results(&results))
            .fragments(body)
    }

    /// `CountEndpoint(svc StringService) endpoint.Endpoint`
    fn endpoint_constructor(&self, renderer: &TypeRenderer<'_>, method: &Signature) -> Func {
        let request_fields = strip_leading_context(&method.args);
        let residual = strip_trailing_error(&method.results);
        let error_last = is_error_last(&method.results);

        let mut outputs: Vec<String> = residual.iter().map(|f| to_lower_first(&f.name)).collect();
        if error_last {
            outputs.push("err".to_string());
        }
        let ctx = free_name("ctx", &outputs);
        let request = free_name("request", &outputs);
        let req = free_name("req", &outputs);

        let mut args: Vec<String> = Vec::new();
        if is_context_first(&method.args) {
            args.push(ctx.clone());
        }
        args.extend(request_fields.iter().map(|f| {
            let value = format!("{}.{}", req, to_upper_first(&f.name));
            if f.ty.is_variadic() {
                format!("{}...", value)
            } else {
                value
            }
        }));

        let mut body = Vec::new();
        if !request_fields.is_empty() {
            body.push(CodeFragment::line(format!(
                "{} := {}.(*{})",
                req,
                request,
                request_struct_name(method)
            )));
        }
        let call = format!("svc.{}({})", method.name, args.join(", "));
        if outputs.is_empty() {
            body.push(CodeFragment::line(call));
        } else {
            body.push(CodeFragment::line(format!("{} := {}", outputs.join(", "), call)));
        }
        body.push(CodeFragment::line(format!(
            "return &{}{{{}}}, {}",
            response_struct_name(method),
            key_values(residual),
            if error_last { "err" } else { "nil" }
        )));

        let service = renderer.render(&service_type(&self.info.service_import_path, &self.info.iface), false);
        Func::new(endpoint_name(method))
            .params(format!("svc {}", service))
            .results("endpoint.Endpoint")
            .fragment(CodeFragment::block(
                format!(
                    "return func({} context.Context, {} interface{{}}) (interface{{}}, error) {{",
                    ctx, request
                ),
                body,
            ))
    }
}

/// `Text: text, Symbol: symbol`
fn key_values(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", to_upper_first(&f.name), to_lower_first(&f.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Template for EndpointsTemplate {
    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn default_path(&self) -> &'static str {
        "endpoints.go"
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self.info.decide(self.default_path(), Overwrite::Always, false))
    }

    fn render(&self) -> String {
        let import_path = self.info.service_import_path.as_str();
        let methods = &self.info.iface.methods;
        let mut imports = ImportCollector::local_to(import_path);
        imports.add(PACKAGE_CONTEXT);
        imports.add(PACKAGE_GOKIT_ENDPOINT);
        for method in methods {
            imports.add_fields(&method.args);
            imports.add_fields(&method.results);
        }

        let renderer = TypeRenderer::local_to(import_path).with_imports(&imports);
        let clients: Vec<Func> = methods.iter().map(|m| self.client_method(&renderer, m)).collect();
        let constructors: Vec<Func> = methods
            .iter()
            .map(|m| self.endpoint_constructor(&renderer, m))
            .collect();

        GoFile::new(&self.info.service_package, Overwrite::Always)
            .imports(imports)
            .add(self.endpoints_struct())
            .add_all(clients)
            .add_all(constructors)
            .render()
    }
}
