use kitgen_codegen::{
    GenerationInfo, ImportCollector, Overwrite, Template,
    render::TypeRenderer,
    transform::{strip_leading_context, strip_trailing_error},
};
use kitgen_core::{Result, WriteStrategy, to_snake_case, to_upper_first};
use kitgen_ir::Field;

use super::{request_struct_name, response_struct_name};
use crate::{
    GoFile,
    ast::{self, Struct},
};

const VARIADIC_NOTE: &str = "This field was defined with ellipsis (...).";
const EMPTY_EXCHANGE_NOTE: &str = "Formal exchange type, please do not delete.";

/// Request and response structs for every method, in the service package.
///
/// ```go
/// type CountRequest struct {
/// 	Text string `json:"text"`
/// }
///
/// type CountResponse struct {
/// 	Count int `json:"count"`
/// }
/// ```
pub struct ExchangesTemplate {
    info: GenerationInfo,
}

impl ExchangesTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self { info }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }

    fn exchange(&self, renderer: &TypeRenderer<'_>, name: String, fields: &[Field]) -> Struct {
        if fields.is_empty() {
            return Struct::new(name).doc(EMPTY_EXCHANGE_NOTE);
        }
        Struct::new(name).fields(fields.iter().map(|field| exchange_field(renderer, field)))
    }
}

/// A struct field with a snake_case json tag. Variadics are stored as slices.
fn exchange_field(renderer: &TypeRenderer<'_>, field: &Field) -> ast::Field {
    let out = ast::Field::new(
        to_upper_first(&field.name),
        renderer.render(&field.ty, false),
    )
    .tag(format!("json:\"{}\"", to_snake_case(&field.name)));
    if field.ty.is_variadic() {
        out.comment(VARIADIC_NOTE)
    } else {
        out
    }
}

impl Template for ExchangesTemplate {
    fn name(&self) -> &'static str {
        "exchanges"
    }

    fn default_path(&self) -> &'static str {
        "exchanges.go"
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self.info.decide(self.default_path(), Overwrite::Always, false))
    }

    fn render(&self) -> String {
        let import_path = self.info.service_import_path.as_str();
        let mut imports = ImportCollector::local_to(import_path);
        for method in &self.info.iface.methods {
            imports.add_fields(strip_leading_context(&method.args));
            imports.add_fields(strip_trailing_error(&method.results));
        }

        let renderer = TypeRenderer::local_to(import_path).with_imports(&imports);
        let mut structs = Vec::new();
        for method in &self.info.iface.methods {
            let args = strip_leading_context(&method.args);
            let results = strip_trailing_error(&method.results);
            structs.push(self.exchange(&renderer, request_struct_name(method), args));
            structs.push(self.exchange(&renderer, response_struct_name(method), results));
        }

        GoFile::new(&self.info.service_package, Overwrite::Always)
            .imports(imports)
            .add_all(structs)
            .render()
    }
}
