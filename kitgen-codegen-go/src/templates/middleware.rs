use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template, render::TypeRenderer,
};
use kitgen_core::{Result, WriteStrategy};

use super::service_type;
use crate::{
    GoFile,
    ast::{Field, Func, Struct},
};

/// Go package of the middleware artifacts.
pub(crate) const MIDDLEWARE_PACKAGE: &str = "middleware";

/// Constructor and struct of a service wrapper that holds a logger and the
/// next service in the chain.
///
/// ```go
/// func LoggingMiddleware(logger log.Logger) Middleware {
/// 	return func(next svc.StringService) svc.StringService {
/// 		return &serviceLogging{
/// 			logger: logger,
/// 			next:   next,
/// 		}
/// 	}
/// }
/// ```
pub(crate) fn wrapper_decls(constructor: &str, doc: &str, wrapper: &str, service: &str) -> (Func, Struct) {
    let constructor = Func::new(constructor)
        .doc(doc)
        .params("logger log.Logger")
        .results("Middleware")
        .fragment(CodeFragment::block(
            format!("return func(next {0}) {0} {{", service),
            vec![CodeFragment::block(
                format!("return &{}{{", wrapper),
                vec![
                    CodeFragment::line("logger: logger,"),
                    CodeFragment::line("next:   next,"),
                ],
            )],
        ));
    let wrapper = Struct::new(wrapper)
        .field(Field::new("logger", "log.Logger"))
        .field(Field::new("next", service));
    (constructor, wrapper)
}

/// The `Middleware` closure type shared by the middleware artifacts.
pub struct MiddlewareTemplate {
    info: GenerationInfo,
}

impl MiddlewareTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self { info }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }
}

impl Template for MiddlewareTemplate {
    fn name(&self) -> &'static str {
        "middleware"
    }

    fn default_path(&self) -> &'static str {
        "middleware/middleware.go"
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self.info.decide(self.default_path(), Overwrite::Always, false))
    }

    fn render(&self) -> String {
        let mut imports = ImportCollector::new();
        imports.add(&self.info.service_import_path);

        let service = TypeRenderer::default().with_imports(&imports).render(
            &service_type(&self.info.service_import_path, &self.info.iface),
            false,
        );

        GoFile::new(MIDDLEWARE_PACKAGE, Overwrite::Always)
            .imports(imports)
            .add(CodeFragment::sequence(vec![
                CodeFragment::comment("Service middleware (closure)."),
                CodeFragment::line(format!("type Middleware func({0}) {0}", service)),
            ]))
            .render()
    }
}
