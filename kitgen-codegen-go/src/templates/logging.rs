use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template,
    render::{TypeRenderer, render_call_args},
    transform::strip_leading_context,
};
use kitgen_core::{Result, WriteStrategy, last_upper_or_first, to_lower_first};
use kitgen_ir::Signature;

use super::{
    PACKAGE_GOKIT_LOG, PACKAGE_TIME,
    middleware::{MIDDLEWARE_PACKAGE, wrapper_decls},
    named_results, service_type, tags,
};
use crate::{GoFile, ast::Func};

const WRAPPER: &str = "serviceLogging";

/// A logging wrapper that logs the arguments, results and duration of every
/// call. Hand-editable: an existing file is kept unless forced.
pub struct LoggingTemplate {
    info: GenerationInfo,
    tag_force: bool,
}

impl LoggingTemplate {
    pub fn new(info: GenerationInfo) -> Self {
        Self {
            info,
            tag_force: false,
        }
    }

    pub fn boxed(info: &GenerationInfo) -> Box<dyn Template> {
        Box::new(Self::new(info.clone()))
    }

    fn method(&self, renderer: &TypeRenderer<'_>, method: &Signature) -> Func {
        let receiver = last_upper_or_first(WRAPPER);
        let results = named_results(method);

        let mut log_lines = vec![CodeFragment::line(format!(
            "\"method\", \"{}\",",
            method.name
        ))];
        for field in strip_leading_context(&method.args).iter().chain(&results) {
            let name = to_lower_first(&field.name);
            log_lines.push(CodeFragment::line(format!("\"{0}\", {0},", name)));
        }
        log_lines.push(CodeFragment::line("\"took\", time.Since(begin),"));

        let call = format!(
            "{}.next.{}({})",
            receiver,
            method.name,
            render_call_args(&method.args)
        );

        Func::new(&method.name)
            .receiver(&receiver, WRAPPER)
            .params(renderer.params(&method.args))
            .results(renderer.results(&results))
            .fragment(CodeFragment::block_with_close(
                "defer func(begin time.Time) {",
                vec![CodeFragment::block_with_close(
                    format!("{}.logger.Log(", receiver),
                    log_lines,
                    ")",
                )],
                "}(time.Now())",
            ))
            .line(if results.is_empty() {
                call
            } else {
                format!("return {}", call)
            })
    }
}

impl Template for LoggingTemplate {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn default_path(&self) -> &'static str {
        "middleware/logging.go"
    }

    fn prepare(&mut self) -> Result<()> {
        self.tag_force = self.info.forced_by_tags(&[tags::LOGGING]);
        Ok(())
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self
            .info
            .decide(self.default_path(), Overwrite::IfMissing, self.tag_force))
    }

    fn render(&self) -> String {
        let mut imports = ImportCollector::new();
        imports.add(PACKAGE_GOKIT_LOG);
        imports.add(PACKAGE_TIME);
        imports.add(&self.info.service_import_path);
        for method in &self.info.iface.methods {
            imports.add_fields(&method.args);
            imports.add_fields(&method.results);
        }

        let renderer = TypeRenderer::default().with_imports(&imports);
        let service = renderer.render(
            &service_type(&self.info.service_import_path, &self.info.iface),
            false,
        );
        let methods: Vec<Func> = self
            .info
            .iface
            .methods
            .iter()
            .map(|m| self.method(&renderer, m))
            .collect();

        let (constructor, wrapper) = wrapper_decls(
            "LoggingMiddleware",
            "LoggingMiddleware writes params, results and working time of method call to provided logger after its execution.",
            WRAPPER,
            &service,
        );

        GoFile::new(MIDDLEWARE_PACKAGE, Overwrite::IfMissing)
            .imports(imports)
            .add(constructor)
            .add(wrapper)
            .add_all(methods)
            .render()
    }
}
