use kitgen_codegen::{
    CodeFragment, GenerationInfo, ImportCollector, Overwrite, Template,
    render::{TypeRenderer, render_call_args},
    transform::{is_error_last, last_result_error_name},
};
use kitgen_core::{Result, WriteStrategy, last_upper_or_first, to_lower_first};
use kitgen_ir::Signature;

use super::{
    PACKAGE_FMT, PACKAGE_GOKIT_LOG,
    middleware::{MIDDLEWARE_PACKAGE, wrapper_decls},
    named_results, service_type, tags,
};
use crate::{GoFile, ast::Func};

const WRAPPER: &str = "serviceRecovering";

/// A wrapper that turns panics into logged method errors.
pub struct RecoveringTemplate {
    info: GenerationInfo,
    tag_force: bool,
}

impl RecoveringTemplate {
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

        let mut on_panic = vec![CodeFragment::line(format!(
            "{}.logger.Log(\"method\", \"{}\", \"message\", p)",
            receiver, method.name
        ))];
        if is_error_last(&method.results) {
            on_panic.push(CodeFragment::line(format!(
                "{} = fmt.Errorf(\"%v\", p)",
                to_lower_first(last_result_error_name(method))
            )));
        }

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
                "defer func() {",
                vec![CodeFragment::block("if p := recover(); p != nil {", on_panic)],
                "}()",
            ))
            .line(if results.is_empty() {
                call
            } else {
                format!("return {}", call)
            })
    }
}

impl Template for RecoveringTemplate {
    fn name(&self) -> &'static str {
        "recovering"
    }

    fn default_path(&self) -> &'static str {
        "middleware/recovering.go"
    }

    fn prepare(&mut self) -> Result<()> {
        self.tag_force = self.info.forced_by_tags(&[tags::RECOVER, tags::RECOVERING]);
        Ok(())
    }

    fn choose_strategy(&self) -> Result<WriteStrategy> {
        Ok(self
            .info
            .decide(self.default_path(), Overwrite::IfMissing, self.tag_force))
    }

    fn render(&self) -> String {
        let methods = &self.info.iface.methods;
        let mut imports = ImportCollector::new();
        imports.add(PACKAGE_GOKIT_LOG);
        if methods.iter().any(|m| is_error_last(&m.results)) {
            imports.add(PACKAGE_FMT);
        }
        imports.add(&self.info.service_import_path);
        for method in methods {
            imports.add_fields(&method.args);
            imports.add_fields(&method.results);
        }

        let renderer = TypeRenderer::default().with_imports(&imports);
        let service = renderer.render(
            &service_type(&self.info.service_import_path, &self.info.iface),
            false,
        );
        let funcs: Vec<Func> = methods.iter().map(|m| self.method(&renderer, m)).collect();

        let (constructor, wrapper) = wrapper_decls(
            "RecoveringMiddleware",
            "RecoveringMiddleware recovers panics from method calls, writes to provided logger and returns the error of panic as method error.",
            WRAPPER,
            &service,
        );

        GoFile::new(MIDDLEWARE_PACKAGE, Overwrite::IfMissing)
            .imports(imports)
            .add(constructor)
            .add(wrapper)
            .add_all(funcs)
            .render()
    }
}
