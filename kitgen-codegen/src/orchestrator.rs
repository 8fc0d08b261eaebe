//! Concurrent execution of generation units.
//!
//! Every registered template becomes one unit. Units run in parallel on the
//! rayon pool and never observe each other: a failure in one is recorded in
//! the report and does not stop the rest.

use kitgen_core::{Error, Result, WriteOutcome};
use rayon::prelude::*;

use crate::{GenerationInfo, GenerationUnit, Template, TemplateFactory};

/// Runs a set of templates against one [`GenerationInfo`].
///
/// # Example
///
/// ```ignore
/// let report = Orchestrator::new(info)
///     .templates(kitgen_codegen_go::templates_for(&iface))
///     .run();
///
/// for failure in report.failures() {
///     eprintln!("{}: {}", failure.path, failure.result.as_ref().unwrap_err());
/// }
/// ```
pub struct Orchestrator {
    info: GenerationInfo,
    factories: Vec<TemplateFactory>,
}

impl Orchestrator {
    pub fn new(info: GenerationInfo) -> Self {
        Self {
            info,
            factories: Vec::new(),
        }
    }

    /// Register a template.
    pub fn template(mut self, factory: TemplateFactory) -> Self {
        self.factories.push(factory);
        self
    }

    /// Register several templates, in order.
    pub fn templates(mut self, factories: impl IntoIterator<Item = TemplateFactory>) -> Self {
        self.factories.extend(factories);
        self
    }

    pub fn info(&self) -> &GenerationInfo {
        &self.info
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Run every unit to completion and collect their outcomes in
    /// registration order.
    pub fn run(&self) -> GenerationReport {
        tracing::debug!(units = self.factories.len(), "starting generation");
        let units = self
            .factories
            .par_iter()
            .map(|factory| run_unit(factory(&self.info)))
            .collect();
        GenerationReport { units }
    }
}

fn run_unit(template: Box<dyn Template>) -> UnitReport {
    let name = template.name();
    let path = template.default_path();
    tracing::debug!(template = name, path, "generating");

    let result = GenerationUnit::bind(template).and_then(|unit| unit.generate());
    match &result {
        Ok(WriteOutcome::Skipped(_)) => {
            tracing::info!(template = name, path, "skipped existing file");
        }
        Ok(outcome) => {
            tracing::info!(template = name, path, bytes = outcome.bytes(), "generated");
        }
        Err(err) if err.is_sentinel() => {
            tracing::debug!(template = name, path, "nothing to generate");
        }
        Err(err) => {
            tracing::debug!(template = name, path, error = %err, "generation failed");
        }
    }

    UnitReport { name, path, result }
}

/// Outcome of one unit.
#[derive(Debug)]
pub struct UnitReport {
    /// Template category.
    pub name: &'static str,
    /// Default path of the artifact.
    pub path: &'static str,
    pub result: Result<WriteOutcome>,
}

impl UnitReport {
    /// The error, if this unit failed for real.
    pub fn failure(&self) -> Option<&Error> {
        match &self.result {
            Err(err) if !err.is_sentinel() => Some(err),
            _ => None,
        }
    }
}

/// Aggregated outcomes of a run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    units: Vec<UnitReport>,
}

impl GenerationReport {
    /// All unit outcomes, in registration order.
    pub fn units(&self) -> &[UnitReport] {
        &self.units
    }

    /// Units that wrote or streamed content.
    pub fn written(&self) -> impl Iterator<Item = &UnitReport> {
        self.units
            .iter()
            .filter(|u| matches!(&u.result, Ok(outcome) if !outcome.is_skipped()))
    }

    /// Units whose target existed and was left alone.
    pub fn skipped(&self) -> impl Iterator<Item = &UnitReport> {
        self.units
            .iter()
            .filter(|u| matches!(&u.result, Ok(outcome) if outcome.is_skipped()))
    }

    /// Units that failed, excluding the empty-unit sentinel.
    pub fn failures(&self) -> impl Iterator<Item = &UnitReport> {
        self.units.iter().filter(|u| u.failure().is_some())
    }

    /// `true` iff no unit failed.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use kitgen_core::WriteStrategy;
    use kitgen_ir::{Interface, Signature};
    use tempfile::TempDir;

    use super::*;
    use crate::{OutputTarget, Overwrite};

    struct Fixed {
        info: GenerationInfo,
        name: &'static str,
        path: &'static str,
        overwrite: Overwrite,
        fail: bool,
    }

    impl Template for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn default_path(&self) -> &'static str {
            self.path
        }

        fn prepare(&mut self) -> Result<()> {
            if self.fail {
                return Err(Error::config(self.name, "not configured"));
            }
            Ok(())
        }

        fn choose_strategy(&self) -> Result<WriteStrategy> {
            Ok(self.info.decide(self.path, self.overwrite, false))
        }

        fn render(&self) -> String {
            format!("// {}\n", self.name)
        }
    }

    fn fixed(
        info: &GenerationInfo,
        name: &'static str,
        path: &'static str,
        overwrite: Overwrite,
        fail: bool,
    ) -> Box<dyn Template> {
        Box::new(Fixed {
            info: info.clone(),
            name,
            path,
            overwrite,
            fail,
        })
    }

    fn generated(info: &GenerationInfo) -> Box<dyn Template> {
        fixed(info, "generated", "generated.go", Overwrite::Always, false)
    }

    fn editable(info: &GenerationInfo) -> Box<dyn Template> {
        fixed(info, "editable", "nested/editable.go", Overwrite::IfMissing, false)
    }

    fn broken(info: &GenerationInfo) -> Box<dyn Template> {
        fixed(info, "broken", "broken.go", Overwrite::Always, true)
    }

    fn info(dir: &Path) -> GenerationInfo {
        let iface = Interface::new("Svc").method(Signature::new("Ping"));
        GenerationInfo::new(iface, "svc", OutputTarget::Directory(dir.to_path_buf()))
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn logs_at(level: tracing::Level, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_unit_failure_not_logged_at_warn() {
        let dir = TempDir::new().unwrap();
        let info = info(dir.path());

        let quiet = logs_at(tracing::Level::WARN, || {
            assert!(run_unit(broken(&info)).failure().is_some());
        });
        assert_eq!(quiet, "");

        let verbose = logs_at(tracing::Level::DEBUG, || {
            run_unit(broken(&info));
        });
        assert!(verbose.contains("generation failed"));
    }

    #[test]
    fn test_all_units_run() {
        let dir = TempDir::new().unwrap();
        let report = Orchestrator::new(info(dir.path()))
            .template(generated)
            .template(editable)
            .run();

        assert!(report.is_success());
        assert_eq!(report.written().count(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/editable.go")).unwrap(),
            "// editable\n"
        );
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let dir = TempDir::new().unwrap();
        let report = Orchestrator::new(info(dir.path()))
            .templates([broken, generated, editable])
            .run();

        assert!(!report.is_success());
        let failures: Vec<_> = report.failures().map(|u| u.name).collect();
        assert_eq!(failures, ["broken"]);
        assert!(dir.path().join("generated.go").exists());
        assert!(dir.path().join("nested/editable.go").exists());
        assert!(!dir.path().join("broken.go").exists());
    }

    #[test]
    fn test_report_in_registration_order() {
        let dir = TempDir::new().unwrap();
        let report = Orchestrator::new(info(dir.path()))
            .templates([editable, broken, generated])
            .run();

        let names: Vec<_> = report.units().iter().map(|u| u.name).collect();
        assert_eq!(names, ["editable", "broken", "generated"]);
    }

    #[test]
    fn test_existing_editable_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/editable.go"), "// mine\n").unwrap();
        fs::write(dir.path().join("generated.go"), "// stale\n").unwrap();

        let report = Orchestrator::new(info(dir.path()))
            .templates([generated, editable])
            .run();

        assert!(report.is_success());
        assert_eq!(report.skipped().map(|u| u.name).collect::<Vec<_>>(), ["editable"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/editable.go")).unwrap(),
            "// mine\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("generated.go")).unwrap(),
            "// generated\n"
        );
    }

    #[test]
    fn test_sentinel_is_not_failure() {
        let report = GenerationReport {
            units: vec![UnitReport {
                name: "",
                path: "",
                result: Err(Error::EmptyTemplateOrStrategy),
            }],
        };
        assert!(report.is_success());
        assert_eq!(report.written().count(), 0);
    }

    #[test]
    fn test_empty_orchestrator() {
        let dir = TempDir::new().unwrap();
        let orchestrator = Orchestrator::new(info(dir.path()));
        assert!(orchestrator.is_empty());
        assert!(orchestrator.run().is_success());
    }
}
