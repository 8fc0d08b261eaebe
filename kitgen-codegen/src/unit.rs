//! Generation units.

use kitgen_core::{Error, Result, WriteOutcome, WriteStrategy};

use crate::Template;

/// A template paired with the strategy that persists its output.
///
/// Either part may be absent when a unit is assembled by hand; such a unit
/// reports [`Error::EmptyTemplateOrStrategy`] instead of doing anything.
pub struct GenerationUnit {
    template: Option<Box<dyn Template>>,
    strategy: Option<WriteStrategy>,
}

impl GenerationUnit {
    /// Prepare a template and choose its strategy.
    ///
    /// Errors are attributed to the template's default path.
    pub fn bind(mut template: Box<dyn Template>) -> Result<Self> {
        let artifact = template.default_path();
        template.prepare().map_err(|e| e.in_artifact(artifact))?;
        let strategy = template
            .choose_strategy()
            .map_err(|e| e.in_artifact(artifact))?;
        Ok(Self::from_parts(Some(template), Some(strategy)))
    }

    /// Assemble a unit from explicit parts, bypassing `prepare` and
    /// `choose_strategy`.
    pub fn from_parts(
        template: Option<Box<dyn Template>>,
        strategy: Option<WriteStrategy>,
    ) -> Self {
        Self { template, strategy }
    }

    /// Replace the strategy, e.g. to redirect a bound unit to a stream.
    pub fn with_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Template category, empty when there is no template.
    pub fn name(&self) -> &'static str {
        self.template.as_ref().map_or("", |t| t.name())
    }

    /// Template default path, empty when there is no template.
    pub fn path(&self) -> &'static str {
        self.template.as_ref().map_or("", |t| t.default_path())
    }

    pub fn strategy(&self) -> Option<&WriteStrategy> {
        self.strategy.as_ref()
    }

    /// Render the template and persist it.
    pub fn generate(&self) -> Result<WriteOutcome> {
        let (Some(template), Some(strategy)) = (&self.template, &self.strategy) else {
            return Err(Error::EmptyTemplateOrStrategy);
        };
        if let WriteStrategy::Skip(path) = strategy {
            return Ok(WriteOutcome::Skipped(path.clone()));
        }
        let content = template.render();
        strategy
            .write(&content)
            .map_err(|e| e.in_artifact(template.default_path()))
    }
}
