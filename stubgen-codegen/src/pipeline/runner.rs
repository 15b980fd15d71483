//! Post-processing orchestrator.

use std::path::Path;

use eyre::{Context, Result};

use super::TextTransformer;

/// Ordered list of passes applied to a written stub.
///
/// # Example
///
/// ```ignore
/// let post = PostProcess::new().pass(imports).pass(style);
/// post.run(Path::new("alembic/op.pyi"))?;
/// ```
pub struct PostProcess {
    passes: Vec<Box<dyn TextTransformer>>,
}

impl PostProcess {
    /// Create a pipeline with no passes.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a pass to run after the ones already added.
    pub fn pass(mut self, pass: impl TextTransformer + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Names of the configured passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Check if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass against `path`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first pass error, with the pass name as context.
    pub fn run(&self, path: &Path) -> Result<()> {
        for pass in &self.passes {
            tracing::debug!(pass = pass.name(), path = %path.display(), "running post-processing pass");
            pass.apply(path)
                .wrap_err_with(|| format!("post-processing pass '{}' failed", pass.name()))?;
        }
        Ok(())
    }
}

impl Default for PostProcess {
    fn default() -> Self {
        Self::new()
    }
}
