//! Text transformer trait.

use std::path::Path;

use eyre::Result;

/// A pass that rewrites a file in place.
///
/// Built-in transformer:
/// - `CommandTransformer` - runs an external formatter on the file
pub trait TextTransformer: Send + Sync {
    /// The name of this pass (used in logs and errors).
    fn name(&self) -> &str;

    /// Rewrite the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pass could not run or reported failure.
    fn apply(&self, path: &Path) -> Result<()>;
}
