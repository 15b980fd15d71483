//! Regenerate command report data structures.

use std::path::PathBuf;

use stubgen_codegen::{Mode, Outcome};

use super::output::{Output, Report};

/// What happened to one target.
#[derive(Debug)]
pub struct TargetResult {
    /// Target name.
    pub name: String,
    /// Stub file of the target.
    pub destination: PathBuf,
    /// Result of regeneration.
    pub outcome: Outcome,
}

/// Report data from a regeneration run.
#[derive(Debug)]
pub struct RegenerateReport {
    pub mode: Mode,
    pub results: Vec<TargetResult>,
}

impl RegenerateReport {
    /// Whether any stub was found out of date.
    pub fn has_stale(&self) -> bool {
        self.results.iter().any(|r| r.outcome == Outcome::Stale)
    }

    fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &TargetResult> {
        self.results.iter().filter(move |r| r.outcome == outcome)
    }
}

impl Report for RegenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match self.mode {
            Mode::InPlace => {
                out.section("Regenerated");
                for result in self.with_outcome(Outcome::Written) {
                    out.list_item(&format!(
                        "{} -> {}",
                        result.name,
                        result.destination.display()
                    ));
                }
            }
            Mode::Check => {
                for result in self.with_outcome(Outcome::Stale) {
                    out.warning(&format!(
                        "{} is out of date (target '{}')",
                        result.destination.display(),
                        result.name
                    ));
                }
                if !self.has_stale() {
                    let count = self.results.len();
                    out.preformatted(&format!(
                        "✓ {} stub{} up to date",
                        count,
                        if count == 1 { " is" } else { "s are" }
                    ));
                }
            }
            Mode::Stdout => {}
        }
    }
}
