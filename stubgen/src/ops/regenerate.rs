//! Regenerate operation - stubs for the selected targets, in order.

use std::io::{self, Write};

use eyre::{Context, Result};
use stubgen_codegen::{RegenerationTarget, Regenerator};

use crate::reports::{RegenerateReport, TargetResult};

/// Execute the regenerate operation.
///
/// Targets are processed one after another; the first failure stops the run.
/// In stdout mode each stub is written to stdout as soon as it is ready.
pub fn regenerate(
    regenerator: &Regenerator,
    targets: &[RegenerationTarget],
) -> Result<RegenerateReport> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut results = Vec::with_capacity(targets.len());

    for target in targets {
        let outcome = regenerator
            .regenerate(target, &mut out)
            .wrap_err_with(|| format!("failed to regenerate target '{}'", target.name))?;
        results.push(TargetResult {
            name: target.name.clone(),
            destination: target.destination.clone(),
            outcome,
        });
    }

    out.flush().wrap_err("failed to flush stdout")?;
    tracing::info!(targets = results.len(), mode = ?regenerator.mode(), "regeneration finished");

    Ok(RegenerateReport {
        mode: regenerator.mode(),
        results,
    })
}
