//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod output;
mod regenerate;

pub use output::{Report, TerminalOutput};
pub use regenerate::{RegenerateReport, TargetResult};
