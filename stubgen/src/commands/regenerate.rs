use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stubgen_codegen::{Mode, RegenerationTarget, Regenerator, Selection};
use stubgen_manifest::{ALL_TARGETS, StubgenToml};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RegenerateCommand {
    /// Path to stubgen.toml (defaults to ./stubgen.toml)
    #[arg(short, long, default_value = "stubgen.toml")]
    pub config: PathBuf,

    /// Target to regenerate, or "all"
    #[arg(long, value_name = "TARGET", default_value = ALL_TARGETS)]
    pub file: Selection,

    /// Write stubs to stdout instead of replacing the destination files
    #[arg(long, conflicts_with = "check")]
    pub stdout: bool,

    /// Exit with an error if any stub is out of date; write nothing
    #[arg(long)]
    pub check: bool,

    /// Skip the imports and style formatters
    #[arg(long)]
    pub no_format: bool,
}

impl RegenerateCommand {
    fn mode(&self) -> Mode {
        if self.stdout {
            Mode::Stdout
        } else if self.check {
            Mode::Check
        } else {
            Mode::InPlace
        }
    }

    pub fn run(&self) -> Result<()> {
        let config = StubgenToml::open(&self.config).unwrap_or_exit();
        let selected = self.file.resolve(config.targets())?;

        // Load every surface up front so a broken one fails before any stub is touched
        let targets = selected
            .iter()
            .map(RegenerationTarget::load)
            .collect::<stubgen_manifest::Result<Vec<_>>>()
            .unwrap_or_exit();

        let mode = self.mode();
        let regenerator = Regenerator::from_config(&config, mode, !self.no_format);
        tracing::debug!(
            config = %config.path().display(),
            targets = targets.len(),
            passes = ?regenerator.passes().pass_names(),
            "loaded configuration"
        );
        let report = ops::regenerate(&regenerator, &targets)?;

        if mode != Mode::Stdout {
            report.render(&mut TerminalOutput::new());
        }

        if report.has_stale() {
            std::process::exit(1);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::Cli;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stubgen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.regenerate.config, PathBuf::from("stubgen.toml"));
        assert_eq!(cli.regenerate.file, Selection::All);
        assert_eq!(cli.regenerate.mode(), Mode::InPlace);
        assert!(!cli.regenerate.no_format);
        assert_eq!(cli.verbosity(), 0);
    }

    #[test]
    fn test_single_target_to_stdout() {
        let cli = parse(&["--file", "op", "--stdout", "-vv"]);
        assert_eq!(cli.regenerate.file, Selection::Target("op".to_string()));
        assert_eq!(cli.regenerate.mode(), Mode::Stdout);
        assert_eq!(cli.verbosity(), 2);
    }

    #[test]
    fn test_check_mode() {
        let cli = parse(&["--check", "--no-format", "-c", "tools/stubgen.toml"]);
        assert_eq!(cli.regenerate.mode(), Mode::Check);
        assert!(cli.regenerate.no_format);
        assert_eq!(cli.regenerate.config, PathBuf::from("tools/stubgen.toml"));
    }

    #[test]
    fn test_stdout_conflicts_with_check() {
        let result = Cli::try_parse_from(["stubgen", "--stdout", "--check"]);
        assert!(result.is_err());
    }
}
