mod regenerate;

use clap::{ArgAction, Parser};
use eyre::Result;
use regenerate::RegenerateCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stubgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "stubgen")]
#[command(version)]
#[command(about = "Regenerate Python stub files from declared class surfaces")]
pub(crate) struct Cli {
    #[command(flatten)]
    regenerate: RegenerateCommand,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.regenerate.run()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}
