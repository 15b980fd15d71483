use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Failures that abort regeneration of a stub.
#[derive(Debug, Error)]
pub enum StubError {
    /// The first parameter of a callable is not a receiver, so the member is
    /// not bound to an instance or class.
    #[error(
        "member '{member}' is not an instance or class method: expected first parameter 'self' or 'cls', found {}",
        describe_receiver(.found)
    )]
    MalformedBinding {
        member: String,
        found: Option<String>,
    },

    #[error("unknown target '{name}' (available: {})", .available.join(", "))]
    UnknownTarget {
        name: String,
        available: Vec<String>,
    },

    #[error("formatter '{formatter}': could not find program '{program}' on PATH")]
    FormatterNotFound {
        formatter: String,
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("formatter '{formatter}': invalid options {options:?}")]
    InvalidFormatterOptions { formatter: String, options: String },

    #[error("formatter '{formatter}' uses {{style_config}} but no style_config is configured")]
    MissingStyleConfig { formatter: String },

    #[error("formatter '{formatter}' failed on '{}' ({status})", .path.display())]
    FormatterFailed {
        formatter: String,
        path: PathBuf,
        status: ExitStatus,
    },
}

fn describe_receiver(found: &Option<String>) -> String {
    match found {
        Some(name) => format!("'{name}'"),
        None => "no positional parameters".to_string(),
    }
}
