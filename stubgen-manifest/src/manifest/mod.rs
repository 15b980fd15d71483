//! Manifest types and parsing for stubgen.toml files.

mod file;
mod parse;
mod validate;

use std::{collections::BTreeSet, path::PathBuf};

use indexmap::IndexMap;
pub use file::{StubgenToml, Target};
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::{ALL_TARGETS, ParseContext};

/// Root manifest for stubgen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator-wide settings
    #[serde(default)]
    pub stubgen: Settings,

    /// External formatter passes run on every generated stub
    #[serde(default)]
    pub formatters: Formatters,

    /// Stub files to regenerate, in declaration order
    #[serde(default)]
    pub targets: IndexMap<String, TargetConfig>,
}

/// The `[stubgen]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Shared style configuration handed to formatters as `{style_config}`
    pub style_config: Option<PathBuf>,

    /// Program identity written into the opening sentinel line.
    /// Defaults to the invoking program path.
    pub progname: Option<String>,
}

/// The `[formatters]` table. Passes run imports first, then style.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formatters {
    /// Import reordering pass
    pub imports: Option<FormatterConfig>,

    /// Style normalization pass
    pub style: Option<FormatterConfig>,
}

/// An external formatter command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    /// Executable name, looked up on PATH
    pub program: String,

    /// Command line options, split with shell quoting rules.
    /// `{stub}` expands to the stub path and `{style_config}` to the shared
    /// style configuration; without `{stub}` the path is passed first.
    #[serde(default)]
    pub options: String,

    /// Working directory for the command
    pub cwd: Option<PathBuf>,
}

/// A `[targets.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Class surface file describing the facade's members
    pub surface: PathBuf,

    /// Stub file to regenerate
    pub destination: PathBuf,

    /// Member names never emitted for this target
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}
