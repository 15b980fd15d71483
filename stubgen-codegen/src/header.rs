//! The hand-maintained header block of a stub file.
//!
//! Everything between the opening sentinel and `### end imports ###` belongs
//! to the stub's maintainers (imports, type aliases) and is carried over into
//! each regenerated file.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use eyre::{Context, Result};

/// Prefix of the opening sentinel line; the rest names the generator.
pub const OPENING_SENTINEL_PREFIX: &str = "# ### this file stubs are generated by";

/// The closing sentinel line.
pub const CLOSING_SENTINEL: &str = "### end imports ###";

/// Build the opening sentinel line for a generator identity.
pub fn opening_sentinel(progname: &str) -> String {
    format!("{OPENING_SENTINEL_PREFIX} {progname} - do not edit ###")
}

/// Lines captured between the two sentinels, trailing whitespace stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    lines: Vec<String>,
}

impl HeaderBlock {
    /// Create a header block from lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract the header block from a reader.
    ///
    /// Capture starts after the line beginning with the opening sentinel and
    /// stops at the closing sentinel. Without an opening sentinel the block
    /// is empty.
    pub fn parse(reader: impl BufRead) -> io::Result<Self> {
        let mut lines = Vec::new();
        let mut capturing = false;

        for line in reader.lines() {
            let line = line?;
            if line.starts_with(OPENING_SENTINEL_PREFIX) {
                capturing = true;
            } else if line.trim_end() == CLOSING_SENTINEL {
                break;
            } else if capturing {
                lines.push(line.trim_end().to_string());
            }
        }

        Ok(Self { lines })
    }

    /// Extract the header block from an existing stub file.
    ///
    /// A missing file yields an empty block (first-time generation).
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no existing stub, starting with an empty header");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("failed to open '{}'", path.display()));
            }
        };

        Self::parse(BufReader::new(file))
            .wrap_err_with(|| format!("failed to read header from '{}'", path.display()))
    }

    /// Get the captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Check if no lines were captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
