//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "stubgen.toml")
    }
}

impl Manifest {
    /// Parse a stubgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    for (name, target) in &manifest.targets {
        ctx.validate_target_name(name)?;

        if target.destination.as_os_str().is_empty() {
            return Err(ctx.source_context().validation_error(
                format!("target '{name}' has an empty destination"),
                ctx.find_span(name, 0),
            ));
        }
    }

    let formatters = [
        ("imports", &manifest.formatters.imports),
        ("style", &manifest.formatters.style),
    ];
    for (pass, formatter) in formatters {
        let Some(formatter) = formatter else {
            continue;
        };
        if formatter.program.trim().is_empty() {
            return Err(ctx.source_context().validation_error(
                format!("formatter '{pass}' has an empty program"),
                ctx.find_span(pass, 0),
            ));
        }
    }

    Ok(())
}
