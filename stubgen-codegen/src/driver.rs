//! Target selection and the per-target regeneration flow.
//!
//! Every mode renders into a temporary `.pyi` file and runs the formatter
//! passes on it:
//!
//! - [`Mode::InPlace`] stages the file next to the destination and renames
//!   it over the destination once every pass succeeded
//! - [`Mode::Stdout`] copies the formatted text to the output and leaves the
//!   destination untouched
//! - [`Mode::Check`] compares the formatted text with the destination

use std::{
    collections::BTreeSet,
    convert::Infallible,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use eyre::{Context, Result};
use stubgen_manifest::{ALL_TARGETS, ClassSurface, StubgenToml, Target};
use tempfile::NamedTempFile;

use crate::{
    StubError,
    header::HeaderBlock,
    pipeline::{CommandTransformer, PostProcess},
    writer::StubDocument,
};

const DEFAULT_PROGNAME: &str = "stubgen";
const STAGING_PREFIX: &str = ".stubgen-";

/// Which targets to regenerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Target(String),
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_TARGETS {
            Self::All
        } else {
            Self::Target(s.to_string())
        })
    }
}

impl Selection {
    /// Pick the selected targets, keeping configuration order.
    pub fn resolve(&self, targets: Vec<Target>) -> Result<Vec<Target>, StubError> {
        match self {
            Self::All => Ok(targets),
            Self::Target(name) => {
                let available: Vec<String> = targets.iter().map(|t| t.name.clone()).collect();
                let selected: Vec<Target> =
                    targets.into_iter().filter(|t| &t.name == name).collect();
                if selected.is_empty() {
                    return Err(StubError::UnknownTarget {
                        name: name.clone(),
                        available,
                    });
                }
                Ok(selected)
            }
        }
    }
}

/// Where regenerated stubs go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Replace the destination file.
    #[default]
    InPlace,
    /// Write the stub to the output stream; never touch the destination.
    Stdout,
    /// Report whether the destination is up to date; never touch it.
    Check,
}

impl Mode {
    /// Formatter chatter is dropped when stubs are not written in place.
    pub fn ignores_formatter_output(self) -> bool {
        !matches!(self, Self::InPlace)
    }
}

/// A class surface together with where its stub lives and what to skip.
#[derive(Debug, Clone, PartialEq)]
pub struct RegenerationTarget {
    pub name: String,
    pub surface: ClassSurface,
    pub exclude: BTreeSet<String>,
    pub destination: PathBuf,
}

impl RegenerationTarget {
    /// Load the class surface of a configured target.
    pub fn load(target: &Target) -> stubgen_manifest::Result<Self> {
        Ok(Self {
            name: target.name.clone(),
            surface: ClassSurface::from_file(&target.surface)?,
            exclude: target.exclude.clone(),
            destination: target.destination.clone(),
        })
    }
}

/// What happened to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The destination was replaced.
    Written,
    /// The stub was written to the output stream.
    Streamed,
    /// The destination matches the regenerated stub.
    UpToDate,
    /// The destination differs from the regenerated stub (or is missing).
    Stale,
}

/// Regenerates stubs for targets, one at a time.
pub struct Regenerator {
    progname: String,
    mode: Mode,
    post: PostProcess,
}

impl Regenerator {
    /// Create a regenerator without post-processing passes.
    pub fn new(progname: impl Into<String>, mode: Mode) -> Self {
        Self {
            progname: progname.into(),
            mode,
            post: PostProcess::new(),
        }
    }

    /// Create a regenerator from stubgen.toml.
    ///
    /// The imports pass runs before the style pass. With `format` off no
    /// formatter runs.
    pub fn from_config(config: &StubgenToml, mode: Mode, format: bool) -> Self {
        let progname = config
            .manifest()
            .stubgen
            .progname
            .clone()
            .unwrap_or_else(default_progname);

        let mut post = PostProcess::new();
        if format {
            let formatters = &config.manifest().formatters;
            let passes = [("imports", &formatters.imports), ("style", &formatters.style)];
            for (name, formatter) in passes {
                let Some(formatter) = formatter else {
                    continue;
                };
                let mut pass = CommandTransformer::new(name, &formatter.program)
                    .options(&formatter.options)
                    .ignore_output(mode.ignores_formatter_output());
                if let Some(cwd) = &formatter.cwd {
                    pass = pass.cwd(config.resolve(cwd));
                }
                if let Some(style_config) = config.style_config() {
                    pass = pass.style_config(style_config);
                }
                post = post.pass(pass);
            }
        }

        Self::new(progname, mode).post_process(post)
    }

    /// Replace the post-processing passes.
    pub fn post_process(mut self, post: PostProcess) -> Self {
        self.post = post;
        self
    }

    /// Get the generator identity written into the sentinel line.
    pub fn progname(&self) -> &str {
        &self.progname
    }

    /// Get the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the post-processing passes.
    pub fn passes(&self) -> &PostProcess {
        &self.post
    }

    /// Build the unformatted stub for a target, keeping the header of the
    /// current destination file.
    pub fn render(&self, target: &RegenerationTarget) -> Result<StubDocument> {
        let header = HeaderBlock::from_file(&target.destination)?;
        let document =
            StubDocument::from_surface(&self.progname, header, &target.surface, &target.exclude)?;
        Ok(document)
    }

    /// Regenerate one target. In [`Mode::Stdout`] the stub goes to `out`.
    pub fn regenerate(&self, target: &RegenerationTarget, out: &mut dyn Write) -> Result<Outcome> {
        tracing::info!(
            target = %target.name,
            destination = %target.destination.display(),
            mode = ?self.mode,
            "regenerating stub"
        );
        let document = self.render(target)?;

        match self.mode {
            Mode::InPlace => {
                self.write_in_place(&document, &target.destination)?;
                Ok(Outcome::Written)
            }
            Mode::Stdout => {
                let text = self.format_detached(&document, &target.destination)?;
                out.write_all(text.as_bytes())
                    .wrap_err("failed to write stub to output")?;
                Ok(Outcome::Streamed)
            }
            Mode::Check => {
                let text = self.format_detached(&document, &target.destination)?;
                let current = match fs::read_to_string(&target.destination) {
                    Ok(current) => Some(current),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                    Err(e) => {
                        return Err(e).wrap_err_with(|| {
                            format!("failed to read '{}'", target.destination.display())
                        });
                    }
                };
                if current.as_deref() == Some(text.as_str()) {
                    Ok(Outcome::UpToDate)
                } else {
                    Ok(Outcome::Stale)
                }
            }
        }
    }

    /// Stage, format, then rename over the destination.
    fn write_in_place(&self, document: &StubDocument, destination: &Path) -> Result<()> {
        let dir = parent_dir(destination);
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create '{}'", dir.display()))?;

        let existing = fs::metadata(destination).ok().map(|m| m.permissions());
        let staged = match existing {
            Some(_) => staging_file(destination, Some(dir), None)?,
            None => staging_file(destination, Some(dir), new_stub_permissions())?,
        };
        document.write(staged.path())?;
        self.post.run(staged.path())?;

        if let Some(permissions) = existing {
            fs::set_permissions(staged.path(), permissions)
                .wrap_err("failed to copy permissions onto staged stub")?;
        }

        staged
            .persist(destination)
            .map_err(|e| e.error)
            .wrap_err_with(|| format!("failed to replace '{}'", destination.display()))?;
        Ok(())
    }

    /// Format in the system temp directory and return the result. The
    /// temporary file is removed on every path.
    fn format_detached(&self, document: &StubDocument, destination: &Path) -> Result<String> {
        let staged = staging_file(destination, None, None)?;
        document.write(staged.path())?;
        self.post.run(staged.path())?;
        fs::read_to_string(staged.path())
            .wrap_err_with(|| format!("failed to read '{}'", staged.path().display()))
    }
}

/// Generator identity from the invoking program path, `/`-separated.
pub fn default_progname() -> String {
    std::env::args()
        .next()
        .map(|arg0| arg0.replace('\\', "/"))
        .filter(|arg0| !arg0.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGNAME.to_string())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Permissions a stub gets when it is created for the first time: read and
/// write for everyone, narrowed by the process umask.
#[cfg(unix)]
fn new_stub_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_stub_permissions() -> Option<fs::Permissions> {
    None
}

/// A temporary file with the destination's extension, so formatters treat
/// it the same way. Without `permissions` it is private to the owner.
fn staging_file(
    destination: &Path,
    dir: Option<&Path>,
    permissions: Option<fs::Permissions>,
) -> Result<NamedTempFile> {
    let suffix = match destination.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => ".pyi".to_string(),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(&suffix);
    if let Some(permissions) = permissions {
        builder.permissions(permissions);
    }
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    };
    file.wrap_err("failed to create temporary stub file")
}
