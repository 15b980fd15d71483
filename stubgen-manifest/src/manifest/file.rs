use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use super::{Manifest, parse::parse_manifest};
use crate::{Error, Result};

/// A stubgen.toml file with its parsed manifest.
///
/// Relative paths in the manifest resolve against the directory that
/// contains the file.
pub struct StubgenToml {
    path: PathBuf,
    manifest: Manifest,
}

/// A configured target with every path resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Target name (the `[targets.<name>]` key)
    pub name: String,
    /// Class surface file
    pub surface: PathBuf,
    /// Stub file to regenerate
    pub destination: PathBuf,
    /// Member names to skip
    pub exclude: BTreeSet<String>,
}

impl StubgenToml {
    /// Open and parse a stubgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = parse_manifest(&content, &filename)?;

        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Resolve a manifest path against [`Self::base_dir`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }

    /// Resolved shared style configuration, if any.
    pub fn style_config(&self) -> Option<PathBuf> {
        self.manifest
            .stubgen
            .style_config
            .as_deref()
            .map(|p| self.resolve(p))
    }

    /// All targets with resolved paths, in declaration order.
    pub fn targets(&self) -> Vec<Target> {
        self.manifest
            .targets
            .iter()
            .map(|(name, config)| Target {
                name: name.clone(),
                surface: self.resolve(&config.surface),
                destination: self.resolve(&config.destination),
                exclude: config.exclude.clone(),
            })
            .collect()
    }
}
