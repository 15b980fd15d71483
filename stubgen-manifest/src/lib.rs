//! Configuration and class surface parsing for the stub generator.
//!
//! - [`manifest`] - `stubgen.toml`: targets, exclusions and formatter passes
//! - [`surface`] - class surface files: the member registry stubs are rendered from

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
pub mod manifest;
pub mod surface;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    ALL_TARGETS, FormatterConfig, Formatters, Manifest, Settings, StubgenToml, Target,
    TargetConfig,
};
pub use surface::{
    Annotation, AttributeDef, BUILTINS_MODULE, CallableDef, ClassSurface, MemberDef, ParamDef,
    ParamKind,
};
