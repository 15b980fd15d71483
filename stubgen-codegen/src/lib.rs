//! Python stub rendering and formatting for the stub generator.
//!
//! This crate turns a [`stubgen_manifest::ClassSurface`] into the text of a
//! `.pyi` file and runs the configured formatters over it.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`header`] - Reading the preserved header block of an existing stub
//! - [`members`] - Public member enumeration
//! - [`signature`] - `def` declarations and annotation normalization
//! - [`attribute`] - `name: Any` declarations
//! - [`writer`] - Whole-file assembly (StubDocument)
//! - [`pipeline`] - Post-processing passes (imports, then style)
//! - [`driver`] - Target selection and the in-place/stdout/check flows

pub mod attribute;
pub mod builder;
pub mod driver;
mod error;
pub mod header;
pub mod members;
pub mod pipeline;
pub mod signature;
pub mod writer;

pub use attribute::AttributeStub;
pub use driver::{Mode, Outcome, RegenerationTarget, Regenerator, Selection, default_progname};
pub use error::StubError;
pub use header::HeaderBlock;
pub use members::{Member, public_members};
pub use signature::{AnnotationFormatter, FunctionStub};
pub use writer::{StubBlock, StubDocument};
