//! Post-processing of written stubs.
//!
//! After a stub is written, a [`PostProcess`] runs its [`TextTransformer`]
//! passes against the file in a fixed order: imports first, then style.
//!
//! # Example
//!
//! ```ignore
//! use stubgen_codegen::pipeline::{CommandTransformer, PostProcess};
//!
//! let post = PostProcess::new()
//!     .pass(CommandTransformer::new("imports", "zimports").options("-e"))
//!     .pass(CommandTransformer::new("style", "black").options("--config {style_config}"));
//!
//! post.run(path)?;
//! ```

mod command;
mod runner;
mod transformer;

pub use command::{CommandTransformer, STUB_TOKEN, STYLE_CONFIG_TOKEN};
pub use runner::PostProcess;
pub use transformer::TextTransformer;
