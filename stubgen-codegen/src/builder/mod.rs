//! Stub printing building blocks.
//!
//! - [`CodeBuilder`] - indented line printer
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for stub blocks that turn into fragments

mod code_builder;
mod renderable;

pub use code_builder::CodeBuilder;
pub use renderable::{CodeFragment, Renderable};
