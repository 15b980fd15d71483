//! Attribute stubs for non-callable members.

use crate::builder::{CodeFragment, Renderable};

/// Marker type every attribute is declared with.
pub const ANY_TYPE: &str = "Any";

/// A `name: Any` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeStub {
    pub name: String,
}

impl AttributeStub {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The declaration line.
    pub fn line(&self) -> String {
        format!("{}: {}", self.name, ANY_TYPE)
    }
}

impl Renderable for AttributeStub {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.line())]
    }
}
