//! Renderable trait and CodeFragment for decoupled stub generation.

/// A fragment of generated code.
///
/// Stub blocks describe themselves as fragments; the printer owns
/// indentation and line endings.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    ///
    /// Embedded newlines are written as-is, so continuation lines keep the
    /// indentation they already carry.
    Line(String),
    /// A blank line.
    Blank,
    /// A header line followed by an indented body (`def f():` + body).
    Block {
        header: String,
        body: Vec<CodeFragment>,
    },
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Block {
            header: header.into(),
            body,
        }
    }
}

/// Types that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}
