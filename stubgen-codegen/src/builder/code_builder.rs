//! Code builder utility for generating properly indented Python.

use super::{CodeFragment, Renderable};

/// One indentation level (PEP 8).
const INDENT: &str = "    ";

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use stubgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::python();
/// builder
///     .push_line("def run():")
///     .push_indent()
///     .push_line("'''Run it.'''")
///     .push_dedent();
///
/// assert_eq!(builder.build(), "def run():\n    '''Run it.'''\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with 4-space indentation.
    pub fn python() -> Self {
        Self {
            indent_level: 0,
            buffer: String::new(),
        }
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block { header, body } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::python()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::python();
        builder.push_line("count: Any");
        assert_eq!(builder.build(), "count: Any\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::python();
        builder
            .push_line("def f():")
            .push_indent()
            .push_line("'''doc'''")
            .push_dedent()
            .push_line("x: Any");

        assert_eq!(builder.build(), "def f():\n    '''doc'''\nx: Any\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::python();
        builder.push_dedent().push_line("x").push_indent().push_line("y");
        assert_eq!(builder.build(), "x\n    y\n");
    }

    #[test]
    fn test_multiline_line_keeps_continuation_indent() {
        let mut builder = CodeBuilder::python();
        builder
            .push_indent()
            .push_line("'''First.\n\n        Second.\n        '''");
        assert_eq!(
            builder.build(),
            "    '''First.\n\n        Second.\n        '''\n"
        );
    }

    #[test]
    fn test_emit_block_fragment() {
        struct BlockNode;
        impl Renderable for BlockNode {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::block("def f():", vec![CodeFragment::line("'''doc'''")]),
                    CodeFragment::Blank,
                    CodeFragment::Sequence(vec![CodeFragment::line("x: Any")]),
                ]
            }
        }

        let mut builder = CodeBuilder::python();
        builder.emit(&BlockNode);
        assert_eq!(builder.build(), "def f():\n    '''doc'''\n\nx: Any\n");
    }
}
