//! Stub document assembly and writing.

use std::{collections::BTreeSet, path::Path};

use eyre::{Context, Result};
use stubgen_manifest::ClassSurface;

use crate::{
    StubError,
    attribute::AttributeStub,
    builder::{CodeBuilder, CodeFragment, Renderable},
    header::{CLOSING_SENTINEL, HeaderBlock, opening_sentinel},
    members::{Member, public_members},
    signature::FunctionStub,
};

/// One top-level declaration of a stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubBlock {
    Function(FunctionStub),
    Attribute(AttributeStub),
}

impl StubBlock {
    /// Get the declared name.
    pub fn name(&self) -> &str {
        match self {
            Self::Function(stub) => &stub.name,
            Self::Attribute(stub) => &stub.name,
        }
    }
}

impl Renderable for StubBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Self::Function(stub) => stub.to_fragments(),
            Self::Attribute(stub) => stub.to_fragments(),
        }
    }
}

/// A complete stub file: sentinels, preserved header, declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubDocument {
    progname: String,
    header: HeaderBlock,
    blocks: Vec<StubBlock>,
}

impl StubDocument {
    /// Create an empty document.
    pub fn new(progname: impl Into<String>, header: HeaderBlock) -> Self {
        Self {
            progname: progname.into(),
            header,
            blocks: Vec::new(),
        }
    }

    /// Render every public member of `surface` not listed in `exclude`.
    pub fn from_surface(
        progname: impl Into<String>,
        header: HeaderBlock,
        surface: &ClassSurface,
        exclude: &BTreeSet<String>,
    ) -> Result<Self, StubError> {
        let mut document = Self::new(progname, header);

        for member in public_members(surface, exclude) {
            let block = match member {
                Member::Callable { name, def } => {
                    StubBlock::Function(FunctionStub::render(name, def, &surface.module)?)
                }
                Member::Attribute { name } => StubBlock::Attribute(AttributeStub::new(name)),
            };
            tracing::debug!(class = %surface.name, member = block.name(), "rendered member");
            document.push(block);
        }

        Ok(document)
    }

    /// Append a declaration.
    pub fn push(&mut self, block: StubBlock) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Get the declarations in order.
    pub fn blocks(&self) -> &[StubBlock] {
        &self.blocks
    }

    /// Render the whole file.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(self);
        builder.build()
    }

    /// Write the rendered file to `path`, replacing any previous content.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_file(path, &self.render())
            .wrap_err_with(|| format!("failed to write stub '{}'", path.display()))
    }
}

impl Renderable for StubDocument {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = vec![CodeFragment::line(opening_sentinel(&self.progname))];
        fragments.extend(self.header.lines().iter().map(CodeFragment::line));
        fragments.push(CodeFragment::line(CLOSING_SENTINEL));
        fragments.push(CodeFragment::Blank);
        fragments.push(CodeFragment::Blank);

        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                fragments.push(CodeFragment::Blank);
            }
            fragments.push(CodeFragment::Sequence(block.to_fragments()));
        }

        fragments
    }
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
