use serde::Deserialize;

use super::Annotation;

/// How a parameter binds arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Positional-or-keyword (`a`)
    #[default]
    Positional,
    /// Positional-only (before `/`), rendered like a positional parameter
    PositionalOnly,
    /// Variadic positional (`*args`)
    VarPositional,
    /// Keyword-only (after `*` or `*args`)
    KeywordOnly,
    /// Variadic keyword (`**kwargs`)
    VarKeyword,
}

impl ParamKind {
    /// Positional and positional-only parameters share one argument list.
    pub fn is_positional(self) -> bool {
        matches!(self, Self::Positional | Self::PositionalOnly)
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
    /// Parameter name
    pub name: String,

    #[serde(default)]
    pub kind: ParamKind,

    /// Whether the parameter declares a default. Only presence is recorded,
    /// default values never reach a stub.
    #[serde(default)]
    pub default: bool,

    pub annotation: Option<Annotation>,
}

impl ParamDef {
    /// Create a positional parameter without annotation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: false,
            annotation: None,
        }
    }

    /// Set the parameter kind.
    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the parameter as having a default.
    pub fn with_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Set the annotation.
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }
}
