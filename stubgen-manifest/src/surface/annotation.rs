use serde::Deserialize;

/// Module that holds the builtin types.
pub const BUILTINS_MODULE: &str = "builtins";

/// A type annotation as it appears on a live signature.
///
/// In surface files:
///
/// ```toml
/// annotation = { typing = "typing.Optional[str]" }     # typing construct
/// annotation = { type = "Column", module = "sqlalchemy.sql.schema" }
/// annotation = { type = "int" }                        # builtins
/// annotation = "ForwardRef('Operations')"              # anything else
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Annotation {
    /// Display form of a construct from the `typing` module
    Typing { typing: String },

    /// A concrete class
    Class {
        /// Qualified name inside its module (e.g. `Operations.Inner`)
        #[serde(rename = "type")]
        qualname: String,
        /// Module the class lives in
        #[serde(default = "builtins_module")]
        module: String,
    },

    /// Any other annotation, by its textual representation
    Repr(String),
}

fn builtins_module() -> String {
    BUILTINS_MODULE.to_string()
}

impl Annotation {
    /// Annotation for a `typing` construct.
    pub fn typing(display: impl Into<String>) -> Self {
        Self::Typing {
            typing: display.into(),
        }
    }

    /// Annotation for a concrete class in `module`.
    pub fn class(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        Self::Class {
            qualname: qualname.into(),
            module: module.into(),
        }
    }

    /// Annotation for a builtin class.
    pub fn builtin(qualname: impl Into<String>) -> Self {
        Self::class(BUILTINS_MODULE, qualname)
    }

    /// Annotation given by its textual representation.
    pub fn repr(text: impl Into<String>) -> Self {
        Self::Repr(text.into())
    }
}
