//! Class surface files.
//!
//! A class surface is the static registry of a facade class's members: the
//! member names in declared order, and for every callable its parameters,
//! annotations, docstring and wrapper chain. Stubs are rendered from it.

mod annotation;
mod param;
mod parse;

pub use annotation::{Annotation, BUILTINS_MODULE};
pub use param::{ParamDef, ParamKind};
pub use parse::parse_surface;
use serde::Deserialize;

/// The reflected surface of one facade class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSurface {
    /// Dotted module path the class lives in (e.g. `alembic.operations.base`)
    pub module: String,

    /// Class name
    pub name: String,

    /// Members in declared order
    #[serde(default)]
    pub members: Vec<MemberDef>,
}

/// A member of a class surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDef {
    /// An invocable member (method, classmethod, decorated function)
    Callable(CallableDef),
    /// Anything that is not invocable (plain values, properties)
    Attribute(AttributeDef),
}

impl MemberDef {
    /// Get the member name.
    pub fn name(&self) -> &str {
        match self {
            Self::Callable(def) => &def.name,
            Self::Attribute(def) => &def.name,
        }
    }
}

/// A callable member's signature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallableDef {
    /// Member name
    pub name: String,

    /// Declared parameters, receiver included
    #[serde(default)]
    pub params: Vec<ParamDef>,

    /// Return annotation
    pub returns: Option<Annotation>,

    /// Docstring, copied verbatim
    pub doc: Option<String>,

    /// The callable this one wraps, for decorated members
    pub wrapped: Option<Box<CallableDef>>,
}

impl CallableDef {
    /// Create a callable with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            doc: None,
            wrapped: None,
        }
    }

    /// Add a parameter.
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Set the return annotation.
    pub fn returns(mut self, annotation: Annotation) -> Self {
        self.returns = Some(annotation);
        self
    }

    /// Set the docstring.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Mark this callable as a wrapper around `original`.
    pub fn wraps(mut self, original: CallableDef) -> Self {
        self.wrapped = Some(Box::new(original));
        self
    }

    /// Follow the wrapper chain down to the original callable.
    pub fn unwrap_original(&self) -> &CallableDef {
        let mut current = self;
        while let Some(inner) = &current.wrapped {
            current = inner;
        }
        current
    }
}

/// A non-callable member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDef {
    /// Member name
    pub name: String,
}

impl AttributeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_original_follows_chain() {
        let original = CallableDef::new("inner").doc("the real one");
        let middle = CallableDef::new("middle").wraps(original.clone());
        let outer = CallableDef::new("outer").wraps(middle);

        assert_eq!(outer.unwrap_original(), &original);
    }

    #[test]
    fn test_unwrap_original_without_wrapper() {
        let def = CallableDef::new("plain");
        assert_eq!(def.unwrap_original().name, "plain");
    }

    #[test]
    fn test_member_accessors() {
        let callable = MemberDef::Callable(CallableDef::new("run"));
        let attribute = MemberDef::Attribute(AttributeDef::new("impl"));

        assert_eq!(callable.name(), "run");
        assert_eq!(attribute.name(), "impl");
    }
}
